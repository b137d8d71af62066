use actix_web::{error, http::StatusCode, HttpResponse};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
///
/// A wrong content type is reported as 415, anything else as 400.
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);

    let json_error = match err {
        error::JsonPayloadError::ContentType => JsonError {
            error: "unsupported_media_type".to_string(),
            message: format!(
                "Expected 'application/json', got '{}'",
                req.headers()
                    .get(actix_web::http::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("none")
            ),
            status_code: 415,
        },
        other => JsonError {
            error: "invalid_json".to_string(),
            message: format!("Invalid JSON: {}", other),
            status_code: 400,
        },
    };

    json_error.into()
}
