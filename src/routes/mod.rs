// Route exports
pub mod errors;
pub mod facilities;

use actix_web::web;

pub use errors::{handle_json_payload_error, JsonError};
pub use facilities::{AppState, LiveFinder};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(facilities::configure),
    );
}

/// JSON extractor config that reports payload problems as JSON errors
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}
