use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::OverpassSettings;
use crate::models::{Coordinate, RawElement};
use crate::services::FacilityLocator;

/// OSM tags whose values identify a healthcare facility
const CATEGORY_TAGS: &[&str] = &["amenity", "healthcare"];

/// OSM element kinds searched; ways and relations cover buildings and campuses
const ELEMENT_KINDS: &[&str] = &["node", "way", "relation"];

/// Errors that can occur when querying the Overpass API
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Overpass API returned status {0}")]
    ApiError(u16),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Overpass API client
///
/// Finds facilities around a point whose `amenity` or `healthcare` tag is one
/// of the configured categories.
pub struct OverpassClient {
    endpoint: String,
    timeout_secs: u64,
    categories: Vec<String>,
    client: Client,
}

impl OverpassClient {
    /// Create a new Overpass client
    pub fn new(settings: &OverpassSettings) -> Result<Self, LocatorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            endpoint: settings.endpoint.clone(),
            timeout_secs: settings.timeout_secs,
            categories: settings.categories.clone(),
            client,
        })
    }

    /// Build the Overpass QL query for a search around `center`
    ///
    /// The output is deterministic for identical inputs.
    pub fn build_query(&self, center: Coordinate, radius_meters: u32) -> String {
        let pattern = self.categories.join("|");
        let around = format!("(around:{},{},{})", radius_meters, center.lat, center.lon);

        let mut query = format!("[out:json][timeout:{}];\n(\n", self.timeout_secs);
        for tag in CATEGORY_TAGS {
            for kind in ELEMENT_KINDS {
                query.push_str(&format!("  {}[\"{}\"~\"^({})$\"]{};\n", kind, tag, pattern, around));
            }
        }
        query.push_str(");\nout center;\n");
        query
    }

    /// Run a search and return every element Overpass reports
    pub async fn query_elements(
        &self,
        center: Coordinate,
        radius_meters: u32,
    ) -> Result<Vec<RawElement>, LocatorError> {
        let query = self.build_query(center, radius_meters);
        let body = format!("data={}", urlencoding::encode(&query));

        tracing::debug!(
            "Querying Overpass at {} for ({}, {}) within {}m",
            self.endpoint,
            center.lat,
            center.lon,
            radius_meters
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Overpass query failed: {} - {}", status, body);
            return Err(LocatorError::ApiError(status.as_u16()));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| LocatorError::InvalidResponse(format!("Failed to parse body: {}", e)))?;

        parse_elements(&json)
    }
}

/// Extract elements from an Overpass JSON document
///
/// Elements that do not match the expected shape are skipped.
pub fn parse_elements(json: &Value) -> Result<Vec<RawElement>, LocatorError> {
    let elements = json
        .get("elements")
        .and_then(|e| e.as_array())
        .ok_or_else(|| LocatorError::InvalidResponse("Missing elements array".into()))?;

    let parsed: Vec<RawElement> = elements
        .iter()
        .filter_map(|element| match serde_json::from_value(element.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::debug!("Skipping malformed Overpass element: {}", e);
                None
            }
        })
        .collect();

    tracing::debug!("Parsed {} of {} Overpass elements", parsed.len(), elements.len());

    Ok(parsed)
}

#[async_trait]
impl FacilityLocator for OverpassClient {
    async fn locate(
        &self,
        center: Coordinate,
        radius_meters: u32,
    ) -> Result<Vec<RawElement>, LocatorError> {
        self.query_elements(center, radius_meters).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn settings(endpoint: String) -> OverpassSettings {
        OverpassSettings {
            endpoint,
            timeout_secs: 15,
            categories: vec!["hospital".to_string(), "clinic".to_string()],
        }
    }

    #[test]
    fn test_build_query() {
        let client = OverpassClient::new(&settings("http://localhost".to_string())).unwrap();
        let query = client.build_query(Coordinate::new(40.0, -74.5), 5000);

        assert!(query.starts_with("[out:json][timeout:15];"));
        assert!(query.contains("node[\"amenity\"~\"^(hospital|clinic)$\"](around:5000,40,-74.5);"));
        assert!(query.contains("relation[\"healthcare\"~\"^(hospital|clinic)$\"](around:5000,40,-74.5);"));
        assert!(query.trim_end().ends_with("out center;"));
        assert_eq!(query, client.build_query(Coordinate::new(40.0, -74.5), 5000));
    }

    #[test]
    fn test_parse_elements_skips_malformed() {
        let json = serde_json::json!({
            "elements": [
                { "type": "node", "id": 1, "lat": 40.0, "lon": -74.0 },
                { "type": "node", "id": "not-a-number" },
                { "type": "way", "id": 2, "center": { "lat": 40.1, "lon": -74.1 } }
            ]
        });

        let elements = parse_elements(&json).unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[1].id, Some(2));
    }

    #[test]
    fn test_parse_elements_missing_array() {
        let json = serde_json::json!({ "remark": "runtime error" });
        assert!(matches!(parse_elements(&json), Err(LocatorError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_query_elements_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/interpreter")
            .match_body(Matcher::Regex("data=.*around%3A3000%2C40%2C-74".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"elements":[{"type":"node","id":7,"lat":40.001,"lon":-74.001,"tags":{"name":"City Hospital"}}]}"#)
            .create_async()
            .await;

        let client = OverpassClient::new(&settings(format!("{}/api/interpreter", server.url()))).unwrap();
        let elements = client.locate(Coordinate::new(40.0, -74.0), 3000).await.unwrap();

        mock.assert_async().await;
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].name(), Some("City Hospital"));
    }

    #[tokio::test]
    async fn test_query_elements_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/interpreter")
            .with_status(504)
            .with_body("Gateway Timeout")
            .create_async()
            .await;

        let client = OverpassClient::new(&settings(format!("{}/api/interpreter", server.url()))).unwrap();
        let result = client.locate(Coordinate::new(40.0, -74.0), 5000).await;

        assert!(matches!(result, Err(LocatorError::ApiError(504))));
    }

    #[tokio::test]
    async fn test_query_elements_non_json_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/interpreter")
            .with_status(200)
            .with_body("<html>rate limited</html>")
            .create_async()
            .await;

        let client = OverpassClient::new(&settings(format!("{}/api/interpreter", server.url()))).unwrap();
        let result = client.locate(Coordinate::new(40.0, -74.0), 5000).await;

        assert!(matches!(result, Err(LocatorError::InvalidResponse(_))));
    }
}
