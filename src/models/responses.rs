use serde::{Deserialize, Serialize};

use crate::models::domain::Facility;

/// Response for the nearby facilities endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyFacilitiesResponse {
    pub facilities: Vec<Facility>,
}

/// Response for the reverse geocode endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReverseGeocodeResponse {
    #[serde(rename = "placeName")]
    pub place_name: String,
    #[serde(rename = "fullAddress")]
    pub full_address: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
