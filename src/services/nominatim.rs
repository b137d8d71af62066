use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

use crate::config::NominatimSettings;
use crate::core::address::concise_address;
use crate::models::{AddressResult, Coordinate};
use crate::services::ReverseGeocoder;

/// Most detailed zoom level Nominatim supports (building)
const DETAIL_ZOOM: u8 = 18;

/// Errors that can occur when reverse geocoding
#[derive(Debug, Error)]
pub enum GeocoderError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Nominatim returned status {0}")]
    ApiError(u16),

    #[error("No address found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Body of a `/reverse?format=json` response
#[derive(Debug, Deserialize)]
struct ReversePayload {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    address: HashMap<String, String>,
    #[serde(default)]
    error: Option<String>,
}

/// Nominatim reverse geocoding client
pub struct NominatimClient {
    base_url: String,
    client: Client,
}

impl NominatimClient {
    /// Create a new Nominatim client
    ///
    /// Every request carries the configured `User-Agent`.
    pub fn new(settings: &NominatimSettings) -> Result<Self, GeocoderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()?;

        Ok(Self {
            base_url: settings.endpoint.clone(),
            client,
        })
    }

    /// Look up the address of a single point
    pub async fn lookup(&self, point: Coordinate) -> Result<AddressResult, GeocoderError> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json&zoom={}&addressdetails=1",
            self.base_url.trim_end_matches('/'),
            point.lat,
            point.lon,
            DETAIL_ZOOM
        );

        tracing::debug!("Reverse geocoding ({}, {})", point.lat, point.lon);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(GeocoderError::ApiError(response.status().as_u16()));
        }

        let payload: ReversePayload = response
            .json()
            .await
            .map_err(|e| GeocoderError::InvalidResponse(format!("Failed to parse body: {}", e)))?;

        if let Some(error) = payload.error {
            return Err(GeocoderError::NotFound(error));
        }

        Ok(AddressResult {
            concise_address: concise_address(&payload.address, payload.display_name.as_deref()),
            full_address: payload.display_name.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn try_reverse_geocode(&self, point: Coordinate) -> Result<AddressResult, GeocoderError> {
        self.lookup(point).await
    }
}
