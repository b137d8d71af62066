// Service exports
pub mod nominatim;
pub mod overpass;

pub use nominatim::{GeocoderError, NominatimClient};
pub use overpass::{LocatorError, OverpassClient};

use async_trait::async_trait;

use crate::models::{AddressResult, Coordinate, RawElement};

/// Source of facility candidates around a point
#[async_trait]
pub trait FacilityLocator: Send + Sync {
    async fn locate(
        &self,
        center: Coordinate,
        radius_meters: u32,
    ) -> Result<Vec<RawElement>, LocatorError>;
}

/// Source of human-readable addresses for coordinates
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn try_reverse_geocode(&self, point: Coordinate) -> Result<AddressResult, GeocoderError>;

    /// Look up an address, substituting [`AddressResult::unavailable`] on failure
    async fn reverse_geocode(&self, point: Coordinate) -> AddressResult {
        match self.try_reverse_geocode(point).await {
            Ok(address) => address,
            Err(e) => {
                tracing::warn!("Reverse geocoding failed for ({}, {}): {}", point.lat, point.lon, e);
                AddressResult::unavailable()
            }
        }
    }
}
