use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Coordinate;

/// Request to find facilities near a point
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyFacilitiesRequest {
    #[validate(required, range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(required, range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[validate(range(min = 1))]
    #[serde(alias = "radius_meters", rename = "radiusMeters", default)]
    pub radius_meters: Option<u32>,
}

impl NearbyFacilitiesRequest {
    /// Coordinate of the request, once validated
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.latitude?, self.longitude?))
    }
}

/// Request to describe a single point
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReverseGeocodeRequest {
    #[validate(required, range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(required, range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl ReverseGeocodeRequest {
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.latitude?, self.longitude?))
    }
}
