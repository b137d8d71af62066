use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name given to facilities whose source element carries no `name` tag
pub const UNNAMED_FACILITY: &str = "Unnamed Facility";

/// A WGS84 point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Center point Overpass attaches to ways and relations when queried with `out center`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementCenter {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

/// A facility candidate as returned by the Overpass API
///
/// Nodes carry `lat`/`lon` directly; ways and relations only carry a `center`.
/// Either may be missing or partial in real data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawElement {
    #[serde(rename = "type", default)]
    pub element_type: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<ElementCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl RawElement {
    /// Resolve the element's position, preferring its own lat/lon over the center
    ///
    /// Each component falls back independently, matching how Overpass payloads
    /// are read elsewhere. Returns `None` if either component is still missing.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let center = self.center.unwrap_or_default();
        let lat = self.lat.or(center.lat)?;
        let lon = self.lon.or(center.lon)?;
        Some(Coordinate::new(lat, lon))
    }

    pub fn name(&self) -> Option<&str> {
        self.tags
            .get("name")
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
    }
}

/// Human-readable description of a coordinate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressResult {
    pub concise_address: String,
    pub full_address: String,
}

impl AddressResult {
    pub const UNAVAILABLE: &'static str = "Address unavailable";
    pub const FAILED: &'static str = "Reverse Geocoding Failed";

    /// Placeholder used when a reverse geocode call fails
    pub fn unavailable() -> Self {
        Self {
            concise_address: Self::UNAVAILABLE.to_string(),
            full_address: Self::FAILED.to_string(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        self.concise_address == Self::UNAVAILABLE && self.full_address == Self::FAILED
    }
}

/// A deduplicated, geocoded facility near the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    pub address: String,
}
