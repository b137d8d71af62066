//! Care Locator - nearby healthcare facility lookup
//!
//! Finds hospitals, clinics and doctors' offices around a coordinate using the
//! Overpass API, labels each with a Nominatim reverse geocode, and returns them
//! deduplicated and sorted by great-circle distance.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{FacilityFinder, AggregateError, distance::{haversine_km, haversine_distance}};
pub use models::{AddressResult, Coordinate, Facility, RawElement, NearbyFacilitiesRequest, NearbyFacilitiesResponse};
pub use services::{FacilityLocator, ReverseGeocoder, OverpassClient, NominatimClient};
