// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AddressResult, Coordinate, ElementCenter, Facility, RawElement, UNNAMED_FACILITY};
pub use requests::{NearbyFacilitiesRequest, ReverseGeocodeRequest};
pub use responses::{ErrorResponse, HealthResponse, NearbyFacilitiesResponse, ReverseGeocodeResponse};
