// Core algorithm exports
pub mod address;
pub mod dedup;
pub mod distance;
pub mod finder;

pub use address::{concise_address, first_present};
pub use dedup::{dedup_elements, DedupKey, LocatedElement};
pub use distance::{haversine_distance, haversine_km, round_km};
pub use finder::{sort_by_distance, AggregateError, FacilityFinder};
