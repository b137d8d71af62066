use futures::stream::{self, StreamExt};
use thiserror::Error;

use crate::core::{
    dedup::{dedup_elements, LocatedElement},
    distance::haversine_km,
};
use crate::models::{Coordinate, Facility, UNNAMED_FACILITY};
use crate::services::{FacilityLocator, LocatorError, ReverseGeocoder};

/// Upper bound on concurrent geocode calls, to stay polite to public providers
pub const MAX_GEOCODE_CONCURRENCY: usize = 4;

/// Errors that abort a nearby search
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("facility lookup failed: {0}")]
    Locator(#[from] LocatorError),
}

/// Nearby facility search orchestrator
///
/// # Pipeline Stages
/// 1. Query the locator once
/// 2. Resolve coordinates and drop duplicates
/// 3. Reverse geocode and measure each survivor
/// 4. Sort by distance
pub struct FacilityFinder<L, G> {
    locator: L,
    geocoder: G,
    default_radius_m: u32,
    geocode_concurrency: usize,
}

impl<L, G> FacilityFinder<L, G>
where
    L: FacilityLocator,
    G: ReverseGeocoder,
{
    pub fn new(locator: L, geocoder: G, default_radius_m: u32, geocode_concurrency: usize) -> Self {
        Self {
            locator,
            geocoder,
            default_radius_m,
            geocode_concurrency: geocode_concurrency.clamp(1, MAX_GEOCODE_CONCURRENCY),
        }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Find facilities around `user`, nearest first
    ///
    /// A failed locator query is an error; a failed geocode only replaces that
    /// facility's address. An empty list means nothing was found in range.
    pub async fn find_nearby(
        &self,
        user: Coordinate,
        radius_meters: Option<u32>,
    ) -> Result<Vec<Facility>, AggregateError> {
        let radius = radius_meters.unwrap_or(self.default_radius_m);

        let elements = self.locator.locate(user, radius).await.map_err(|e| {
            tracing::error!("Facility lookup around ({}, {}) failed: {}", user.lat, user.lon, e);
            e
        })?;
        let total_elements = elements.len();

        let located = dedup_elements(elements);

        // buffered() keeps locator order, so the stable sort below breaks ties the same way
        let mut facilities: Vec<Facility> = stream::iter(located)
            .map(|located| self.build_facility(user, located))
            .buffered(self.geocode_concurrency)
            .collect()
            .await;

        sort_by_distance(&mut facilities);

        tracing::info!(
            "Found {} facilities within {}m of ({}, {}) from {} elements",
            facilities.len(),
            radius,
            user.lat,
            user.lon,
            total_elements
        );

        Ok(facilities)
    }

    async fn build_facility(&self, user: Coordinate, located: LocatedElement) -> Facility {
        let LocatedElement { coordinate, element } = located;
        let address = self.geocoder.reverse_geocode(coordinate).await;

        Facility {
            name: element.name().unwrap_or(UNNAMED_FACILITY).to_string(),
            lat: coordinate.lat,
            lon: coordinate.lon,
            distance_km: haversine_km(user, coordinate),
            address: address.concise_address,
        }
    }
}

/// Sort facilities nearest first, keeping input order for equal distances
pub fn sort_by_distance(facilities: &mut [Facility]) {
    facilities.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
