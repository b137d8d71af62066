use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{AggregateError, FacilityFinder};
use crate::models::{
    ErrorResponse, HealthResponse, NearbyFacilitiesRequest, NearbyFacilitiesResponse,
    ReverseGeocodeRequest, ReverseGeocodeResponse,
};
use crate::services::{NominatimClient, OverpassClient, ReverseGeocoder};

/// Finder wired to the live OpenStreetMap services
pub type LiveFinder = FacilityFinder<OverpassClient, NominatimClient>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub finder: Arc<LiveFinder>,
    pub max_radius_m: u32,
}

/// Configure all facility-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/facilities/nearby", web::post().to(find_nearby))
        .route("/geocode/reverse", web::post().to(reverse_geocode));
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message,
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find nearby facilities endpoint
///
/// POST /api/v1/facilities/nearby
///
/// Request body:
/// ```json
/// {
///   "latitude": 40.0,
///   "longitude": -74.0,
///   "radiusMeters": 5000
/// }
/// ```
async fn find_nearby(
    state: web::Data<AppState>,
    req: web::Json<NearbyFacilitiesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for nearby request: {:?}", errors);
        return bad_request(errors.to_string());
    }

    let Some(user) = req.coordinate() else {
        return bad_request("Missing 'latitude' or 'longitude'".to_string());
    };

    if let Some(radius) = req.radius_meters {
        if radius > state.max_radius_m {
            return bad_request(format!("radiusMeters must not exceed {}", state.max_radius_m));
        }
    }

    tracing::info!(
        "Finding facilities near ({}, {}), radius: {:?}",
        user.lat,
        user.lon,
        req.radius_meters
    );

    match state.finder.find_nearby(user, req.radius_meters).await {
        Ok(facilities) => HttpResponse::Ok().json(NearbyFacilitiesResponse { facilities }),
        Err(AggregateError::Locator(e)) => HttpResponse::BadGateway().json(ErrorResponse {
            error: "Failed to fetch facilities".to_string(),
            message: e.to_string(),
            status_code: 502,
        }),
    }
}

/// Reverse geocode endpoint
///
/// POST /api/v1/geocode/reverse
///
/// Unlike the nearby search, a geocoding failure here is reported to the caller.
async fn reverse_geocode(
    state: web::Data<AppState>,
    req: web::Json<ReverseGeocodeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request(errors.to_string());
    }

    let Some(point) = req.coordinate() else {
        return bad_request("Missing 'latitude' or 'longitude'".to_string());
    };

    match state.finder.geocoder().try_reverse_geocode(point).await {
        Ok(address) => HttpResponse::Ok().json(ReverseGeocodeResponse {
            place_name: address.concise_address,
            full_address: address.full_address,
        }),
        Err(e) => {
            tracing::error!("Reverse geocoding failed for ({}, {}): {}", point.lat, point.lon, e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to reverse geocode".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}
