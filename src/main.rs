use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use care_locator::config::Settings;
use care_locator::core::FacilityFinder;
use care_locator::routes::{self, AppState};
use care_locator::services::{NominatimClient, OverpassClient};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(settings: &Settings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn io_error(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        io_error(format!("Configuration error: {}", e))
    })?;

    init_logging(&settings);

    info!("Starting Care Locator service...");

    let overpass = OverpassClient::new(&settings.overpass).map_err(|e| {
        error!("Failed to create Overpass client: {}", e);
        io_error(e.to_string())
    })?;

    let nominatim = NominatimClient::new(&settings.nominatim).map_err(|e| {
        error!("Failed to create Nominatim client: {}", e);
        io_error(e.to_string())
    })?;

    info!(
        "Upstreams: overpass={} ({}s), nominatim={} ({}s)",
        settings.overpass.endpoint,
        settings.overpass.timeout_secs,
        settings.nominatim.endpoint,
        settings.nominatim.timeout_secs
    );

    let finder = FacilityFinder::new(
        overpass,
        nominatim,
        settings.search.default_radius_m,
        settings.nominatim.max_concurrency,
    );

    let app_state = AppState {
        finder: Arc::new(finder),
        max_radius_m: settings.search.max_radius_m,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
