use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
///
/// Every section has defaults, so the service starts without any config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub overpass: OverpassSettings,
    #[serde(default)]
    pub nominatim: NominatimSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

/// Point-of-interest source (Overpass API)
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassSettings {
    #[serde(default = "default_overpass_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_overpass_timeout")]
    pub timeout_secs: u64,
    /// Values matched against the `amenity` and `healthcare` tags
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

impl Default for OverpassSettings {
    fn default() -> Self {
        Self {
            endpoint: default_overpass_endpoint(),
            timeout_secs: default_overpass_timeout(),
            categories: default_categories(),
        }
    }
}

fn default_overpass_endpoint() -> String { "https://overpass-api.de/api/interpreter".to_string() }
fn default_overpass_timeout() -> u64 { 25 }
fn default_categories() -> Vec<String> {
    ["hospital", "clinic", "doctors", "doctor", "centre"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

/// Reverse geocoding source (Nominatim)
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimSettings {
    #[serde(default = "default_nominatim_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_nominatim_timeout")]
    pub timeout_secs: u64,
    /// Nominatim's usage policy requires an identifying User-Agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Upper bound on concurrent reverse geocode calls per request
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for NominatimSettings {
    fn default() -> Self {
        Self {
            endpoint: default_nominatim_endpoint(),
            timeout_secs: default_nominatim_timeout(),
            user_agent: default_user_agent(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

fn default_nominatim_endpoint() -> String { "https://nominatim.openstreetmap.org".to_string() }
fn default_nominatim_timeout() -> u64 { 10 }
fn default_user_agent() -> String {
    format!("care-locator/{}", env!("CARGO_PKG_VERSION"))
}
fn default_max_concurrency() -> usize { 2 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_radius_m")]
    pub default_radius_m: u32,
    #[serde(default = "default_max_radius_m")]
    pub max_radius_m: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_radius_m: default_radius_m(),
            max_radius_m: default_max_radius_m(),
        }
    }
}

fn default_radius_m() -> u32 { 5000 }
fn default_max_radius_m() -> u32 { 50_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local override file (config/local.toml)
    /// 4. Environment variables (prefixed with CARE__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CARE__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CARE")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("overpass.categories")
        .try_parsing(true)
}
