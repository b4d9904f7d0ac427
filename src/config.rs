/// Service configuration loader - parses seamon.toml
///
/// Keeps upstream endpoints, timeouts and the monitored location list out
/// of the code so deployments (and tests) can point adapters elsewhere
/// without recompiling.
///
/// Precedence, highest first:
/// 1. `SEAMON_*` environment variables (a `.env` file is loaded first)
/// 2. `seamon.toml` (or the path given with `--config`)
/// 3. Built-in defaults

use serde::{Deserialize, Deserializer};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::locations;
use crate::model::Location;

pub const DEFAULT_CONFIG_PATH: &str = "seamon.toml";

pub const DEFAULT_SPECIES_URL: &str = "https://fishbase.ropensci.org";
pub const DEFAULT_OBIS_URL: &str = "https://api.obis.org/v3";
pub const DEFAULT_WEATHER_URL: &str = "https://marine-api.open-meteo.com";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";

/// Upstream calls give up after this many seconds unless configured otherwise.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Request handler threads.
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            workers: 4,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Connection settings for one upstream API.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// A `[species]`-style table as written; absent keys keep the source's default.
#[derive(Debug, Deserialize)]
struct SourceTable {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

fn source_with_default<'de, D>(deserializer: D, default_url: &str) -> Result<SourceConfig, D::Error>
where
    D: Deserializer<'de>,
{
    let table = SourceTable::deserialize(deserializer)?;
    let mut source = SourceConfig::new(default_url);
    if let Some(url) = table.base_url {
        source.base_url = url;
    }
    if let Some(secs) = table.timeout_secs {
        source.timeout_secs = secs;
    }
    Ok(source)
}

fn species_source<'de, D: Deserializer<'de>>(d: D) -> Result<SourceConfig, D::Error> {
    source_with_default(d, DEFAULT_SPECIES_URL)
}

fn observations_source<'de, D: Deserializer<'de>>(d: D) -> Result<SourceConfig, D::Error> {
    source_with_default(d, DEFAULT_OBIS_URL)
}

fn weather_source<'de, D: Deserializer<'de>>(d: D) -> Result<SourceConfig, D::Error> {
    source_with_default(d, DEFAULT_WEATHER_URL)
}

fn forecast_source<'de, D: Deserializer<'de>>(d: D) -> Result<SourceConfig, D::Error> {
    source_with_default(d, DEFAULT_FORECAST_URL)
}

impl SourceConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Joins `path` onto the base URL with exactly one slash between them.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Record counts requested for the combined dashboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub fish_count: usize,
    pub observation_count: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            fish_count: 6,
            observation_count: 10,
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    #[serde(deserialize_with = "species_source")]
    pub species: SourceConfig,
    #[serde(deserialize_with = "observations_source")]
    pub observations: SourceConfig,
    /// Marine endpoint: waves and sea surface temperature.
    #[serde(deserialize_with = "weather_source")]
    pub weather: SourceConfig,
    /// Surface-weather endpoint: daily air temperature.
    #[serde(deserialize_with = "forecast_source")]
    pub forecast: SourceConfig,
    pub dashboard: DashboardSettings,
    pub locations: Vec<Location>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            species: SourceConfig::new(DEFAULT_SPECIES_URL),
            observations: SourceConfig::new(DEFAULT_OBIS_URL),
            weather: SourceConfig::new(DEFAULT_WEATHER_URL),
            forecast: SourceConfig::new(DEFAULT_FORECAST_URL),
            dashboard: DashboardSettings::default(),
            locations: locations::default_locations(),
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from file and environment.
    ///
    /// With `path = None` the default `seamon.toml` is used if it exists and
    /// built-in defaults otherwise. An explicit path that cannot be read is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML file without applying environment overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `SEAMON_*` overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SEAMON_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SEAMON_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("SEAMON_PORT is not a port: {}", port)))?;
        }
        if let Some(workers) = lookup("SEAMON_WORKERS") {
            self.server.workers = workers.parse().map_err(|_| {
                ConfigError::Invalid(format!("SEAMON_WORKERS is not a number: {}", workers))
            })?;
        }
        if let Some(url) = lookup("SEAMON_SPECIES_URL") {
            self.species.base_url = url;
        }
        if let Some(url) = lookup("SEAMON_OBIS_URL") {
            self.observations.base_url = url;
        }
        if let Some(url) = lookup("SEAMON_WEATHER_URL") {
            self.weather.base_url = url;
        }
        if let Some(url) = lookup("SEAMON_FORECAST_URL") {
            self.forecast.base_url = url;
        }
        if let Some(secs) = lookup("SEAMON_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                ConfigError::Invalid(format!("SEAMON_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            for source in [
                &mut self.species,
                &mut self.observations,
                &mut self.weather,
                &mut self.forecast,
            ] {
                source.timeout_secs = secs;
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locations.is_empty() {
            return Err(ConfigError::Invalid("at least one [[locations]] entry is required".into()));
        }
        if self.server.workers == 0 {
            return Err(ConfigError::Invalid("server.workers must be at least 1".into()));
        }
        for (name, source) in [
            ("species", &self.species),
            ("observations", &self.observations),
            ("weather", &self.weather),
            ("forecast", &self.forecast),
        ] {
            if source.base_url.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{}.base_url must not be empty", name)));
            }
            if source.timeout_secs == 0 {
                return Err(ConfigError::Invalid(format!("{}.timeout_secs must be at least 1", name)));
            }
        }
        for location in &self.locations {
            if !(-90.0..=90.0).contains(&location.latitude)
                || !(-180.0..=180.0).contains(&location.longitude)
            {
                return Err(ConfigError::Invalid(format!(
                    "location '{}' has out-of-range coordinates",
                    location.name
                )));
            }
        }
        Ok(())
    }
}
