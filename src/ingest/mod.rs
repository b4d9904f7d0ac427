/// Upstream API adapters.
///
/// One file per upstream service. Each adapter exposes `try_*` functions
/// that return `Result<_, SourceError>` and public `fetch_*` functions that
/// log any failure and hand back the matching `fallback` payload instead.

pub mod fishbase;
pub mod obis;
pub mod open_meteo;

#[cfg(test)]
pub(crate) mod fixtures;

use std::time::Duration;

use crate::config::ServiceConfig;
use crate::model::SourceError;

pub use fishbase::SpeciesCatalog;
pub use obis::ObservationArchive;
pub use open_meteo::MarineWeather;

const USER_AGENT: &str = concat!("seamon_service/", env!("CARGO_PKG_VERSION"));

/// Builds the blocking HTTP client shared by an adapter's calls.
pub fn build_client(timeout: Duration) -> Result<reqwest::blocking::Client, SourceError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Issues one GET and returns the body text.
///
/// Non-2xx statuses and blank bodies are errors so every adapter treats
/// them the same way as a transport failure.
pub(crate) fn get_text(
    client: &reqwest::blocking::Client,
    url: &str,
    timeout: Duration,
) -> Result<String, SourceError> {
    log::debug!("GET {}", url);

    let response = client
        .get(url)
        .header("Accept", "application/json")
        .timeout(timeout)
        .send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status(status.as_u16()));
    }

    let body = response.text()?;
    if body.trim().is_empty() {
        return Err(SourceError::NoDataAvailable("empty response body".to_string()));
    }

    Ok(body)
}

/// Formats a query parameter list as `k=v&k=v`, percent-encoding values.
pub(crate) fn query_string(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// The three adapters, configured and ready to share across threads.
#[derive(Clone)]
pub struct Sources {
    pub species: SpeciesCatalog,
    pub archive: ObservationArchive,
    pub weather: MarineWeather,
}

impl Sources {
    pub fn from_config(config: &ServiceConfig) -> Result<Self, SourceError> {
        Ok(Sources {
            species: SpeciesCatalog::new(config.species.clone())?,
            archive: ObservationArchive::new(config.observations.clone())?,
            weather: MarineWeather::new(config.weather.clone(), config.forecast.clone())?,
        })
    }
}
