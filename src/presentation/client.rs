/// Dashboard API client.
///
/// Requests `/api/dashboard`, unwraps the response envelope and, when the
/// request fails for any reason (transport, non-2xx, `success: false`),
/// produces a degraded view of the local demo dataset with an error banner.

use serde::{Deserialize, Deserializer};
use std::time::Duration;

use crate::model::{BiodiversitySummary, DashboardPayload, FishRecord, SpeciesStats, WeatherSnapshot};
use crate::presentation::{demo, DashboardView};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("dashboard API returned HTTP {0}")]
    Status(u16),

    #[error("dashboard API reported an error: {0}")]
    Api(String),

    #[error("failed to parse dashboard response: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    data: Option<SectionedPayload>,
    error: Option<String>,
}

/// Client-side view of the dashboard payload. A section that is missing or
/// `null` becomes empty, so the page renders its placeholder while the other
/// sections still show.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SectionedPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    fish_species: Vec<FishRecord>,
    #[serde(default, deserialize_with = "null_as_empty")]
    biodiversity: BiodiversitySummary,
    #[serde(default, deserialize_with = "null_as_empty")]
    ocean_weather: Vec<WeatherSnapshot>,
    #[serde(default, deserialize_with = "null_as_empty")]
    stats: SpeciesStats,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<SectionedPayload> for DashboardPayload {
    fn from(p: SectionedPayload) -> Self {
        DashboardPayload {
            fish_species: p.fish_species,
            biodiversity: p.biodiversity,
            ocean_weather: p.ocean_weather,
            stats: p.stats,
        }
    }
}

/// Parses a dashboard envelope body.
pub fn parse_envelope(body: &str) -> Result<DashboardPayload, ClientError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| ClientError::Parse(e.to_string()))?;

    if !envelope.success {
        return Err(ClientError::Api(
            envelope.error.unwrap_or_else(|| "unknown error".to_string()),
        ));
    }

    envelope
        .data
        .map(DashboardPayload::from)
        .ok_or_else(|| ClientError::Parse("envelope has no data".to_string()))
}

// ---------------------------------------------------------------------------
// Retry
// ---------------------------------------------------------------------------

/// Exponential backoff: attempt `n` (0-based) waits `base_delay * 2^n`
/// before the next try. At most `max_attempts` calls are made.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Runs `operation` until it succeeds or the policy is exhausted, calling
/// `sleep` between attempts. Returns the last error on exhaustion.
pub fn retry_with_backoff<T, E, F, S>(policy: &RetryPolicy, mut sleep: S, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    S: FnMut(Duration),
    E: std::fmt::Display,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        match operation() {
            Ok(value) => return Ok(value),
            Err(e) if attempt + 1 >= attempts => return Err(e),
            Err(e) => {
                let delay = policy.delay_for(attempt);
                log::warn!(
                    "attempt {}/{} failed: {}; retrying in {:?}",
                    attempt + 1,
                    attempts,
                    e,
                    delay
                );
                sleep(delay);
                attempt += 1;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct DashboardClient {
    http: reqwest::blocking::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl DashboardClient {
    pub fn new(base_url: &str, timeout: Duration, retry: RetryPolicy) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
        })
    }

    pub fn dashboard_url(&self) -> String {
        format!("{}/api/dashboard", self.base_url)
    }

    /// One request, no retry.
    pub fn fetch_dashboard(&self) -> Result<DashboardPayload, ClientError> {
        let response = self
            .http
            .get(self.dashboard_url())
            .header("Accept", "application/json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        parse_envelope(&response.text()?)
    }

    /// `fetch_dashboard` wrapped in the client's retry policy.
    pub fn fetch_with_retry(&self) -> Result<DashboardPayload, ClientError> {
        retry_with_backoff(&self.retry, std::thread::sleep, || self.fetch_dashboard())
    }

    /// Automatic load/poll: retries, then degrades to the demo dataset.
    pub fn load(&self) -> DashboardView {
        into_view(self.fetch_with_retry())
    }

    /// Manual refresh: a single immediate attempt, same degradation.
    pub fn refresh(&self) -> DashboardView {
        log::info!("manual refresh requested");
        into_view(self.fetch_dashboard())
    }
}

fn into_view(result: Result<DashboardPayload, ClientError>) -> DashboardView {
    match result {
        Ok(payload) => DashboardView::live(payload),
        Err(e) => {
            log::error!("dashboard load failed: {}", e);
            DashboardView::degraded(
                demo::demo_payload(),
                format!("Unable to load live data ({}). Showing demo content.", e),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
