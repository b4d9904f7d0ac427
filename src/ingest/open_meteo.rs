/// Open-Meteo Marine Weather API client
///
/// Wave conditions, a short wave-height forecast and sea surface
/// temperature for arbitrary coordinates. The marine API carries no air
/// temperature, so the daily min/max comes from the surface-weather
/// forecast API.
///
/// API Documentation: https://open-meteo.com/en/docs/marine-weather-api
/// Endpoints:
/// - GET {marine}/v1/marine?latitude=..&longitude=..&hourly=..&daily=..
/// - GET {forecast}/v1/forecast?latitude=..&longitude=..&daily=temperature_2m_max,temperature_2m_min

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::Deserialize;
use std::sync::mpsc;
use threadpool::ThreadPool;

use crate::config::SourceConfig;
use crate::fallback;
use crate::ingest::{build_client, get_text, query_string};
use crate::model::{
    sea_condition, CurrentConditions, DailySummary, ForecastDay, Location, SourceError,
    TemperatureSnapshot, WeatherSnapshot,
};

pub const OPEN_METEO_SOURCE: &str = "Open-Meteo Marine Weather API";

const MARINE_PATH: &str = "v1/marine";
const MARINE_HOURLY: &str = "wave_height,wave_period,wind_wave_height";
const MARINE_DAILY: &str = "wave_height_max";
const SST_HOURLY: &str = "sea_surface_temperature";
const FORECAST_PATH: &str = "v1/forecast";
const FORECAST_DAILY: &str = "temperature_2m_max,temperature_2m_min";
const DEFAULT_TEMP_UNIT: &str = "°C";
const FORECAST_DAYS: usize = 5;

// ============================================================================
// Open-Meteo Response Structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct MarineResponse {
    hourly: Option<Hourly>,
    #[serde(default)]
    hourly_units: HourlyUnits,
    daily: Option<Daily>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyTemperature>,
    #[serde(default)]
    daily_units: DailyUnits,
}

/// Parallel arrays indexed by `time`.
#[derive(Debug, Deserialize)]
struct Hourly {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    wave_height: Vec<Option<f64>>,
    #[serde(default)]
    wave_period: Vec<Option<f64>>,
    #[serde(default)]
    wind_wave_height: Vec<Option<f64>>,
    #[serde(default)]
    sea_surface_temperature: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct HourlyUnits {
    wave_height: Option<String>,
    wave_period: Option<String>,
    sea_surface_temperature: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Daily {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    wave_height_max: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct DailyTemperature {
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct DailyUnits {
    temperature_2m_max: Option<String>,
}

// ============================================================================
// API Client
// ============================================================================

#[derive(Clone)]
pub struct MarineWeather {
    client: reqwest::blocking::Client,
    config: SourceConfig,
    forecast: SourceConfig,
}

impl MarineWeather {
    /// `config` points at the marine API, `forecast` at the surface-weather API.
    pub fn new(config: SourceConfig, forecast: SourceConfig) -> Result<Self, SourceError> {
        let client = build_client(config.timeout().max(forecast.timeout()))?;
        Ok(Self {
            client,
            config,
            forecast,
        })
    }

    pub fn marine_url(&self, latitude: f64, longitude: f64) -> String {
        let params = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("hourly", MARINE_HOURLY.to_string()),
            ("daily", MARINE_DAILY.to_string()),
            ("timezone", "GMT".to_string()),
            ("forecast_days", FORECAST_DAYS.to_string()),
        ];
        format!("{}?{}", self.config.url(MARINE_PATH), query_string(&params))
    }

    pub fn sst_url(&self, latitude: f64, longitude: f64) -> String {
        let params = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("hourly", SST_HOURLY.to_string()),
            ("timezone", "GMT".to_string()),
            ("forecast_days", "1".to_string()),
        ];
        format!("{}?{}", self.config.url(MARINE_PATH), query_string(&params))
    }

    pub fn forecast_url(&self, latitude: f64, longitude: f64) -> String {
        let params = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("daily", FORECAST_DAILY.to_string()),
            ("timezone", "GMT".to_string()),
            ("forecast_days", "1".to_string()),
        ];
        format!("{}?{}", self.forecast.url(FORECAST_PATH), query_string(&params))
    }

    /// Marine conditions plus today's air temperature.
    ///
    /// Only the marine call decides success. When the temperature call fails
    /// the snapshot stays live with `daily.maxTemp`/`minTemp` absent.
    pub fn try_fetch_ocean_weather(&self, location: &Location) -> Result<WeatherSnapshot, SourceError> {
        let url = self.marine_url(location.latitude, location.longitude);
        let body = get_text(&self.client, &url, self.config.timeout())?;
        let mut snapshot = parse_marine_response(&body, location, Utc::now())?;

        match self.try_fetch_daily_temperature(location) {
            Ok(daily) => snapshot.daily = daily,
            Err(e) => log::warn!(
                "air temperature unavailable for ({}, {}): {}",
                location.latitude,
                location.longitude,
                e
            ),
        }
        Ok(snapshot)
    }

    pub fn try_fetch_daily_temperature(&self, location: &Location) -> Result<DailySummary, SourceError> {
        let url = self.forecast_url(location.latitude, location.longitude);
        let body = get_text(&self.client, &url, self.forecast.timeout())?;
        parse_forecast_response(&body)
    }

    pub fn try_fetch_water_temperature(
        &self,
        location: &Location,
    ) -> Result<TemperatureSnapshot, SourceError> {
        let url = self.sst_url(location.latitude, location.longitude);
        let body = get_text(&self.client, &url, self.config.timeout())?;
        parse_sst_response(&body, location, Utc::now())
    }

    /// Conditions at one location; the fallback echoes the requested point.
    pub fn fetch_ocean_weather(&self, location: &Location) -> WeatherSnapshot {
        match self.try_fetch_ocean_weather(location) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!(
                    "marine weather unavailable for ({}, {}), serving fallback: {}",
                    location.latitude,
                    location.longitude,
                    e
                );
                fallback::weather(location.latitude, location.longitude, &location.name)
            }
        }
    }

    pub fn fetch_water_temperature(&self, location: &Location) -> TemperatureSnapshot {
        match self.try_fetch_water_temperature(location) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!(
                    "sea surface temperature unavailable for ({}, {}), serving fallback: {}",
                    location.latitude,
                    location.longitude,
                    e
                );
                fallback::water_temperature(location.latitude, location.longitude, &location.name)
            }
        }
    }

    /// One snapshot per location, in input order. Each location is fetched
    /// on its own worker; a slot whose worker never reports back gets that
    /// location's fallback.
    pub fn fetch_multiple_locations(&self, locations: &[Location]) -> Vec<WeatherSnapshot> {
        if locations.is_empty() {
            return Vec::new();
        }

        let pool = ThreadPool::new(locations.len());
        let (tx, rx) = mpsc::channel();

        for (index, location) in locations.iter().cloned().enumerate() {
            let tx = tx.clone();
            let weather = self.clone();
            pool.execute(move || {
                let snapshot = weather.fetch_ocean_weather(&location);
                let _ = tx.send((index, snapshot));
            });
        }
        drop(tx);

        let mut slots: Vec<Option<WeatherSnapshot>> = vec![None; locations.len()];
        for (index, snapshot) in rx.iter() {
            slots[index] = Some(snapshot);
        }

        slots
            .into_iter()
            .zip(locations)
            .map(|(slot, location)| {
                slot.unwrap_or_else(|| {
                    log::error!("weather worker for {} exited without a result", location.name);
                    fallback::weather(location.latitude, location.longitude, &location.name)
                })
            })
            .collect()
    }
}

// ============================================================================
// Response parsing
// ============================================================================

/// Parses a marine forecast into a snapshot for `location`.
///
/// `now` selects the hourly slot reported as current conditions. The daily
/// summary has no temperatures; those come from `parse_forecast_response`.
pub fn parse_marine_response(
    json: &str,
    location: &Location,
    now: DateTime<Utc>,
) -> Result<WeatherSnapshot, SourceError> {
    let response: MarineResponse = serde_json::from_str(json)
        .map_err(|e| SourceError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    let hourly = response
        .hourly
        .filter(|h| !h.time.is_empty())
        .ok_or_else(|| SourceError::NoDataAvailable("no hourly marine data".to_string()))?;

    let i = current_hour_index(&hourly.time, now);
    let wave_height = value_at(&hourly.wave_height, i);

    let current = CurrentConditions {
        wave_height,
        wave_height_unit: response.hourly_units.wave_height.unwrap_or_else(|| "m".to_string()),
        wave_period: value_at(&hourly.wave_period, i),
        wave_period_unit: response.hourly_units.wave_period.unwrap_or_else(|| "s".to_string()),
        wind_wave_height: value_at(&hourly.wind_wave_height, i),
        condition: sea_condition(wave_height).to_string(),
    };

    let forecast = match response.daily {
        Some(daily) => daily
            .wave_height_max
            .iter()
            .take(FORECAST_DAYS)
            .enumerate()
            .map(|(day, h)| ForecastDay {
                day,
                date: daily.time.get(day).cloned(),
                wave_height: *h,
            })
            .collect(),
        None => Vec::new(),
    };

    let daily = DailySummary {
        max_temp: None,
        min_temp: None,
        temp_unit: DEFAULT_TEMP_UNIT.to_string(),
    };

    Ok(WeatherSnapshot {
        location: location.clone(),
        current,
        daily,
        forecast,
        source: OPEN_METEO_SOURCE.to_string(),
    })
}

/// Parses today's air temperature range from a surface-weather forecast.
pub fn parse_forecast_response(json: &str) -> Result<DailySummary, SourceError> {
    let response: ForecastResponse = serde_json::from_str(json)
        .map_err(|e| SourceError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    let daily = response
        .daily
        .ok_or_else(|| SourceError::NoDataAvailable("no daily temperature data".to_string()))?;

    let summary = DailySummary {
        max_temp: value_at(&daily.temperature_2m_max, 0),
        min_temp: value_at(&daily.temperature_2m_min, 0),
        temp_unit: response
            .daily_units
            .temperature_2m_max
            .unwrap_or_else(|| DEFAULT_TEMP_UNIT.to_string()),
    };

    if summary.max_temp.is_none() && summary.min_temp.is_none() {
        return Err(SourceError::NoDataAvailable("daily temperatures were null".to_string()));
    }
    Ok(summary)
}

/// Parses an hourly sea surface temperature response.
pub fn parse_sst_response(
    json: &str,
    location: &Location,
    now: DateTime<Utc>,
) -> Result<TemperatureSnapshot, SourceError> {
    let response: MarineResponse = serde_json::from_str(json)
        .map_err(|e| SourceError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    let hourly = response
        .hourly
        .filter(|h| !h.time.is_empty() && h.sea_surface_temperature.iter().any(Option::is_some))
        .ok_or_else(|| SourceError::NoDataAvailable("no sea surface temperature data".to_string()))?;

    let i = current_hour_index(&hourly.time, now);

    Ok(TemperatureSnapshot {
        location: location.clone(),
        sea_surface_temperature: value_at(&hourly.sea_surface_temperature, i),
        unit: response
            .hourly_units
            .sea_surface_temperature
            .unwrap_or_else(|| DEFAULT_TEMP_UNIT.to_string()),
        time: hourly.time.get(i).cloned(),
        source: OPEN_METEO_SOURCE.to_string(),
    })
}

/// Index of the first hourly slot at or after the start of `now`'s hour,
/// or 0 when every slot is in the past or none parse.
fn current_hour_index(times: &[String], now: DateTime<Utc>) -> usize {
    let hour_start = now
        .naive_utc()
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0));

    let Some(hour_start) = hour_start else {
        return 0;
    };

    times
        .iter()
        .position(|t| {
            NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M")
                .map(|slot| slot >= hour_start)
                .unwrap_or(false)
        })
        .unwrap_or(0)
}

fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

// ============================================================================
// Tests
// ============================================================================
