/// Shared data types for the marine dashboard service.
///
/// Every entity here is a request-scoped value object. The same shapes are
/// produced whether a value came from a live upstream call or from a
/// fallback provider, so consumers never need to know which path ran.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Species catalog
// ---------------------------------------------------------------------------

/// One fish species from the species catalog.
///
/// Habitat flags are 0/1 integers rather than booleans to match the JSON
/// contract consumed by the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishRecord {
    pub id: u32,
    pub name: String,
    pub genus: String,
    pub family: String,
    pub marine: u8,
    pub freshwater: u8,
    pub brackish: u8,
    pub icon: String,
}

// ---------------------------------------------------------------------------
// Observation archive
// ---------------------------------------------------------------------------

/// One biodiversity occurrence record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationRecord {
    pub id: String,
    /// Scientific name, with ` (common name)` appended when one is known.
    pub species: String,
    pub common_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// `YYYY-MM-DD`, or `"Unknown"` when the upstream record had no usable date.
    pub date: String,
    pub dataset_name: String,
    pub icon: String,
}

/// Result of an occurrence query: records in upstream order plus the
/// upstream's total match count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationBatch {
    pub observations: Vec<ObservationRecord>,
    pub total: u64,
    pub source: String,
}

/// The biodiversity section of the dashboard payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiodiversitySummary {
    pub observations: Vec<ObservationRecord>,
    pub total: u64,
}

impl From<ObservationBatch> for BiodiversitySummary {
    fn from(batch: ObservationBatch) -> Self {
        BiodiversitySummary {
            observations: batch.observations,
            total: batch.total,
        }
    }
}

/// Aggregate counts from the observation archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesStats {
    pub total_species: u64,
    pub total_observations: u64,
    pub total_datasets: u64,
}

/// Geographic bounding box for area occurrence queries (decimal degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Builds a box from two corners in any order.
    pub fn new(lat_a: f64, lat_b: f64, lon_a: f64, lon_b: f64) -> Self {
        BoundingBox {
            min_lat: lat_a.min(lat_b),
            max_lat: lat_a.max(lat_b),
            min_lon: lon_a.min(lon_b),
            max_lon: lon_a.max(lon_b),
        }
    }

    /// WKT polygon in lon/lat order, closed ring.
    pub fn to_wkt(&self) -> String {
        format!(
            "POLYGON(({w} {s}, {e} {s}, {e} {n}, {w} {n}, {w} {s}))",
            w = self.min_lon,
            e = self.max_lon,
            s = self.min_lat,
            n = self.max_lat,
        )
    }
}

// ---------------------------------------------------------------------------
// Marine weather
// ---------------------------------------------------------------------------

/// A named point. Used both for the monitored location registry and as the
/// `location` block of weather snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub wave_height: Option<f64>,
    pub wave_height_unit: String,
    pub wave_period: Option<f64>,
    pub wave_period_unit: String,
    pub wind_wave_height: Option<f64>,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub temp_unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub day: usize,
    pub date: Option<String>,
    pub wave_height: Option<f64>,
}

/// Marine conditions at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
    pub daily: DailySummary,
    pub forecast: Vec<ForecastDay>,
    pub source: String,
}

/// Sea surface temperature at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureSnapshot {
    pub location: Location,
    pub sea_surface_temperature: Option<f64>,
    pub unit: String,
    pub time: Option<String>,
    pub source: String,
}

/// Classifies sea state from significant wave height in metres.
pub fn sea_condition(wave_height_m: Option<f64>) -> &'static str {
    match wave_height_m {
        None => "Unknown",
        Some(h) if h < 0.5 => "Calm",
        Some(h) if h < 1.25 => "Smooth",
        Some(h) if h < 2.5 => "Moderate",
        Some(h) if h < 4.0 => "Rough",
        Some(_) => "Very Rough",
    }
}

// ---------------------------------------------------------------------------
// Dashboard aggregate
// ---------------------------------------------------------------------------

/// Combined payload served by `/api/dashboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub fish_species: Vec<FishRecord>,
    pub biodiversity: BiodiversitySummary,
    pub ocean_weather: Vec<WeatherSnapshot>,
    pub stats: SpeciesStats,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure of a single upstream call. Never escapes an adapter's public
/// fetch functions; those log it and serve the fallback instead.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("failed to parse upstream response: {0}")]
    ParseError(String),

    #[error("upstream returned no data: {0}")]
    NoDataAvailable(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
