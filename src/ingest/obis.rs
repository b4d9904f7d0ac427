/// OBIS (Ocean Biodiversity Information System) API client
///
/// Occurrence search and archive-wide statistics from the OBIS v3 API.
///
/// API Documentation: https://api.obis.org/
/// Endpoints used:
///   GET {base}/occurrence?size=N&offset=O[&geometry=WKT]
///   GET {base}/statistics

use chrono::NaiveDate;
use serde::Deserialize;

use crate::config::SourceConfig;
use crate::fallback;
use crate::ingest::{build_client, get_text, query_string};
use crate::model::{BoundingBox, ObservationBatch, ObservationRecord, SourceError, SpeciesStats};

pub const OBIS_SOURCE: &str = "OBIS (Ocean Biodiversity Information System)";

// ============================================================================
// OBIS API Response Structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct OccurrenceResponse {
    total: Option<u64>,
    #[serde(default)]
    results: Vec<Occurrence>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Occurrence {
    id: Option<String>,
    scientific_name: Option<String>,
    vernacular_name: Option<String>,
    decimal_latitude: Option<f64>,
    decimal_longitude: Option<f64>,
    event_date: Option<String>,
    dataset_name: Option<String>,
    class: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatisticsResponse {
    #[serde(default)]
    species: u64,
    #[serde(default)]
    records: u64,
    #[serde(default)]
    datasets: u64,
}

// ============================================================================
// API Client
// ============================================================================

#[derive(Clone)]
pub struct ObservationArchive {
    client: reqwest::blocking::Client,
    config: SourceConfig,
}

impl ObservationArchive {
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        let client = build_client(config.timeout())?;
        Ok(Self { client, config })
    }

    pub fn occurrence_url(&self, limit: usize, offset: usize, area: Option<&BoundingBox>) -> String {
        let mut params = vec![("size", limit.to_string()), ("offset", offset.to_string())];
        if let Some(bbox) = area {
            params.push(("geometry", bbox.to_wkt()));
        }
        format!("{}?{}", self.config.url("occurrence"), query_string(&params))
    }

    pub fn try_fetch_observations(
        &self,
        limit: usize,
        offset: usize,
        area: Option<&BoundingBox>,
    ) -> Result<ObservationBatch, SourceError> {
        let url = self.occurrence_url(limit, offset, area);
        let body = get_text(&self.client, &url, self.config.timeout())?;
        let mut batch = parse_occurrence_response(&body)?;
        batch.observations.truncate(limit);
        Ok(batch)
    }

    pub fn try_fetch_stats(&self) -> Result<SpeciesStats, SourceError> {
        let body = get_text(&self.client, &self.config.url("statistics"), self.config.timeout())?;
        parse_statistics_response(&body)
    }

    /// Most recent `limit` occurrences archive-wide.
    pub fn fetch_observations(&self, limit: usize) -> ObservationBatch {
        match self.try_fetch_observations(limit, 0, None) {
            Ok(batch) => batch,
            Err(e) => {
                log::warn!("OBIS occurrences unavailable, serving fallback: {}", e);
                fallback::observations(limit)
            }
        }
    }

    /// Occurrences inside a bounding box.
    pub fn fetch_observations_in_area(&self, area: &BoundingBox, limit: usize) -> ObservationBatch {
        match self.try_fetch_observations(limit, 0, Some(area)) {
            Ok(batch) => batch,
            Err(e) => {
                log::warn!("OBIS area query unavailable, serving fallback: {}", e);
                fallback::observations(limit)
            }
        }
    }

    pub fn fetch_stats(&self) -> SpeciesStats {
        match self.try_fetch_stats() {
            Ok(stats) => stats,
            Err(e) => {
                log::warn!("OBIS statistics unavailable, serving fallback: {}", e);
                fallback::species_stats()
            }
        }
    }
}

// ============================================================================
// Response parsing
// ============================================================================

/// Parses an occurrence search response, preserving upstream order.
pub fn parse_occurrence_response(json: &str) -> Result<ObservationBatch, SourceError> {
    let response: OccurrenceResponse = serde_json::from_str(json)
        .map_err(|e| SourceError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    if response.results.is_empty() {
        return Err(SourceError::NoDataAvailable("no occurrence results".to_string()));
    }

    let observations: Vec<ObservationRecord> = response
        .results
        .into_iter()
        .enumerate()
        .map(|(i, occ)| occurrence_to_record(i, occ))
        .collect();

    Ok(ObservationBatch {
        total: response.total.unwrap_or(observations.len() as u64),
        observations,
        source: OBIS_SOURCE.to_string(),
    })
}

/// Parses the statistics endpoint. All-zero counts are treated as no data.
pub fn parse_statistics_response(json: &str) -> Result<SpeciesStats, SourceError> {
    let response: StatisticsResponse = serde_json::from_str(json)
        .map_err(|e| SourceError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    if response.species == 0 && response.records == 0 && response.datasets == 0 {
        return Err(SourceError::NoDataAvailable("statistics were all zero".to_string()));
    }

    Ok(SpeciesStats {
        total_species: response.species,
        total_observations: response.records,
        total_datasets: response.datasets,
    })
}

fn occurrence_to_record(index: usize, occ: Occurrence) -> ObservationRecord {
    let scientific = occ
        .scientific_name
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "Unidentified organism".to_string());
    let common_name = occ.vernacular_name.filter(|s| !s.trim().is_empty());

    let species = match &common_name {
        Some(common) => format!("{} ({})", scientific, common),
        None => scientific,
    };

    ObservationRecord {
        id: occ
            .id
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("obis-{}", index)),
        species,
        common_name,
        latitude: occ.decimal_latitude,
        longitude: occ.decimal_longitude,
        date: occ
            .event_date
            .as_deref()
            .and_then(event_date_to_iso)
            .unwrap_or_else(|| "Unknown".to_string()),
        dataset_name: occ
            .dataset_name
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "OBIS".to_string()),
        icon: taxon_icon(occ.class.as_deref()).to_string(),
    }
}

/// Extracts `YYYY-MM-DD` from an OBIS eventDate, which may be a full
/// timestamp or a `start/end` interval.
fn event_date_to_iso(event_date: &str) -> Option<String> {
    let head = event_date.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// Display glyph for a taxonomic class.
pub fn taxon_icon(class: Option<&str>) -> &'static str {
    match class.map(str::to_ascii_lowercase).as_deref() {
        Some("actinopteri" | "actinopterygii" | "elasmobranchii" | "chondrichthyes") => "🐟",
        Some("mammalia") => "🐋",
        Some("anthozoa") => "🪸",
        Some("cephalopoda") => "🐙",
        Some("malacostraca") => "🦀",
        Some("aves") => "🐦",
        Some("reptilia" | "testudines") => "🐢",
        _ => "🌊",
    }
}

// ============================================================================
// Tests
// ============================================================================
