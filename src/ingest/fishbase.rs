/// Fish species catalog client (FishBase REST API).
///
/// Species table endpoint:
///   GET {base}/species?limit=N[&Family=F]
///
/// Habitat flags come back as integers where FishBase uses -1 for "yes"
/// and 0 for "no". Any non-zero value is normalized to 1.

use serde::Deserialize;

use crate::config::SourceConfig;
use crate::fallback;
use crate::ingest::{build_client, get_text, query_string};
use crate::model::{FishRecord, SourceError};

// ---------------------------------------------------------------------------
// FishBase API response structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SpeciesResponse {
    #[serde(default)]
    data: Vec<SpeciesRow>,
}

#[derive(Debug, Deserialize)]
struct SpeciesRow {
    #[serde(rename = "SpecCode")]
    spec_code: Option<u32>,
    #[serde(rename = "Genus")]
    genus: Option<String>,
    #[serde(rename = "Species")]
    species: Option<String>,
    #[serde(rename = "FBname")]
    common_name: Option<String>,
    #[serde(rename = "Family")]
    family: Option<String>,
    #[serde(rename = "Saltwater")]
    saltwater: Option<i64>,
    #[serde(rename = "Fresh")]
    fresh: Option<i64>,
    #[serde(rename = "Brack")]
    brack: Option<i64>,
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct SpeciesCatalog {
    client: reqwest::blocking::Client,
    config: SourceConfig,
}

impl SpeciesCatalog {
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        let client = build_client(config.timeout())?;
        Ok(Self { client, config })
    }

    /// Builds the species query URL.
    pub fn species_url(&self, limit: usize, family: Option<&str>) -> String {
        let mut params = vec![("limit", limit.to_string())];
        if let Some(f) = family {
            params.push(("Family", f.to_string()));
        }
        format!("{}?{}", self.config.url("species"), query_string(&params))
    }

    pub fn try_fetch_species(&self, limit: usize) -> Result<Vec<FishRecord>, SourceError> {
        let body = get_text(&self.client, &self.species_url(limit, None), self.config.timeout())?;
        let mut records = parse_species_response(&body)?;
        records.truncate(limit);
        Ok(records)
    }

    pub fn try_fetch_by_family(&self, family: &str) -> Result<Vec<FishRecord>, SourceError> {
        let url = self.species_url(FAMILY_QUERY_LIMIT, Some(family));
        let body = get_text(&self.client, &url, self.config.timeout())?;
        parse_species_response(&body)
    }

    /// Up to `limit` species; falls back to the static catalog on any failure.
    pub fn fetch_species(&self, limit: usize) -> Vec<FishRecord> {
        match self.try_fetch_species(limit) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("species catalog unavailable, serving fallback: {}", e);
                fallback::fish_species_limited(limit)
            }
        }
    }

    /// Species in one family; falls back to the static catalog on any failure.
    pub fn fetch_by_family(&self, family: &str) -> Vec<FishRecord> {
        match self.try_fetch_by_family(family) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("species catalog unavailable for family {}, serving fallback: {}", family, e);
                fallback::fish_species_in_family(family)
            }
        }
    }
}

/// Upper bound on rows requested for a family listing.
const FAMILY_QUERY_LIMIT: usize = 50;

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses a species table response into `FishRecord`s.
///
/// # Errors
/// - `SourceError::ParseError`: body is not the expected JSON shape.
/// - `SourceError::NoDataAvailable`: no row carried a species code.
pub fn parse_species_response(json: &str) -> Result<Vec<FishRecord>, SourceError> {
    let response: SpeciesResponse = serde_json::from_str(json)
        .map_err(|e| SourceError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    let records: Vec<FishRecord> = response.data.into_iter().filter_map(row_to_record).collect();

    if records.is_empty() {
        return Err(SourceError::NoDataAvailable("species list was empty".to_string()));
    }

    Ok(records)
}

fn row_to_record(row: SpeciesRow) -> Option<FishRecord> {
    let id = row.spec_code?;

    let genus = non_blank(row.genus).unwrap_or_else(|| "Unknown".to_string());
    let family = non_blank(row.family).unwrap_or_else(|| "Unknown".to_string());

    let name = match (non_blank(row.common_name), non_blank(row.species)) {
        (Some(common), _) => common,
        (None, Some(epithet)) => format!("{} {}", genus, epithet),
        (None, None) => genus.clone(),
    };

    let marine = row.saltwater.map(flag).unwrap_or(1);
    let freshwater = row.fresh.map(flag).unwrap_or(0);
    let brackish = row.brack.map(flag).unwrap_or(0);

    Some(FishRecord {
        id,
        name,
        genus,
        family,
        marine,
        freshwater,
        brackish,
        icon: habitat_icon(marine, freshwater, brackish).to_string(),
    })
}

fn flag(value: i64) -> u8 {
    u8::from(value != 0)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Display glyph for a species' habitat.
pub fn habitat_icon(marine: u8, freshwater: u8, brackish: u8) -> &'static str {
    match (marine, freshwater, brackish) {
        (1, _, _) => "🐟",
        (_, 1, _) => "🐠",
        (_, _, 1) => "🐡",
        _ => "🐟",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;

    fn catalog(base: &str) -> SpeciesCatalog {
        SpeciesCatalog::new(SourceConfig::new(base)).unwrap()
    }

    #[test]
    fn test_species_url_includes_limit_and_family() {
        let url = catalog("https://fishbase.ropensci.org").species_url(50, Some("Scombridae"));
        assert_eq!(url, "https://fishbase.ropensci.org/species?limit=50&Family=Scombridae");
    }

    #[test]
    fn test_parse_maps_fishbase_fields() {
        let records = parse_species_response(fixture_fishbase_species_json()).unwrap();
        assert_eq!(records.len(), 3);

        let tuna = &records[0];
        assert_eq!(tuna.id, 147);
        assert_eq!(tuna.name, "Atlantic bluefin tuna");
        assert_eq!(tuna.genus, "Thunnus");
        assert_eq!(tuna.family, "Scombridae");
        assert_eq!((tuna.marine, tuna.freshwater, tuna.brackish), (1, 0, 1));
        assert_eq!(tuna.icon, "🐟");
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let records = parse_species_response(fixture_fishbase_species_json()).unwrap();

        // Row with no FBname, no Family, no Saltwater flag
        let sparse = &records[1];
        assert_eq!(sparse.name, "Unknown abyssalis");
        assert_eq!(sparse.genus, "Unknown");
        assert_eq!(sparse.family, "Unknown");
        assert_eq!(sparse.marine, 1, "missing marine flag is treated as marine");

        let tilapia = &records[2];
        assert_eq!((tilapia.marine, tilapia.freshwater), (0, 1));
        assert_eq!(tilapia.icon, "🐠");
    }

    #[test]
    fn test_rows_without_spec_code_are_skipped() {
        let json = r#"{"data":[{"Genus":"Ghost"},{"SpecCode":9,"Genus":"Real"}]}"#;
        let records = parse_species_response(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 9);
    }

    #[test]
    fn test_empty_data_is_no_data() {
        let result = parse_species_response(r#"{"count":0,"data":[]}"#);
        assert!(matches!(result, Err(SourceError::NoDataAvailable(_))));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = parse_species_response("<html>busy</html>");
        assert!(matches!(result, Err(SourceError::ParseError(_))));
    }

    #[test]
    fn test_habitat_icon() {
        assert_eq!(habitat_icon(1, 1, 1), "🐟");
        assert_eq!(habitat_icon(0, 1, 0), "🐠");
        assert_eq!(habitat_icon(0, 0, 1), "🐡");
    }

    #[test]
    fn test_offline_fetch_serves_fallback() {
        let catalog = catalog("http://127.0.0.1:1");
        let species = catalog.fetch_species(3);
        assert_eq!(species, fallback::fish_species_limited(3));

        let family = catalog.fetch_by_family("Lamnidae");
        assert_eq!(family.len(), 1);
        assert_eq!(family[0].name, "Great white shark");
    }
}
