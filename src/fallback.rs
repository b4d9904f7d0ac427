/// Static fallback payloads, one provider per adapter.
///
/// Each function is pure: no I/O, no randomness, same output every call.
/// Adapters serve these whenever the live call fails or comes back empty,
/// so every payload here must have exactly the live-path shape.

use crate::model::{
    sea_condition, CurrentConditions, DailySummary, FishRecord, ForecastDay, Location,
    ObservationBatch, ObservationRecord, SpeciesStats, TemperatureSnapshot, WeatherSnapshot,
};

pub const FALLBACK_OBSERVATION_SOURCE: &str = "Fallback data (OBIS unavailable)";
pub const FALLBACK_WEATHER_SOURCE: &str = "Fallback data (marine weather service unavailable)";

// ---------------------------------------------------------------------------
// Species catalog
// ---------------------------------------------------------------------------

/// (id, common name, genus, family, marine, freshwater, brackish, icon)
const FALLBACK_FISH: &[(u32, &str, &str, &str, u8, u8, u8, &str)] = &[
    (147, "Atlantic bluefin tuna", "Thunnus", "Scombridae", 1, 0, 0, "🐟"),
    (6509, "Clown anemonefish", "Amphiprion", "Pomacentridae", 1, 0, 0, "🐟"),
    (751, "Great white shark", "Carcharodon", "Lamnidae", 1, 0, 0, "🐟"),
    (236, "Atlantic salmon", "Salmo", "Salmonidae", 1, 1, 1, "🐟"),
    (3271, "Spotted seahorse", "Hippocampus", "Syngnathidae", 1, 0, 1, "🐟"),
    (69, "Atlantic cod", "Gadus", "Gadidae", 1, 0, 1, "🐟"),
    (1016, "Giant manta", "Mobula", "Mobulidae", 1, 0, 0, "🐟"),
    (2, "Nile tilapia", "Oreochromis", "Cichlidae", 0, 1, 1, "🐠"),
];

/// Full fallback species list.
pub fn fish_species() -> Vec<FishRecord> {
    FALLBACK_FISH
        .iter()
        .map(|&(id, name, genus, family, marine, freshwater, brackish, icon)| FishRecord {
            id,
            name: name.to_string(),
            genus: genus.to_string(),
            family: family.to_string(),
            marine,
            freshwater,
            brackish,
            icon: icon.to_string(),
        })
        .collect()
}

/// Fallback list truncated to `limit` (never fewer than one record).
pub fn fish_species_limited(limit: usize) -> Vec<FishRecord> {
    let mut species = fish_species();
    species.truncate(limit.max(1));
    species
}

/// Fallback records for one family, or the whole list when none match.
pub fn fish_species_in_family(family: &str) -> Vec<FishRecord> {
    let all = fish_species();
    let matching: Vec<FishRecord> = all
        .iter()
        .filter(|f| f.family.eq_ignore_ascii_case(family))
        .cloned()
        .collect();

    if matching.is_empty() { all } else { matching }
}

// ---------------------------------------------------------------------------
// Observation archive
// ---------------------------------------------------------------------------

/// (id, scientific name, common name, lat, lon, date, dataset, icon)
const FALLBACK_OBSERVATIONS: &[(&str, &str, Option<&str>, f64, f64, &str, &str, &str)] = &[
    (
        "fallback-0001",
        "Tursiops truncatus",
        Some("Common bottlenose dolphin"),
        36.62,
        -121.90,
        "2024-06-14",
        "Monterey Bay Marine Mammal Survey",
        "🐋",
    ),
    (
        "fallback-0002",
        "Enhydra lutris",
        Some("Sea otter"),
        36.52,
        -121.95,
        "2024-06-02",
        "Southern Sea Otter Census",
        "🐋",
    ),
    (
        "fallback-0003",
        "Acropora millepora",
        None,
        -18.29,
        147.70,
        "2024-03-21",
        "Reef Life Survey",
        "🪸",
    ),
    (
        "fallback-0004",
        "Octopus vulgaris",
        Some("Common octopus"),
        43.21,
        -69.48,
        "2023-09-08",
        "Gulf of Maine Benthic Inventory",
        "🐙",
    ),
    (
        "fallback-0005",
        "Chelonia mydas",
        Some("Green sea turtle"),
        -18.92,
        146.95,
        "2024-01-30",
        "Reef Life Survey",
        "🐢",
    ),
];

fn observation_records() -> Vec<ObservationRecord> {
    FALLBACK_OBSERVATIONS
        .iter()
        .map(|&(id, scientific, common, lat, lon, date, dataset, icon)| ObservationRecord {
            id: id.to_string(),
            species: match common {
                Some(c) => format!("{} ({})", scientific, c),
                None => scientific.to_string(),
            },
            common_name: common.map(str::to_string),
            latitude: Some(lat),
            longitude: Some(lon),
            date: date.to_string(),
            dataset_name: dataset.to_string(),
            icon: icon.to_string(),
        })
        .collect()
}

/// Fallback occurrence batch truncated to `limit` (never fewer than one record).
pub fn observations(limit: usize) -> ObservationBatch {
    let mut records = observation_records();
    records.truncate(limit.max(1));
    ObservationBatch {
        total: records.len() as u64,
        observations: records,
        source: FALLBACK_OBSERVATION_SOURCE.to_string(),
    }
}

/// Fallback archive-wide statistics.
pub fn species_stats() -> SpeciesStats {
    SpeciesStats {
        total_species: 165_000,
        total_observations: 135_000_000,
        total_datasets: 4_900,
    }
}

// ---------------------------------------------------------------------------
// Marine weather
// ---------------------------------------------------------------------------

const FALLBACK_WAVE_HEIGHT_M: f64 = 1.2;
const FALLBACK_WAVE_PERIOD_S: f64 = 8.5;
const FALLBACK_WIND_WAVE_HEIGHT_M: f64 = 0.6;
const FALLBACK_MAX_TEMP_C: f64 = 18.5;
const FALLBACK_MIN_TEMP_C: f64 = 12.3;
const FALLBACK_SEA_SURFACE_TEMP_C: f64 = 15.8;
const FALLBACK_FORECAST_M: &[f64] = &[1.2, 1.4, 1.1, 0.9, 1.3];

/// Fallback snapshot whose location block echoes the requested point.
pub fn weather(latitude: f64, longitude: f64, name: &str) -> WeatherSnapshot {
    WeatherSnapshot {
        location: Location {
            latitude,
            longitude,
            name: name.to_string(),
        },
        current: CurrentConditions {
            wave_height: Some(FALLBACK_WAVE_HEIGHT_M),
            wave_height_unit: "m".to_string(),
            wave_period: Some(FALLBACK_WAVE_PERIOD_S),
            wave_period_unit: "s".to_string(),
            wind_wave_height: Some(FALLBACK_WIND_WAVE_HEIGHT_M),
            condition: sea_condition(Some(FALLBACK_WAVE_HEIGHT_M)).to_string(),
        },
        daily: DailySummary {
            max_temp: Some(FALLBACK_MAX_TEMP_C),
            min_temp: Some(FALLBACK_MIN_TEMP_C),
            temp_unit: "°C".to_string(),
        },
        forecast: FALLBACK_FORECAST_M
            .iter()
            .enumerate()
            .map(|(day, &h)| ForecastDay {
                day,
                date: None,
                wave_height: Some(h),
            })
            .collect(),
        source: FALLBACK_WEATHER_SOURCE.to_string(),
    }
}

/// Fallback sea surface temperature for the requested point.
pub fn water_temperature(latitude: f64, longitude: f64, name: &str) -> TemperatureSnapshot {
    TemperatureSnapshot {
        location: Location {
            latitude,
            longitude,
            name: name.to_string(),
        },
        sea_surface_temperature: Some(FALLBACK_SEA_SURFACE_TEMP_C),
        unit: "°C".to_string(),
        time: None,
        source: FALLBACK_WEATHER_SOURCE.to_string(),
    }
}
