/// Local demo dataset for the dashboard client.
///
/// Shown, under an error banner, whenever the dashboard API cannot be
/// reached, so the page is never blank. Deliberately small and separate
/// from the server-side fallbacks in `crate::fallback`.

use crate::model::{
    CurrentConditions, DailySummary, DashboardPayload, FishRecord, ForecastDay, Location,
    BiodiversitySummary, ObservationRecord, SpeciesStats, WeatherSnapshot,
};

pub const DEMO_SOURCE: &str = "Demo data";

pub fn demo_payload() -> DashboardPayload {
    DashboardPayload {
        fish_species: vec![
            FishRecord {
                id: 1,
                name: "Blue tang".to_string(),
                genus: "Paracanthurus".to_string(),
                family: "Acanthuridae".to_string(),
                marine: 1,
                freshwater: 0,
                brackish: 0,
                icon: "🐟".to_string(),
            },
            FishRecord {
                id: 2,
                name: "Ocean sunfish".to_string(),
                genus: "Mola".to_string(),
                family: "Molidae".to_string(),
                marine: 1,
                freshwater: 0,
                brackish: 0,
                icon: "🐟".to_string(),
            },
        ],
        biodiversity: BiodiversitySummary {
            observations: vec![ObservationRecord {
                id: "demo-1".to_string(),
                species: "Orcinus orca (Killer whale)".to_string(),
                common_name: Some("Killer whale".to_string()),
                latitude: Some(48.5),
                longitude: Some(-123.1),
                date: "2024-07-04".to_string(),
                dataset_name: DEMO_SOURCE.to_string(),
                icon: "🐋".to_string(),
            }],
            total: 1,
        },
        ocean_weather: vec![WeatherSnapshot {
            location: Location {
                latitude: 36.8,
                longitude: -121.9,
                name: "Monterey Bay".to_string(),
            },
            current: CurrentConditions {
                wave_height: Some(1.5),
                wave_height_unit: "m".to_string(),
                wave_period: Some(10.0),
                wave_period_unit: "s".to_string(),
                wind_wave_height: Some(0.4),
                condition: "Moderate".to_string(),
            },
            daily: DailySummary {
                max_temp: Some(19.0),
                min_temp: Some(13.0),
                temp_unit: "°C".to_string(),
            },
            forecast: vec![
                ForecastDay { day: 0, date: None, wave_height: Some(1.5) },
                ForecastDay { day: 1, date: None, wave_height: Some(1.7) },
            ],
            source: DEMO_SOURCE.to_string(),
        }],
        stats: SpeciesStats {
            total_species: 120_000,
            total_observations: 100_000_000,
            total_datasets: 4_000,
        },
    }
}
