/// Combined dashboard assembly.
///
/// Runs the four dashboard fetches (species, observations, multi-location
/// weather, statistics) concurrently and joins them into one
/// `DashboardPayload`. Adapters absorb their own failures, so the only way
/// the join fails is a worker dying before it reports.

use std::sync::mpsc;
use threadpool::ThreadPool;

use crate::config::DashboardSettings;
use crate::ingest::Sources;
use crate::model::{
    DashboardPayload, FishRecord, Location, ObservationBatch, SpeciesStats, WeatherSnapshot,
};

#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("dashboard section '{0}' did not complete")]
    SectionLost(&'static str),
}

/// One completed dashboard section.
enum Section {
    Fish(Vec<FishRecord>),
    Biodiversity(ObservationBatch),
    Weather(Vec<WeatherSnapshot>),
    Stats(SpeciesStats),
}

/// Fetches every dashboard section concurrently and waits for all of them.
pub fn assemble_dashboard(
    sources: &Sources,
    settings: &DashboardSettings,
    locations: &[Location],
) -> Result<DashboardPayload, AggregateError> {
    let pool = ThreadPool::new(4);
    let (tx, rx) = mpsc::channel::<Section>();

    {
        let tx = tx.clone();
        let species = sources.species.clone();
        let count = settings.fish_count;
        pool.execute(move || {
            let _ = tx.send(Section::Fish(species.fetch_species(count)));
        });
    }
    {
        let tx = tx.clone();
        let archive = sources.archive.clone();
        let count = settings.observation_count;
        pool.execute(move || {
            let _ = tx.send(Section::Biodiversity(archive.fetch_observations(count)));
        });
    }
    {
        let tx = tx.clone();
        let weather = sources.weather.clone();
        let locations = locations.to_vec();
        pool.execute(move || {
            let _ = tx.send(Section::Weather(weather.fetch_multiple_locations(&locations)));
        });
    }
    {
        let tx = tx.clone();
        let archive = sources.archive.clone();
        pool.execute(move || {
            let _ = tx.send(Section::Stats(archive.fetch_stats()));
        });
    }
    drop(tx);

    let mut fish = None;
    let mut biodiversity = None;
    let mut weather = None;
    let mut stats = None;

    for section in rx.iter() {
        match section {
            Section::Fish(v) => fish = Some(v),
            Section::Biodiversity(v) => biodiversity = Some(v),
            Section::Weather(v) => weather = Some(v),
            Section::Stats(v) => stats = Some(v),
        }
    }

    Ok(DashboardPayload {
        fish_species: fish.ok_or(AggregateError::SectionLost("fishSpecies"))?,
        biodiversity: biodiversity
            .ok_or(AggregateError::SectionLost("biodiversity"))?
            .into(),
        ocean_weather: weather.ok_or(AggregateError::SectionLost("oceanWeather"))?,
        stats: stats.ok_or(AggregateError::SectionLost("stats"))?,
    })
}
