/// seamon_service: marine science data aggregation service.
///
/// Fetches fish species, biodiversity observations and marine weather from
/// three public APIs, reshapes them into one JSON contract and serves them
/// to the dashboard front end. Every upstream call has a static fallback.
///
/// # Module structure
///
/// ```text
/// seamon_service
/// ├── model        — shared data types (FishRecord, WeatherSnapshot, SourceError, …)
/// ├── config       — service configuration loader (seamon.toml + SEAMON_* env)
/// ├── locations    — registry of the fixed dashboard locations
/// ├── fallback     — static payloads served when an upstream fails
/// ├── ingest
/// │   ├── fishbase   — species catalog API client
/// │   ├── obis       — OBIS occurrence + statistics API client
/// │   ├── open_meteo — marine weather API client
/// │   └── fixtures (test only) — representative API response payloads
/// ├── aggregate    — concurrent assembly of the combined dashboard payload
/// ├── endpoint     — HTTP routes, response envelopes, server loop
/// └── presentation
///     ├── render — HTML dashboard sections
///     ├── client — dashboard API client with backoff retry
///     └── demo   — local dataset for when the API is unreachable
/// ```

/// Public modules
pub mod aggregate;
pub mod config;
pub mod endpoint;
pub mod fallback;
pub mod ingest;
pub mod locations;
pub mod model;
pub mod presentation;
