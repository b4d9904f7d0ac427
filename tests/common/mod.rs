//! Shared helpers for integration tests.
//!
//! `MockUpstream` is a tiny_http server on a random local port that answers
//! every request with whatever the test's handler returns, and records the
//! request URLs so tests can assert on the outbound queries.

#![allow(dead_code)]

use seamon_service::config::ServiceConfig;
use std::sync::{Arc, Mutex};
use std::thread;

/// Nothing listens here; connections are refused immediately.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

pub struct MockUpstream {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&str) -> (u16, String) + Send + 'static,
    {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock upstream");
        let port = server
            .server_addr()
            .to_ip()
            .expect("mock upstream has an IP address")
            .port();

        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);

        thread::spawn(move || {
            for request in server.incoming_requests() {
                let url = request.url().to_string();
                log.lock().unwrap().push(url.clone());
                let (status, body) = handler(&url);
                let response = tiny_http::Response::from_string(body).with_status_code(tiny_http::StatusCode(status));
                let _ = request.respond(response);
            }
        });

        MockUpstream {
            base_url: format!("http://127.0.0.1:{}", port),
            requests,
        }
    }

    /// Serves the sample payload matching each upstream path.
    pub fn with_samples() -> Self {
        Self::start(sample_response)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Config with every upstream pointed at `base` and short timeouts.
pub fn config_for(base: &str) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    for source in [
        &mut config.species,
        &mut config.observations,
        &mut config.weather,
        &mut config.forecast,
    ] {
        source.base_url = base.to_string();
        source.timeout_secs = 2;
    }
    config
}

pub fn offline_config() -> ServiceConfig {
    config_for(UNREACHABLE)
}

// ---------------------------------------------------------------------------
// Sample upstream payloads
// ---------------------------------------------------------------------------

pub fn sample_response(url: &str) -> (u16, String) {
    let path = url.split('?').next().unwrap_or(url);
    match path {
        "/species" => (200, SPECIES_JSON.to_string()),
        "/occurrence" => (200, OCCURRENCE_JSON.to_string()),
        "/statistics" => (200, STATISTICS_JSON.to_string()),
        "/v1/marine" if url.contains("sea_surface_temperature") => (200, SST_JSON.to_string()),
        "/v1/marine" => (200, MARINE_JSON.to_string()),
        "/v1/forecast" => (200, FORECAST_JSON.to_string()),
        _ => (404, "{}".to_string()),
    }
}

pub const SPECIES_JSON: &str = r#"{
  "count": 5,
  "data": [
    {"SpecCode": 11, "Genus": "Sardina", "Species": "pilchardus", "FBname": "European pilchard", "Family": "Clupeidae", "Saltwater": -1, "Fresh": 0, "Brack": -1},
    {"SpecCode": 12, "Genus": "Engraulis", "Species": "mordax", "FBname": "Californian anchovy", "Family": "Engraulidae", "Saltwater": -1, "Fresh": 0, "Brack": 0},
    {"SpecCode": 13, "Genus": "Sebastes", "Species": "mystinus", "FBname": "Blue rockfish", "Family": "Sebastidae", "Saltwater": -1, "Fresh": 0, "Brack": 0},
    {"SpecCode": 14, "Genus": "Oncorhynchus", "Species": "kisutch", "FBname": "Coho salmon", "Family": "Salmonidae", "Saltwater": -1, "Fresh": -1, "Brack": -1},
    {"SpecCode": 15, "Genus": "Hypsypops", "Species": "rubicundus", "FBname": "Garibaldi", "Family": "Pomacentridae", "Saltwater": -1, "Fresh": 0, "Brack": 0}
  ]
}"#;

pub const OCCURRENCE_JSON: &str = r#"{
  "total": 912,
  "results": [
    {"id": "a1", "scientificName": "Mola mola", "vernacularName": "Ocean sunfish", "decimalLatitude": 36.7, "decimalLongitude": -122.0, "eventDate": "2021-09-12T08:00:00Z", "datasetName": "Monterey Bay Aquarium Research", "class": "Actinopteri"},
    {"id": "a2", "scientificName": "Pisaster ochraceus", "decimalLatitude": 36.6, "decimalLongitude": -121.9, "eventDate": "2020-04-02", "datasetName": "MARINe Rocky Intertidal"}
  ]
}"#;

pub const STATISTICS_JSON: &str = r#"{"species": 170001, "records": 138000000, "datasets": 5100}"#;

pub const MARINE_JSON: &str = r#"{
  "latitude": 40.75,
  "longitude": -74.0,
  "hourly_units": {"wave_height": "m", "wave_period": "s", "wind_wave_height": "m"},
  "hourly": {
    "time": ["2000-01-01T00:00"],
    "wave_height": [2.71],
    "wave_period": [9.4],
    "wind_wave_height": [1.05]
  },
  "daily_units": {"wave_height_max": "m"},
  "daily": {
    "time": ["2000-01-01", "2000-01-02"],
    "wave_height_max": [3.1, 2.4]
  }
}"#;

pub const FORECAST_JSON: &str = r#"{
  "latitude": 40.71,
  "longitude": -73.99,
  "daily_units": {"temperature_2m_max": "°C", "temperature_2m_min": "°C"},
  "daily": {
    "time": ["2000-01-01"],
    "temperature_2m_max": [21.0],
    "temperature_2m_min": [15.2]
  }
}"#;

pub const SST_JSON: &str = r#"{
  "latitude": 36.8,
  "longitude": -121.9,
  "hourly_units": {"sea_surface_temperature": "°C"},
  "hourly": {"time": ["2000-01-01T00:00"], "sea_surface_temperature": [14.25]}
}"#;
