/// Live-path behaviour against a local mock upstream: records are mapped
/// from upstream payloads, and upstream failures degrade to fallbacks.

mod common;

use common::MockUpstream;
use seamon_service::endpoint::{self, Router};
use seamon_service::fallback;
use seamon_service::ingest::obis::OBIS_SOURCE;
use seamon_service::ingest::open_meteo::OPEN_METEO_SOURCE;
use seamon_service::presentation::{DashboardClient, RetryPolicy};
use serde_json::Value;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn router_for(upstream: &MockUpstream) -> Router {
    Router::from_config(&common::config_for(&upstream.base_url)).expect("router builds")
}

fn get(router: &Router, url: &str) -> Value {
    let response = router.handle("GET", url);
    assert_eq!(response.status, 200, "{} should succeed", url);
    response.json_body().cloned().expect("JSON body")
}

#[test]
fn test_species_are_mapped_and_truncated() {
    let upstream = MockUpstream::with_samples();
    let body = get(&router_for(&upstream), "/api/fish-species?limit=3");

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["id"], 11);
    assert_eq!(data[0]["name"], "European pilchard");
    assert_eq!(data[0]["marine"], 1);
    assert_eq!(data[0]["brackish"], 1);
    assert_eq!(data[0]["freshwater"], 0);

    assert!(upstream.requests()[0].starts_with("/species?limit=3"));
}

#[test]
fn test_family_query_is_forwarded() {
    let upstream = MockUpstream::with_samples();
    get(&router_for(&upstream), "/api/fish-species/Sebastidae");

    assert!(upstream.requests()[0].contains("Family=Sebastidae"));
}

#[test]
fn test_occurrences_are_mapped() {
    let upstream = MockUpstream::with_samples();
    let body = get(&router_for(&upstream), "/api/biodiversity?limit=5");

    let data = &body["data"];
    assert_eq!(data["total"], 912);
    assert_eq!(data["source"], OBIS_SOURCE);
    let first = &data["observations"][0];
    assert_eq!(first["species"], "Mola mola (Ocean sunfish)");
    assert_eq!(first["commonName"], "Ocean sunfish");
    assert_eq!(first["date"], "2021-09-12");
}

#[test]
fn test_area_query_sends_polygon() {
    let upstream = MockUpstream::with_samples();
    get(
        &router_for(&upstream),
        "/api/biodiversity/area?minLat=30&maxLat=31&minLon=-120&maxLon=-119",
    );

    let request = &upstream.requests()[0];
    assert!(request.starts_with("/occurrence?"));
    assert!(request.contains("geometry=POLYGON"));
}

#[test]
fn test_weather_snapshot_echoes_request() {
    let upstream = MockUpstream::with_samples();
    let body = get(&router_for(&upstream), "/api/ocean-weather?lat=40.7&lon=-74.0");

    let data = &body["data"];
    assert_eq!(data["source"], OPEN_METEO_SOURCE);
    assert_eq!(data["location"]["latitude"], 40.7);
    assert_eq!(data["location"]["longitude"], -74.0);
    assert_eq!(data["current"]["waveHeight"], 2.71);
    assert_eq!(data["current"]["condition"], "Rough");
    assert_eq!(data["daily"]["maxTemp"], 21.0);
    assert_eq!(data["forecast"].as_array().unwrap().len(), 2);
}

#[test]
fn test_air_temperature_comes_from_forecast_api() {
    let upstream = MockUpstream::with_samples();
    get(&router_for(&upstream), "/api/ocean-weather?lat=40.7&lon=-74.0");

    let requests = upstream.requests();
    let marine = requests.iter().find(|r| r.starts_with("/v1/marine")).unwrap();
    assert!(!marine.contains("temperature_2m"));
    let forecast = requests.iter().find(|r| r.starts_with("/v1/forecast")).unwrap();
    assert!(forecast.contains("daily=temperature_2m_max%2Ctemperature_2m_min"));
}

#[test]
fn test_forecast_failure_keeps_live_waves() {
    let upstream = MockUpstream::start(|url| {
        if url.starts_with("/v1/forecast") {
            (400, r#"{"error": true, "reason": "unavailable"}"#.to_string())
        } else {
            common::sample_response(url)
        }
    });
    let body = get(&router_for(&upstream), "/api/ocean-weather?lat=40.7&lon=-74.0");

    let data = &body["data"];
    assert_eq!(data["source"], OPEN_METEO_SOURCE);
    assert_eq!(data["current"]["waveHeight"], 2.71);
    assert!(data["daily"]["maxTemp"].is_null());
    assert!(data["daily"]["minTemp"].is_null());
}

#[test]
fn test_water_temperature_is_mapped() {
    let upstream = MockUpstream::with_samples();
    let body = get(&router_for(&upstream), "/api/water-temperature?lat=36.8&lon=-121.9");
    assert_eq!(body["data"]["seaSurfaceTemperature"], 14.25);
}

#[test]
fn test_upstream_500_degrades_to_fallback() {
    let upstream = MockUpstream::start(|_| (500, "internal error".to_string()));
    let router = router_for(&upstream);

    let body = get(&router, "/api/ocean-weather?lat=40.7&lon=-74.0");
    assert_eq!(body["data"]["source"], fallback::FALLBACK_WEATHER_SOURCE);
    assert_eq!(body["data"]["location"]["latitude"], 40.7);

    let body = get(&router, "/api/species-stats");
    assert_eq!(body["data"]["totalSpecies"], 165000);
}

#[test]
fn test_empty_upstream_results_degrade_to_fallback() {
    let upstream = MockUpstream::start(|url| {
        if url.starts_with("/occurrence") {
            (200, r#"{"total": 0, "results": []}"#.to_string())
        } else {
            (200, String::new())
        }
    });
    let router = router_for(&upstream);

    let body = get(&router, "/api/biodiversity");
    assert_eq!(body["data"]["source"], fallback::FALLBACK_OBSERVATION_SOURCE);

    let body = get(&router, "/api/fish-species?limit=2");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[test]
fn test_slow_upstream_times_out_to_fallback() {
    let upstream = MockUpstream::start(|_| {
        thread::sleep(Duration::from_secs(4));
        (200, common::STATISTICS_JSON.to_string())
    });
    let body = get(&router_for(&upstream), "/api/species-stats");
    assert_eq!(body["data"]["totalDatasets"], 4900);
}

#[test]
fn test_dashboard_client_reads_live_server() {
    let upstream = MockUpstream::with_samples();
    let router = Arc::new(router_for(&upstream));

    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind API server");
    let port = server.server_addr().to_ip().expect("API server has an IP").port();
    thread::spawn(move || endpoint::serve(server, router, 2));

    let client = DashboardClient::new(
        &format!("http://127.0.0.1:{}", port),
        Duration::from_secs(10),
        RetryPolicy::default(),
    )
    .unwrap();

    let view = client.load();
    assert!(!view.is_degraded(), "unexpected error: {:?}", view.error);
    assert_eq!(view.payload.fish_species[0].name, "European pilchard");
    assert_eq!(view.payload.stats.total_species, 170001);
    assert_eq!(view.payload.ocean_weather.len(), 3);
}
