/// HTTP endpoint for the marine dashboard
///
/// Serves the JSON API consumed by the dashboard front end, plus the
/// rendered dashboard page itself.
///
/// Endpoints:
/// - GET /                          - Rendered dashboard page
/// - GET /api/health                - Service health check
/// - GET /api/fish-species          - Species list (?limit=10)
/// - GET /api/fish-species/{family} - Species in one family
/// - GET /api/biodiversity          - Recent occurrences (?limit=20)
/// - GET /api/biodiversity/area     - Occurrences in a box (?minLat&maxLat&minLon&maxLon&limit)
/// - GET /api/species-stats         - Archive-wide counts
/// - GET /api/ocean-weather         - Marine conditions (?lat=37.5&lon=-122.4)
/// - GET /api/water-temperature     - Sea surface temperature (?lat&lon)
/// - GET /api/ocean-data-locations  - Conditions at the configured locations
/// - GET /api/dashboard             - Everything above, combined
///
/// Every JSON response is an envelope: `{success, data | fields, timestamp}`.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::io::Cursor;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use threadpool::ThreadPool;

use crate::aggregate::{self, AggregateError};
use crate::config::{DashboardSettings, ServerConfig, ServiceConfig};
use crate::ingest::Sources;
use crate::locations::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE, REQUESTED_LOCATION_NAME};
use crate::model::{BoundingBox, Location};
use crate::presentation::{render_page, DashboardView};

pub const DEFAULT_SPECIES_LIMIT: usize = 10;
pub const DEFAULT_OBSERVATION_LIMIT: usize = 20;

/// Monterey Bay, used when an area query gives no bounds.
const DEFAULT_AREA: (f64, f64, f64, f64) = (36.5, 37.0, -122.5, -121.5);

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A handler failure; reported as a 500 envelope.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("failed to start HTTP server on {addr}: {message}")]
    Bind { addr: String, message: String },
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Html(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Body,
}

impl ApiResponse {
    fn json(status: u16, value: Value) -> Self {
        Self { status, body: Body::Json(value) }
    }

    /// The JSON body, if this is a JSON response.
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            Body::Json(v) => Some(v),
            Body::Html(_) => None,
        }
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `{success: true, ..fields, timestamp}`
fn success(fields: Map<String, Value>) -> ApiResponse {
    let mut body = Map::new();
    body.insert("success".into(), Value::Bool(true));
    body.extend(fields);
    body.insert("timestamp".into(), Value::String(timestamp()));
    ApiResponse::json(200, Value::Object(body))
}

fn success_data<T: Serialize>(data: &T) -> Result<ApiResponse, RouteError> {
    let mut fields = Map::new();
    fields.insert("data".into(), serde_json::to_value(data)?);
    Ok(success(fields))
}

fn route_failure(error: &RouteError) -> ApiResponse {
    ApiResponse::json(
        500,
        json!({
            "success": false,
            "error": error.to_string(),
            "timestamp": timestamp(),
        }),
    )
}

fn not_found(path: &str) -> ApiResponse {
    ApiResponse::json(
        404,
        json!({
            "success": false,
            "error": "Not found",
            "path": path,
        }),
    )
}

fn internal_error(message: &str) -> ApiResponse {
    ApiResponse::json(
        500,
        json!({
            "success": false,
            "error": "Internal server error",
            "message": message,
            "timestamp": timestamp(),
        }),
    )
}

// ---------------------------------------------------------------------------
// Query parsing
// ---------------------------------------------------------------------------

type Query = HashMap<String, String>;

/// Splits a request URL into its raw path and decoded query parameters.
fn split_url(url: &str) -> (&str, Query) {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    let params = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(k), decode(v))
        })
        .collect();
    (path, params)
}

/// Query component: `+` is a space.
fn decode(s: &str) -> String {
    decode_path(&s.replace('+', " "))
}

/// Path segment: `+` is literal.
fn decode_path(s: &str) -> String {
    urlencoding::decode(s)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| s.to_string())
}

/// Positive integer parameter, or `default` when absent, non-numeric or zero.
fn query_limit(query: &Query, key: &str, default: usize) -> usize {
    query
        .get(key)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(default)
}

/// Finite number within `[min, max]`, or `default`.
fn query_coord(query: &Query, key: &str, default: f64, min: f64, max: f64) -> f64 {
    query
        .get(key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= min && *v <= max)
        .unwrap_or(default)
}

fn query_location(query: &Query) -> Location {
    Location {
        latitude: query_coord(query, "lat", DEFAULT_LATITUDE, -90.0, 90.0),
        longitude: query_coord(query, "lon", DEFAULT_LONGITUDE, -180.0, 180.0),
        name: REQUESTED_LOCATION_NAME.to_string(),
    }
}

fn query_area(query: &Query) -> BoundingBox {
    let (min_lat, max_lat, min_lon, max_lon) = DEFAULT_AREA;
    BoundingBox::new(
        query_coord(query, "minLat", min_lat, -90.0, 90.0),
        query_coord(query, "maxLat", max_lat, -90.0, 90.0),
        query_coord(query, "minLon", min_lon, -180.0, 180.0),
        query_coord(query, "maxLon", max_lon, -180.0, 180.0),
    )
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Maps request paths to adapter calls. Holds only immutable, shareable
/// state, so one instance serves every worker thread.
pub struct Router {
    sources: Sources,
    settings: DashboardSettings,
    locations: Vec<Location>,
}

impl Router {
    pub fn new(sources: Sources, config: &ServiceConfig) -> Self {
        Self {
            sources,
            settings: config.dashboard.clone(),
            locations: config.locations.clone(),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, crate::model::SourceError> {
        Ok(Self::new(Sources::from_config(config)?, config))
    }

    /// Handles one request. Panics inside a handler become a 500 envelope.
    pub fn handle(&self, method: &str, url: &str) -> ApiResponse {
        match panic::catch_unwind(AssertUnwindSafe(|| self.route(method, url))) {
            Ok(response) => response,
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unexpected failure".to_string());
                log::error!("handler panicked on {} {}: {}", method, url, message);
                internal_error(&message)
            }
        }
    }

    fn route(&self, method: &str, url: &str) -> ApiResponse {
        let (raw_path, query) = split_url(url);

        if !method.eq_ignore_ascii_case("GET") {
            return not_found(raw_path);
        }

        let path = match raw_path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };

        let result = match path {
            "/" | "/index.html" => self.dashboard_page(),
            "/api/health" => Ok(self.health()),
            "/api/fish-species" => self.fish_species(&query),
            "/api/biodiversity" => self.biodiversity(&query),
            "/api/biodiversity/area" => self.biodiversity_area(&query),
            "/api/species-stats" => success_data(&self.sources.archive.fetch_stats()),
            "/api/ocean-weather" => {
                success_data(&self.sources.weather.fetch_ocean_weather(&query_location(&query)))
            }
            "/api/water-temperature" => {
                success_data(&self.sources.weather.fetch_water_temperature(&query_location(&query)))
            }
            "/api/ocean-data-locations" => {
                success_data(&self.sources.weather.fetch_multiple_locations(&self.locations))
            }
            "/api/dashboard" => self.dashboard(),
            p => match p.strip_prefix("/api/fish-species/") {
                Some(family) if !family.contains('/') => self.fish_family(&decode_path(family)),
                _ => return not_found(raw_path),
            },
        };

        result.unwrap_or_else(|e| {
            log::error!("{} failed: {}", path, e);
            route_failure(&e)
        })
    }

    fn health(&self) -> ApiResponse {
        ApiResponse::json(
            200,
            json!({
                "status": "ok",
                "message": "Marine data API is running",
                "timestamp": timestamp(),
            }),
        )
    }

    fn fish_species(&self, query: &Query) -> Result<ApiResponse, RouteError> {
        let limit = query_limit(query, "limit", DEFAULT_SPECIES_LIMIT);
        let species = self.sources.species.fetch_species(limit);

        let mut fields = Map::new();
        fields.insert("count".into(), json!(species.len()));
        fields.insert("data".into(), serde_json::to_value(&species)?);
        Ok(success(fields))
    }

    fn fish_family(&self, family: &str) -> Result<ApiResponse, RouteError> {
        let species = self.sources.species.fetch_by_family(family);

        let mut fields = Map::new();
        fields.insert("family".into(), json!(family));
        fields.insert("data".into(), serde_json::to_value(&species)?);
        Ok(success(fields))
    }

    fn biodiversity(&self, query: &Query) -> Result<ApiResponse, RouteError> {
        let limit = query_limit(query, "limit", DEFAULT_OBSERVATION_LIMIT);
        success_data(&self.sources.archive.fetch_observations(limit))
    }

    fn biodiversity_area(&self, query: &Query) -> Result<ApiResponse, RouteError> {
        let limit = query_limit(query, "limit", DEFAULT_OBSERVATION_LIMIT);
        let area = query_area(query);
        success_data(&self.sources.archive.fetch_observations_in_area(&area, limit))
    }

    fn dashboard(&self) -> Result<ApiResponse, RouteError> {
        let payload = aggregate::assemble_dashboard(&self.sources, &self.settings, &self.locations)?;
        success_data(&payload)
    }

    fn dashboard_page(&self) -> Result<ApiResponse, RouteError> {
        let payload = aggregate::assemble_dashboard(&self.sources, &self.settings, &self.locations)?;
        Ok(ApiResponse {
            status: 200,
            body: Body::Html(render_page(&DashboardView::live(payload))),
        })
    }
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Binds the configured address and serves requests until the listener closes.
pub fn start_endpoint_server(config: &ServerConfig, router: Router) -> Result<(), EndpointError> {
    let addr = config.bind_addr();
    let server = tiny_http::Server::http(&addr).map_err(|e| EndpointError::Bind {
        addr: addr.clone(),
        message: e.to_string(),
    })?;

    println!("📡 HTTP endpoint listening on http://{}", addr);
    println!("   GET /api/dashboard - Combined dashboard payload");
    println!("   GET /api/health - Service health check\n");

    serve(server, Arc::new(router), config.workers);
    Ok(())
}

/// Dispatches each incoming request to a worker thread.
pub fn serve(server: tiny_http::Server, router: Arc<Router>, workers: usize) {
    let pool = ThreadPool::new(workers.max(1));

    for request in server.incoming_requests() {
        let router = Arc::clone(&router);
        pool.execute(move || {
            let method = request.method().to_string();
            let url = request.url().to_string();

            let response = router.handle(&method, &url);
            log::info!("{} {} -> {}", method, url, response.status);

            if let Err(e) = request.respond(to_http_response(response)) {
                log::warn!("failed to send response: {}", e);
            }
        });
    }
}

fn to_http_response(response: ApiResponse) -> tiny_http::Response<Cursor<Vec<u8>>> {
    let (bytes, content_type) = match response.body {
        Body::Json(value) => (
            serde_json::to_vec_pretty(&value).unwrap_or_default(),
            "application/json",
        ),
        Body::Html(html) => (html.into_bytes(), "text/html; charset=utf-8"),
    };

    let mut http = tiny_http::Response::from_data(bytes)
        .with_status_code(tiny_http::StatusCode(response.status));

    for (name, value) in [
        ("Content-Type", content_type),
        ("Access-Control-Allow-Origin", "*"),
    ] {
        if let Ok(header) = tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            http = http.with_header(header);
        }
    }

    http
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
