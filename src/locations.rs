/// Registry of the marine locations shown on the dashboard.
///
/// These are the built-in defaults for `[[locations]]` in `seamon.toml`.
/// A config file may replace the list; everything downstream works from
/// `ServiceConfig::locations` rather than reading this registry directly.

use crate::model::Location;

/// Metadata for a monitored coastal location.
pub struct Site {
    /// Display name used in weather cards.
    pub name: &'static str,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
}

/// Default locations, one per ocean basin of interest.
pub static LOCATION_REGISTRY: &[Site] = &[
    Site {
        name: "Monterey Bay",
        latitude: 36.8,
        longitude: -121.9,
    },
    Site {
        name: "Gulf of Maine",
        latitude: 43.0,
        longitude: -69.0,
    },
    Site {
        name: "Great Barrier Reef",
        latitude: -18.3,
        longitude: 147.7,
    },
];

/// Default coordinates for single-location weather queries (San Francisco offshore).
pub const DEFAULT_LATITUDE: f64 = 37.5;
pub const DEFAULT_LONGITUDE: f64 = -122.4;

/// Name given to ad-hoc coordinate queries.
pub const REQUESTED_LOCATION_NAME: &str = "Requested Location";

impl Site {
    pub fn to_location(&self) -> Location {
        Location {
            latitude: self.latitude,
            longitude: self.longitude,
            name: self.name.to_string(),
        }
    }
}

/// Returns the default registry as owned locations.
pub fn default_locations() -> Vec<Location> {
    LOCATION_REGISTRY.iter().map(Site::to_location).collect()
}
