/// Test fixtures: representative JSON payloads from the three upstream APIs.
///
/// Trimmed to the fields the parsers read, plus a few they must ignore.
/// Shapes:
///   FishBase  species:     { count, returned, data: [ { SpecCode, Genus, Species, FBname, ... } ] }
///   OBIS      occurrence:  { total, results: [ { id, scientificName, decimalLatitude, ... } ] }
///   OBIS      statistics:  { species, records, datasets, ... }
///   Open-Meteo marine:     { latitude, longitude, hourly: { time[], wave_height[], ... },
///                            hourly_units, daily: { time[], wave_height_max[] }, daily_units }
///   Open-Meteo forecast:   { daily: { time[], temperature_2m_max[], temperature_2m_min[] }, daily_units }
///
/// Open-Meteo arrays are parallel and may contain `null` entries.

/// Three species: fully populated, sparse (defaults), freshwater-only.
pub(crate) fn fixture_fishbase_species_json() -> &'static str {
    r#"{
      "count": 3,
      "returned": 3,
      "error": null,
      "data": [
        {
          "SpecCode": 147,
          "Genus": "Thunnus",
          "Species": "thynnus",
          "FBname": "Atlantic bluefin tuna",
          "Family": "Scombridae",
          "Saltwater": -1,
          "Fresh": 0,
          "Brack": -1,
          "Length": 458.0
        },
        {
          "SpecCode": 90001,
          "Genus": null,
          "Species": "abyssalis",
          "FBname": null,
          "Fresh": 0,
          "Brack": 0
        },
        {
          "SpecCode": 2,
          "Genus": "Oreochromis",
          "Species": "niloticus",
          "FBname": "Nile tilapia",
          "Family": "Cichlidae",
          "Saltwater": 0,
          "Fresh": -1,
          "Brack": 0
        }
      ]
    }"#
}

/// Two occurrences: one with vernacular name and full timestamp, one bare.
pub(crate) fn fixture_obis_occurrences_json() -> &'static str {
    r#"{
      "total": 48213,
      "results": [
        {
          "id": "00003a4b-6c9e-4f6f-9b39-8d2a0b1c7e11",
          "scientificName": "Megaptera novaeangliae",
          "vernacularName": "Humpback whale",
          "decimalLatitude": 36.8012,
          "decimalLongitude": -121.9473,
          "eventDate": "2019-08-17T10:42:00Z",
          "datasetName": "Happywhale - Humpback whale in North Pacific",
          "class": "Mammalia",
          "basisOfRecord": "HumanObservation"
        },
        {
          "id": "0004c1d2-9a55-4e0e-8c77-1f3b2a9d6e20",
          "scientificName": "Macrocystis pyrifera",
          "eventDate": "2015-06-01/2015-06-30",
          "dataset_id": "5f1c8a3e-2b7d-4c19-a5e6-0d4f2b9c8a71"
        }
      ]
    }"#
}

pub(crate) fn fixture_obis_statistics_json() -> &'static str {
    r#"{
      "species": 172404,
      "records": 139880211,
      "datasets": 5123,
      "taxa": 229031,
      "updated": "2025-11-01T00:00:00Z"
    }"#
}

/// Marine forecast, 3 hourly slots starting 2024-05-01T00:00 GMT, 3 days.
/// The 01:00 slot has a null wind wave height.
pub(crate) fn fixture_open_meteo_marine_json() -> &'static str {
    r#"{
      "latitude": 40.708332,
      "longitude": -74.04167,
      "generationtime_ms": 0.7,
      "utc_offset_seconds": 0,
      "timezone": "GMT",
      "hourly_units": { "time": "iso8601", "wave_height": "m", "wave_period": "s", "wind_wave_height": "m" },
      "hourly": {
        "time": ["2024-05-01T00:00", "2024-05-01T01:00", "2024-05-01T02:00"],
        "wave_height": [0.84, 0.92, 1.06],
        "wave_period": [6.1, 6.25, 6.4],
        "wind_wave_height": [0.3, null, 0.5]
      },
      "daily_units": { "time": "iso8601", "wave_height_max": "m" },
      "daily": {
        "time": ["2024-05-01", "2024-05-02", "2024-05-03"],
        "wave_height_max": [1.32, 2.14, null]
      }
    }"#
}

/// Surface-weather daily temperature range for one day.
pub(crate) fn fixture_open_meteo_forecast_json() -> &'static str {
    r#"{
      "latitude": 40.710335,
      "longitude": -73.99307,
      "timezone": "GMT",
      "daily_units": { "time": "iso8601", "temperature_2m_max": "°C", "temperature_2m_min": "°C" },
      "daily": {
        "time": ["2024-05-01"],
        "temperature_2m_max": [17.4],
        "temperature_2m_min": [11.8]
      }
    }"#
}

pub(crate) fn fixture_open_meteo_sst_json() -> &'static str {
    r#"{
      "latitude": 36.8,
      "longitude": -121.9,
      "timezone": "GMT",
      "hourly_units": { "time": "iso8601", "sea_surface_temperature": "°C" },
      "hourly": {
        "time": ["2024-05-01T00:00", "2024-05-01T01:00"],
        "sea_surface_temperature": [13.4, 13.6]
      }
    }"#
}

/// Valid envelope but no hourly data at all.
pub(crate) fn fixture_open_meteo_empty_json() -> &'static str {
    r#"{
      "latitude": 0.0,
      "longitude": 0.0,
      "hourly": { "time": [] }
    }"#
}
