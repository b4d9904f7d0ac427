/// HTML rendering of the dashboard.
///
/// Four independent sections (species cards, statistics tiles, observation
/// list, weather cards). A section with no input renders a "No data
/// available" placeholder instead of failing the page. Numbers are turned
/// into display text only here: two decimals, or `N/A` when absent.
///
/// Every displayed value sits in an element carrying a `data-field`
/// attribute so the page can be read back mechanically.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::model::{FishRecord, ObservationRecord, SpeciesStats, WeatherSnapshot};
use crate::presentation::DashboardView;

pub const NO_DATA_PLACEHOLDER: &str = r#"<p class="no-data">No data available</p>"#;

const PAGE_STYLE: &str = "body{font-family:sans-serif;margin:2rem;background:#f2f7fb;color:#0b2540}\
section{margin-bottom:2rem}.cards{display:flex;flex-wrap:wrap;gap:1rem}\
.card,.tile{background:#fff;border-radius:8px;padding:1rem;min-width:12rem}\
.error-banner{background:#fde2e1;color:#8a1c1c;padding:.75rem;border-radius:6px}\
.no-data{color:#6b7c93;font-style:italic}";

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Fixed two-decimal display text, `N/A` when absent.
pub fn format_measure(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        _ => "N/A".to_string(),
    }
}

/// Counts with thousands separators (`135000000` → `135,000,000`).
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn field(tag: &str, name: &str, value: &str) -> String {
    format!(
        r#"<{tag} data-field="{name}">{value}</{tag}>"#,
        tag = tag,
        name = name,
        value = encode_text(value)
    )
}

fn habitat_label(fish: &FishRecord) -> String {
    let mut habitats = Vec::new();
    if fish.marine == 1 {
        habitats.push("Marine");
    }
    if fish.freshwater == 1 {
        habitats.push("Freshwater");
    }
    if fish.brackish == 1 {
        habitats.push("Brackish");
    }
    if habitats.is_empty() {
        "Unknown".to_string()
    } else {
        habitats.join(" · ")
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

pub fn render_error_banner(message: &str) -> String {
    format!(
        r#"<div class="error-banner" role="alert">{}</div>"#,
        encode_text(message)
    )
}

pub fn render_species_section(species: &[FishRecord]) -> String {
    let body = if species.is_empty() {
        NO_DATA_PLACEHOLDER.to_string()
    } else {
        let cards: Vec<String> = species
            .iter()
            .map(|fish| {
                format!(
                    r#"<article class="card species" data-id="{id}"><span class="icon">{icon}</span>{name}{genus}{family}{habitat}</article>"#,
                    id = fish.id,
                    icon = encode_text(&fish.icon),
                    name = field("h3", "name", &fish.name),
                    genus = field("p", "genus", &fish.genus),
                    family = field("p", "family", &fish.family),
                    habitat = field("p", "habitat", &habitat_label(fish)),
                )
            })
            .collect();
        format!(r#"<div class="cards">{}</div>"#, cards.concat())
    };
    format!(r#"<section id="species"><h2>Fish Species</h2>{}</section>"#, body)
}

pub fn render_stats_section(stats: &SpeciesStats) -> String {
    let body = if stats.total_species == 0 && stats.total_observations == 0 && stats.total_datasets == 0 {
        NO_DATA_PLACEHOLDER.to_string()
    } else {
        let tiles = [
            ("totalSpecies", "Species", stats.total_species),
            ("totalObservations", "Observations", stats.total_observations),
            ("totalDatasets", "Datasets", stats.total_datasets),
        ]
        .iter()
        .map(|(name, label, value)| {
            format!(
                r#"<div class="tile">{}<p class="label">{}</p></div>"#,
                field("p", name, &format_count(*value)),
                label
            )
        })
        .collect::<Vec<_>>()
        .concat();
        format!(r#"<div class="cards">{}</div>"#, tiles)
    };
    format!(r#"<section id="stats"><h2>Ocean Biodiversity Statistics</h2>{}</section>"#, body)
}

pub fn render_observations_section(observations: &[ObservationRecord]) -> String {
    let body = if observations.is_empty() {
        NO_DATA_PLACEHOLDER.to_string()
    } else {
        let items: Vec<String> = observations
            .iter()
            .map(|obs| {
                let position = match (obs.latitude, obs.longitude) {
                    (Some(lat), Some(lon)) => format!("{}, {}", format_measure(Some(lat)), format_measure(Some(lon))),
                    _ => "N/A".to_string(),
                };
                format!(
                    r#"<li class="observation" data-id="{id}"><span class="icon">{icon}</span>{species}{date}{dataset}{position}</li>"#,
                    id = encode_double_quoted_attribute(&obs.id),
                    icon = encode_text(&obs.icon),
                    species = field("strong", "species", &obs.species),
                    date = field("span", "date", &obs.date),
                    dataset = field("span", "datasetName", &obs.dataset_name),
                    position = field("span", "position", &position),
                )
            })
            .collect();
        format!(r#"<ul class="observations">{}</ul>"#, items.concat())
    };
    format!(r#"<section id="observations"><h2>Recent Observations</h2>{}</section>"#, body)
}

pub fn render_weather_section(snapshots: &[WeatherSnapshot]) -> String {
    let body = if snapshots.is_empty() {
        NO_DATA_PLACEHOLDER.to_string()
    } else {
        let cards: Vec<String> = snapshots
            .iter()
            .map(|w| {
                let forecast: String = w
                    .forecast
                    .iter()
                    .map(|d| {
                        format!(
                            r#"<li data-day="{}">{}</li>"#,
                            d.day,
                            encode_text(&format!("Day {}: {} {}", d.day + 1, format_measure(d.wave_height), w.current.wave_height_unit))
                        )
                    })
                    .collect();
                format!(
                    r#"<article class="card weather">{name}{condition}<p>Waves {wave} {wave_unit} every {period} {period_unit}</p><p>Wind waves {wind} {wave_unit}</p><p>Air {min} – {max} {temp_unit}</p><ul class="forecast">{forecast}</ul></article>"#,
                    name = field("h3", "locationName", &w.location.name),
                    condition = field("p", "condition", &w.current.condition),
                    wave = field("span", "waveHeight", &format_measure(w.current.wave_height)),
                    wave_unit = encode_text(&w.current.wave_height_unit),
                    period = field("span", "wavePeriod", &format_measure(w.current.wave_period)),
                    period_unit = encode_text(&w.current.wave_period_unit),
                    wind = field("span", "windWaveHeight", &format_measure(w.current.wind_wave_height)),
                    min = field("span", "minTemp", &format_measure(w.daily.min_temp)),
                    max = field("span", "maxTemp", &format_measure(w.daily.max_temp)),
                    temp_unit = encode_text(&w.daily.temp_unit),
                    forecast = forecast,
                )
            })
            .collect();
        format!(r#"<div class="cards">{}</div>"#, cards.concat())
    };
    format!(r#"<section id="weather"><h2>Ocean Conditions</h2>{}</section>"#, body)
}

/// Full HTML document for a dashboard view.
pub fn render_page(view: &DashboardView) -> String {
    let banner = view
        .error
        .as_deref()
        .map(render_error_banner)
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>Marine Science Dashboard</title><style>{style}</style></head>\
<body><header><h1>🌊 Marine Science Dashboard</h1><p class=\"updated\">Updated {updated}</p></header>{banner}{species}{stats}{observations}{weather}</body></html>\n",
        style = PAGE_STYLE,
        updated = encode_text(&view.rendered_at.to_rfc3339()),
        banner = banner,
        species = render_species_section(&view.payload.fish_species),
        stats = render_stats_section(&view.payload.stats),
        observations = render_observations_section(&view.payload.biodiversity.observations),
        weather = render_weather_section(&view.payload.ocean_weather),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
