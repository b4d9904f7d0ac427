/// Presentation layer: turns a dashboard payload into a page.
///
/// ```text
/// presentation
/// ├── render — HTML for the four dashboard sections and the full page
/// ├── client — fetches /api/dashboard with backoff retry
/// └── demo   — local dataset shown when the API cannot be reached
/// ```

pub mod client;
pub mod demo;
pub mod render;

use chrono::{DateTime, Utc};

use crate::model::DashboardPayload;

pub use client::{retry_with_backoff, ClientError, DashboardClient, RetryPolicy};
pub use render::render_page;

/// What the page shows: a payload plus an optional error banner.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub payload: DashboardPayload,
    pub error: Option<String>,
    pub rendered_at: DateTime<Utc>,
}

impl DashboardView {
    /// A view of data fetched successfully.
    pub fn live(payload: DashboardPayload) -> Self {
        Self {
            payload,
            error: None,
            rendered_at: Utc::now(),
        }
    }

    /// A view that shows `error` above substitute content.
    pub fn degraded(payload: DashboardPayload, error: String) -> Self {
        Self {
            payload,
            error: Some(error),
            rendered_at: Utc::now(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}
