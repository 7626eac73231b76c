//! Render state - data structure sent from App layer to UI for rendering

use chrono::{DateTime, Utc};

use crate::models::{Activity, Route};
use crate::session::SessionView;

/// Everything the activity widget draws
#[derive(Debug, Clone, Default)]
pub struct ActivityView {
    pub data: Option<Activity>,
    /// Rendered image link for `data`, if any
    pub image_url: Option<String>,
    pub is_pending: bool,
    pub is_clearing: bool,
    pub error: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub route: Route,
    pub session: SessionView,

    // Login surface
    pub passcode: String,

    // Home surface
    pub sidebar_open: bool,
    pub activity: ActivityView,
    pub backend_host: String,

    // Popups
    pub show_help: bool,
}
