//! App state - pure data structure; network I/O happens in the Network actor

use crate::app::activity::ActivityQuery;
use crate::messages::{ActivityView, RenderState};
use crate::models::Route;
use crate::network::client::activity_image_url;
use crate::session::SessionManager;

/// Main application state
pub struct AppState {
    pub route: Route,

    // Session (sole owner of the token store)
    pub session: SessionManager,

    // Login surface
    pub passcode: String,

    // Home surface
    pub sidebar_open: bool,
    pub activity: ActivityQuery,

    // Popups
    pub show_help: bool,

    pub backend_host: String,
    pub next_request_id: u64,
}

impl AppState {
    pub fn new(session: SessionManager, backend_host: impl Into<String>) -> Self {
        AppState {
            route: Route::Home,
            session,
            passcode: String::new(),
            sidebar_open: false,
            activity: ActivityQuery::new(),
            show_help: false,
            backend_host: backend_host.into(),
            next_request_id: 1,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let data = self.activity.data.clone().filter(|a| !a.is_empty());
        let image_url = data.as_ref().map(|a| activity_image_url(&self.backend_host, &a.id));

        RenderState {
            route: self.route,
            session: self.session.view(),
            passcode: self.passcode.clone(),
            sidebar_open: self.sidebar_open,
            activity: ActivityView {
                data,
                image_url,
                is_pending: self.activity.is_pending(),
                is_clearing: self.activity.is_clearing(),
                error: self.activity.error.clone(),
                fetched_at: self.activity.fetched_at,
            },
            backend_host: self.backend_host.clone(),
            show_help: self.show_help,
        }
    }
}
