//! Command handlers - business logic for processing UI events and network responses

use crate::app::{ActivityQuery, AppState};
use crate::constants::PASSCODE_LEN;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::Route;
use crate::session::{is_valid_passcode, SessionStatus, Transition};

impl AppState {
    // ========================
    // Startup
    // ========================

    /// Verify a persisted token, if there is one
    pub fn startup(&mut self) -> Option<NetworkCommand> {
        let id = self.next_id();
        let token = self.session.restore(id)?;
        Some(NetworkCommand::VerifyToken { id, token })
    }

    // ========================
    // Navigation
    // ========================

    /// Move to `route`, applying the login redirect guard
    pub fn navigate(&mut self, route: Route) {
        let route = if route == Route::Login && self.session.status() == SessionStatus::Authenticated
        {
            Route::Home
        } else {
            route
        };

        if route == Route::Login && self.route != Route::Login {
            self.passcode.clear();
        }
        if route != self.route {
            tracing::debug!(from = self.route.as_str(), to = route.as_str(), "Navigate");
        }
        self.route = route;
    }

    pub fn open_login(&mut self) {
        self.navigate(Route::Login);
    }

    pub fn close_login(&mut self) {
        self.navigate(Route::Home);
    }

    // ========================
    // Login surface
    // ========================

    /// Append a digit; submits the passcode once six digits are entered
    pub fn passcode_char(&mut self, c: char) -> Option<NetworkCommand> {
        if !c.is_ascii_digit() || self.passcode.len() >= PASSCODE_LEN {
            return None;
        }
        self.passcode.push(c);
        self.submit_passcode()
    }

    pub fn passcode_backspace(&mut self) {
        self.passcode.pop();
    }

    fn submit_passcode(&mut self) -> Option<NetworkCommand> {
        if !is_valid_passcode(&self.passcode) || self.session.is_issuing() {
            return None;
        }
        let id = self.next_id();
        self.session.begin_issue(id);
        Some(NetworkCommand::IssueToken {
            id,
            passcode: self.passcode.clone(),
        })
    }

    // ========================
    // Session
    // ========================

    pub fn logout(&mut self) {
        tracing::info!("Logging out");
        self.session.logout();
        // The next session starts from an empty cache and ignores in-flight replies
        self.activity = ActivityQuery::new();
        self.sidebar_open = false;
        self.navigate(Route::Login);
    }

    // ========================
    // Activity widget
    // ========================

    /// The widget is mounted only on the guarded home surface
    fn activity_mounted(&self) -> bool {
        self.route == Route::Home && self.session.status() == SessionStatus::Authenticated
    }

    pub fn refresh_activity(&mut self) -> Option<NetworkCommand> {
        if !self.activity_mounted() {
            return None;
        }
        self.activity.invalidate();
        self.poll_queries()
    }

    pub fn clear_activity(&mut self) -> Option<NetworkCommand> {
        if !self.activity_mounted() {
            return None;
        }
        let token = self.session.token()?.to_string();
        let id = self.next_id();
        if !self.activity.begin_clear(id) {
            return None;
        }
        Some(NetworkCommand::ClearActivity { id, token })
    }

    /// Start any fetch the mounted widget needs
    pub fn poll_queries(&mut self) -> Option<NetworkCommand> {
        if !self.activity_mounted() || !self.activity.needs_fetch() {
            return None;
        }
        let id = self.next_id();
        if !self.activity.begin_fetch(id) {
            return None;
        }
        Some(NetworkCommand::FetchActivity {
            id,
            token: self.session.token().map(str::to_string),
        })
    }

    // ========================
    // Layout / popups
    // ========================

    pub fn toggle_sidebar(&mut self) {
        if self.activity_mounted() {
            self.sidebar_open = !self.sidebar_open;
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Network responses
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        match response {
            NetworkResponse::TokenIssued { id, result } => {
                let transition = self.session.complete_issue(id, result);
                self.after_transition(transition);
            }
            NetworkResponse::TokenVerified { id, result } => {
                let transition = self.session.complete_verify(id, result);
                self.after_transition(transition);
            }
            NetworkResponse::ActivityFetched { id, result } => {
                self.activity.complete_fetch(id, result);
            }
            NetworkResponse::ActivityCleared { id, result } => {
                self.activity.complete_clear(id, result);
            }
        }
    }

    fn after_transition(&mut self, transition: Transition) {
        if transition == Transition::Authenticated && self.route == Route::Login {
            self.navigate(Route::Home);
        }
    }
}
