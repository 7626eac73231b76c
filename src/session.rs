//! Session manager - owns the auth token and its lifecycle
//!
//! The manager is the only writer of the token store. Network calls are made
//! elsewhere; the manager records which request ids are in flight and applies
//! their completions. A completion whose id is no longer in flight (because a
//! newer call replaced it, or the user logged out) is ignored, so a late
//! response can never resurrect a purged token.

use crate::constants::PASSCODE_LEN;
use crate::network::ApiError;
use crate::storage::TokenStore;

/// Derived authentication status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Authenticating,
    Authenticated,
}

/// Operations that can establish a session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOp {
    Issue,
    Verify,
}

/// Outcome of applying a completion
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Stale completion, state untouched
    Ignored,
    Authenticated,
    Unauthenticated,
}

/// Read-only snapshot for rendering code
#[derive(Clone, Debug, PartialEq)]
pub struct SessionView {
    pub status: SessionStatus,
    pub token: Option<String>,
    /// The latest completed call failed
    pub failed: bool,
    /// The latest completed call was a failed passcode submission
    pub login_failed: bool,
}

impl Default for SessionView {
    fn default() -> Self {
        SessionView {
            status: SessionStatus::Unauthenticated,
            token: None,
            failed: false,
            login_failed: false,
        }
    }
}

/// True iff `passcode` is exactly six ASCII digits
pub fn is_valid_passcode(passcode: &str) -> bool {
    passcode.len() == PASSCODE_LEN && passcode.bytes().all(|b| b.is_ascii_digit())
}

pub struct SessionManager {
    token: Option<String>,
    store: Box<dyn TokenStore>,
    pending_issue: Option<u64>,
    /// In-flight verify id and the token being verified
    pending_verify: Option<(u64, String)>,
    last_failure: Option<(SessionOp, ApiError)>,
}

impl SessionManager {
    pub fn new(store: Box<dyn TokenStore>) -> Self {
        SessionManager {
            token: None,
            store,
            pending_issue: None,
            pending_verify: None,
            last_failure: None,
        }
    }

    /// Startup: returns the persisted token if one must be verified under `id`
    pub fn restore(&mut self, id: u64) -> Option<String> {
        let stored = match self.store.load() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored token");
                None
            }
        };

        let token = stored.filter(|t| !t.is_empty())?;
        tracing::info!(id, "Restoring stored session");
        self.pending_verify = Some((id, token.clone()));
        Some(token)
    }

    /// Record an issue call in flight
    pub fn begin_issue(&mut self, id: u64) {
        self.pending_issue = Some(id);
    }

    pub fn is_issuing(&self) -> bool {
        self.pending_issue.is_some()
    }

    pub fn complete_issue(&mut self, id: u64, result: Result<String, ApiError>) -> Transition {
        if self.pending_issue != Some(id) {
            tracing::debug!(id, "Ignoring stale issue completion");
            return Transition::Ignored;
        }
        self.pending_issue = None;

        match result {
            Ok(token) if !token.is_empty() => self.establish(token),
            Ok(_) => self.purge(
                SessionOp::Issue,
                ApiError::ServerError {
                    status: 200,
                    message: "empty token".to_string(),
                },
            ),
            Err(e) => self.purge(SessionOp::Issue, e),
        }
    }

    pub fn complete_verify(&mut self, id: u64, result: Result<(), ApiError>) -> Transition {
        let token = match self.pending_verify.take() {
            Some((pending, token)) if pending == id => token,
            other => {
                self.pending_verify = other;
                tracing::debug!(id, "Ignoring stale verify completion");
                return Transition::Ignored;
            }
        };

        match result {
            // Re-persist to pick up any sliding expiry on the backend
            Ok(()) => self.establish(token),
            Err(e) => self.purge(SessionOp::Verify, e),
        }
    }

    /// Drop the session; late completions of in-flight calls are ignored
    pub fn logout(&mut self) {
        self.pending_issue = None;
        self.pending_verify = None;
        self.last_failure = None;
        self.token = None;
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear stored token");
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.pending_issue.is_some() || self.pending_verify.is_some() {
            SessionStatus::Authenticating
        } else if self.token.is_some() && self.last_failure.is_none() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn last_failure(&self) -> Option<&(SessionOp, ApiError)> {
        self.last_failure.as_ref()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            status: self.status(),
            token: self.token.clone(),
            failed: self.last_failure.is_some(),
            login_failed: matches!(self.last_failure, Some((SessionOp::Issue, _))),
        }
    }

    fn establish(&mut self, token: String) -> Transition {
        if let Err(e) = self.store.save(&token) {
            tracing::warn!(error = %e, "Failed to persist token");
        }
        self.token = Some(token);
        self.last_failure = None;
        tracing::info!("Session authenticated");
        Transition::Authenticated
    }

    fn purge(&mut self, op: SessionOp, error: ApiError) -> Transition {
        tracing::warn!(?op, %error, "Session attempt failed");
        self.token = None;
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear stored token");
        }
        self.last_failure = Some((op, error));
        Transition::Unauthenticated
    }
}
