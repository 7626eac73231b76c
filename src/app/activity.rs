//! Activity query cache - deduplicated fetches and invalidation for the widget

use chrono::{DateTime, Utc};

use crate::models::Activity;
use crate::network::ApiError;

/// Cached activity payload plus the clear mutation state
#[derive(Clone, Debug, Default)]
pub struct ActivityQuery {
    pub data: Option<Activity>,
    pub error: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
    pending: Option<u64>,
    pending_clear: Option<u64>,
    stale: bool,
}

impl ActivityQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_clearing(&self) -> bool {
        self.pending_clear.is_some()
    }

    /// Whether a mounted widget should start a fetch now
    pub fn needs_fetch(&self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.stale || (self.data.is_none() && self.error.is_none())
    }

    /// Mark in flight; false if a fetch is already running
    pub fn begin_fetch(&mut self, id: u64) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(id);
        self.stale = false;
        true
    }

    pub fn complete_fetch(&mut self, id: u64, result: Result<Activity, ApiError>) {
        if self.pending != Some(id) {
            return;
        }
        self.pending = None;

        match result {
            Ok(activity) => {
                self.data = Some(activity);
                self.error = None;
                self.fetched_at = Some(Utc::now());
            }
            // Previous data stays visible
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Force the next mounted render to refetch
    pub fn invalidate(&mut self) {
        self.stale = true;
        self.error = None;
    }

    /// Mark a clear in flight; false if one is already running
    pub fn begin_clear(&mut self, id: u64) -> bool {
        if self.pending_clear.is_some() {
            return false;
        }
        self.pending_clear = Some(id);
        true
    }

    pub fn complete_clear(&mut self, id: u64, result: Result<(), ApiError>) {
        if self.pending_clear != Some(id) {
            return;
        }
        self.pending_clear = None;

        match result {
            Ok(()) => self.invalidate(),
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}
