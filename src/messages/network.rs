//! Network messages - communication between App and Network layers

use crate::models::Activity;
use crate::network::error::ApiError;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Exchange a passcode for a session token
    IssueToken { id: u64, passcode: String },
    /// Check a previously issued token with the backend
    VerifyToken { id: u64, token: String },
    /// Fetch the current activity
    FetchActivity { id: u64, token: Option<String> },
    /// Clear the current activity (authenticated)
    ClearActivity { id: u64, token: String },

    /// Shutdown the network actor
    Shutdown,
}

impl NetworkCommand {
    /// Short name for logging; never includes credentials
    pub fn name(&self) -> &'static str {
        match self {
            NetworkCommand::IssueToken { .. } => "issue_token",
            NetworkCommand::VerifyToken { .. } => "verify_token",
            NetworkCommand::FetchActivity { .. } => "fetch_activity",
            NetworkCommand::ClearActivity { .. } => "clear_activity",
            NetworkCommand::Shutdown => "shutdown",
        }
    }
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    TokenIssued {
        id: u64,
        result: Result<String, ApiError>,
    },
    TokenVerified {
        id: u64,
        result: Result<(), ApiError>,
    },
    ActivityFetched {
        id: u64,
        result: Result<Activity, ApiError>,
    },
    ActivityCleared {
        id: u64,
        result: Result<(), ApiError>,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::TokenIssued { id, .. } => *id,
            NetworkResponse::TokenVerified { id, .. } => *id,
            NetworkResponse::ActivityFetched { id, .. } => *id,
            NetworkResponse::ActivityCleared { id, .. } => *id,
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            NetworkResponse::TokenIssued { result, .. } => result.is_ok(),
            NetworkResponse::TokenVerified { result, .. } => result.is_ok(),
            NetworkResponse::ActivityFetched { result, .. } => result.is_ok(),
            NetworkResponse::ActivityCleared { result, .. } => result.is_ok(),
        }
    }
}
