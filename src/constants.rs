//! Application constants
//!
//! Centralized location for paths, endpoint routes and configuration defaults.

/// Default backend the API client talks to
pub const DEFAULT_BACKEND_HOST: &str = "http://localhost:6565";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Directory under the user's home holding config, token and log files
pub const CONFIG_DIR_NAME: &str = ".shigure";

pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const TOKEN_FILE_NAME: &str = "token";
pub const LOG_FILE_NAME: &str = "shigure.log";

/// Environment overrides
pub const ENV_BACKEND_HOST: &str = "SHIGURE_BACKEND_HOST";
pub const ENV_TOKEN_FILE: &str = "SHIGURE_TOKEN_FILE";

/// Number of digits in a login passcode
pub const PASSCODE_LEN: usize = 6;

// API routes
pub const ROUTE_TOKEN: &str = "/auth/token";
pub const ROUTE_TOKEN_VERIFY: &str = "/auth/token/verify";
pub const ROUTE_ACTIVITY: &str = "/activity";
pub const ROUTE_ACTIVITY_CLEAR: &str = "/activity/clear";
pub const ROUTE_ACTIVITY_IMAGE: &str = "/activity/svg";

/// Application name
pub const APP_NAME: &str = "Shigure";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
