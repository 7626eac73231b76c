//! # Shigure TUI
//!
//! A terminal front-end for the shigure activity service.
//!
//! ## Features
//! - Passcode login exchanging a 6-digit code for a bearer token
//! - Token persisted across runs and re-verified at startup
//! - Current activity widget (title, author, links) with refresh and clear
//! - Collapsible sidebar
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (Session state machine, activity cache)
//! - Network Layer (Tokio runtime)

pub mod config;
pub mod constants;
pub mod models;
pub mod storage;
pub mod session;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{Activity, Route};
pub use session::{SessionManager, SessionStatus, SessionView};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{ApiClient, ApiError, NetworkActor};
