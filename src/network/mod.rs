//! Network layer - backend calls for auth and activity
//!
//! The Network actor receives commands and sends back responses tagged with
//! the id of the command that produced them.

pub mod actor;
pub mod client;
pub mod error;

pub use actor::NetworkActor;
pub use client::ApiClient;
pub use error::ApiError;
