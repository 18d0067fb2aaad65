//! Wire models for the AeroDesk REST API.
//!
//! Field names are camelCase on the wire, matching the backend's JSON. Every
//! response body is wrapped in an [`Envelope`]; these types describe its `data`.

pub mod conversation;
pub mod dashboard;
pub mod envelope;
pub mod flight;
pub mod knowledge;
pub mod log;
pub mod order;
pub mod prompt;
pub mod user;

/// Re-export all model types for convenience.
pub use conversation::*;
pub use dashboard::*;
pub use envelope::*;
pub use flight::*;
pub use knowledge::*;
pub use log::*;
pub use order::*;
pub use prompt::*;
pub use user::*;
