//! Endpoint wrappers, one `impl RestClient` block per feature area.
//!
//! Each wrapper maps to exactly one verb and path under the configured base
//! URL and carries no logic beyond building the path and payload.

mod auth;
mod conversation;
mod dashboard;
mod flight;
mod knowledge;
mod log;
mod order;
mod prompt;
mod user;
