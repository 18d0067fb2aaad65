//! # aerodesk-common
//!
//! Shared types, configuration, and token decoding used across all AeroDesk crates.
//! Foundation layer with no HTTP and no storage.

pub mod auth;
pub mod config;
pub mod models;
