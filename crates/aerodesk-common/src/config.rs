//! Client configuration loaded from environment variables and config files.
//!
//! Supports `.env` files for development and environment variables for deployment.
//! Config precedence: env vars > .env file > aerodesk.toml > defaults

use std::path::PathBuf;
use std::time::Duration;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_TOKEN_PATH: &str = "./data/token.json";

/// Message the server sends with a 401 when a password change is rejected
/// because the old password was wrong. Such a 401 must not log the user out.
pub const DEFAULT_PASSWORD_MISMATCH_MESSAGE: &str = "old password incorrect";

/// Load configuration from `.env`, `aerodesk.toml` and `AERODESK_*` variables.
///
/// Environment keys use `__` between sections, e.g. `AERODESK_API__BASE_URL`.
pub fn load() -> Result<ClientConfig, ConfigError> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    defaults()?
        .add_source(config::File::with_name("aerodesk").required(false))
        .add_source(
            config::Environment::with_prefix("AERODESK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("api.timeout_ms", DEFAULT_TIMEOUT_MS)?
        .set_default("auth.token_path", DEFAULT_TOKEN_PATH)?
        .set_default("auth.password_mismatch_message", DEFAULT_PASSWORD_MISMATCH_MESSAGE)
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Backend base URL including the `/api` prefix.
    pub base_url: String,
    /// Transport deadline per request, in milliseconds.
    pub timeout_ms: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AuthConfig {
    /// File backing the persisted token slot.
    pub token_path: PathBuf,
    /// Exact `msg` of a 401 that must not evict the stored token.
    pub password_mismatch_message: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_owned(),
                timeout_ms: DEFAULT_TIMEOUT_MS,
            },
            auth: AuthConfig {
                token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
                password_mismatch_message: DEFAULT_PASSWORD_MISMATCH_MESSAGE.to_owned(),
            },
        }
    }
}
