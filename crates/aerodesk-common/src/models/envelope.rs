//! The response envelope every backend endpoint returns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Business code the backend uses for success. Every other code is a failure.
pub const SUCCESS_CODE: i64 = 200;

/// Business code the backend uses for an unauthorized caller.
pub const UNAUTHORIZED_CODE: i64 = 401;

/// `{ code, msg, data }` wrapper around every response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// The server-supplied message, if it is present and non-empty.
    pub fn message(&self) -> Option<&str> {
        self.msg.as_deref().filter(|m| !m.is_empty())
    }
}
