//! Error types for the AeroDesk client.
//!
//! Every failure below the gateway surfaces as one [`ClientError`] whose
//! `Display` is a single human-readable message, ready to show to a user.

use thiserror::Error;

use crate::session::StoreError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The call reached the backend but its business code signalled failure.
    #[error("{message}")]
    Business { code: i64, message: String },

    /// The backend rejected the caller (business code or HTTP status 401).
    #[error("{message}")]
    Unauthorized { message: String, token_evicted: bool },

    /// Non-2xx HTTP status other than 401.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// No response at all: connection refused, DNS failure, timeout.
    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// The envelope succeeded but `data` did not have the expected shape.
    #[error("{message}")]
    Payload {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// The token slot could not be written.
    #[error("{message}")]
    Store {
        message: String,
        #[source]
        source: StoreError,
    },

    /// The request could not be built, e.g. the stored token is not a valid header value.
    #[error("{0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// The human-readable message carried by every variant.
    pub fn message(&self) -> &str {
        match self {
            Self::Business { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::Http { message, .. }
            | Self::Network { message, .. }
            | Self::Payload { message, .. }
            | Self::Store { message, .. } => message,
            Self::InvalidRequest(message) => message,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl From<StoreError> for ClientError {
    fn from(source: StoreError) -> Self {
        Self::Store { message: "failed to update the stored token".to_owned(), source }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
