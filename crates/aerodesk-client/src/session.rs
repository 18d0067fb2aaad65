//! Session state: the persisted token slot and the views derived from it.
//!
//! The session never caches anything: "current user" and "logged in" are
//! recomputed from the stored token on every query. Claims are decoded without
//! signature verification and are UI hints only.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use aerodesk_common::auth::{decode_claims, Claims, Role};
use serde::Serialize;
use serde_json::{Map, Value};

/// Name of the one persisted slot.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("token store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("token store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single named key-value slot holding the raw token, last writer wins.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str) -> Result<(), StoreError>;
    fn remove(&self) -> Result<(), StoreError>;
}

// ============================================================
// Stores
// ============================================================

/// Process-local slot. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self { slot: Mutex::new(Some(token.into())) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn remove(&self) -> Result<(), StoreError> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        Ok(())
    }
}

/// Slot persisted in a small JSON key-value file (`{"token": "…"}`).
///
/// Other keys in the file are preserved. Writes go through a temporary file
/// and a rename, so readers never see a torn file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Map<String, Value>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Map::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Current entries; a corrupt file is logged and replaced on the next write.
    fn entries_for_write(&self) -> Result<Map<String, Value>, StoreError> {
        match self.read_entries() {
            Err(StoreError::Json(e)) => {
                tracing::warn!(path = %self.path.display(), "Discarding corrupt token store: {e}");
                Ok(Map::new())
            }
            other => other,
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        match self.read_entries() {
            Ok(mut entries) => match entries.remove(TOKEN_KEY)? {
                Value::String(token) => Some(token),
                _ => {
                    tracing::warn!(path = %self.path.display(), "Stored token is not a string");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Token store unreadable: {e}");
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        let mut entries = self.entries_for_write()?;
        entries.insert(TOKEN_KEY.to_owned(), Value::String(token.to_owned()));
        self.write_entries(&entries)
    }

    fn remove(&self) -> Result<(), StoreError> {
        let mut entries = self.entries_for_write()?;
        if entries.remove(TOKEN_KEY).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

// ============================================================
// Session
// ============================================================

/// The signed-in user as read from the token's claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub user_type: i64,
}

/// Shared handle to the token slot. Cloning shares the same store.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self { store: Arc::new(store) }
    }

    pub fn from_store(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    pub fn get_token(&self) -> Option<String> {
        self.store.get()
    }

    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.store.set(token)
    }

    pub fn remove_token(&self) -> Result<(), StoreError> {
        self.store.remove()
    }

    /// Clear the local token. The server-side session is left untouched.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.remove_token()
    }

    /// Decoded claims of the stored token, or `None` if absent or undecodable.
    pub fn claims(&self) -> Option<Claims> {
        let token = self.get_token()?;
        decode_claims(&token)
            .map_err(|e| tracing::warn!("Stored token could not be decoded: {e}"))
            .ok()
    }

    /// The current user, or `None` unless id, username and user type are all present.
    pub fn current_user(&self) -> Option<CurrentUser> {
        let claims = self.claims()?;
        match (claims.user_id(), claims.username(), claims.user_type()) {
            (Some(id), Some(username), Some(user_type)) => Some(CurrentUser {
                id,
                username: username.to_owned(),
                role: Role::from_user_type(user_type),
                user_type,
            }),
            _ => {
                tracing::warn!("Token is missing required user claims");
                None
            }
        }
    }

    /// Whether a usable token is stored. An expired token is evicted here;
    /// there is no other expiry enforcement.
    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in_at(now_secs())
    }

    pub fn is_logged_in_at(&self, now_secs: f64) -> bool {
        let Some(claims) = self.claims() else {
            return false;
        };
        if claims.user_id().is_none() {
            return false;
        }
        if claims.is_expired_at(now_secs) {
            self.evict("token expired");
            return false;
        }
        true
    }

    /// Best-effort token removal; a store failure is logged, not returned.
    pub(crate) fn evict(&self, reason: &str) -> bool {
        match self.store.remove() {
            Ok(()) => {
                tracing::warn!(reason, "Evicted stored token");
                true
            }
            Err(e) => {
                tracing::error!(reason, "Failed to evict stored token: {e}");
                false
            }
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("has_token", &self.get_token().is_some())
            .finish()
    }
}

fn now_secs() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}
