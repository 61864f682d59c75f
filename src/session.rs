//!
//! # Session Manager
//!
//! Holds at most one active token pair at a time, persisted as a small JSON
//! file (the client-side equivalent of the browser's `localStorage`). There is
//! no refresh-token exchange: expiry is only detected reactively when the API
//! answers 401, at which point the session is cleared and the user is sent back
//! to the login screen.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// The access token and refresh string issued by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

/// File-backed store for the current session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the stored token pair, or `None` when logged out.
    /// An unreadable or corrupt session file counts as logged out.
    pub fn get(&self) -> Option<TokenPair> {
        let raw = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    /// Returns the stored access token, or `None` when logged out.
    pub fn token(&self) -> Option<String> {
        self.get().map(|pair| pair.token)
    }

    /// Returns the access token or fails with `AppError::Auth`, which sends the
    /// current flow back to the login screen.
    pub fn require_token(&self) -> Result<String, AppError> {
        self.token()
            .ok_or_else(|| AppError::Auth("no stored session".into()))
    }

    /// Persists a token pair, replacing any previous session.
    pub fn store(&self, pair: &TokenPair) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| AppError::Internal(format!("cannot create session dir: {}", e)))?;
            }
        }
        let raw = serde_json::to_string(pair)
            .map_err(|e| AppError::Internal(format!("cannot encode session: {}", e)))?;
        fs::write(&self.path, raw)
            .map_err(|e| AppError::Internal(format!("cannot write session file: {}", e)))
    }

    /// Removes the stored session. Idempotent.
    pub fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }
}
