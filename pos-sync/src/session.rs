//! Authenticated session
//!
//! The auth provider (magic link, OAuth popup, …) is an external
//! collaborator; whatever it returns collapses into one explicit
//! session record. A small disk cache persists it between launches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};

/// The one session shape, regardless of auth provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Opaque authenticated-user identifier; scopes all store access
    pub id: String,
    pub email: String,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            issued_at: Utc::now(),
        }
    }
}

/// Disk-backed session cache (JSON file)
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join("session.json"),
        }
    }

    /// Restore a cached session, if any
    pub fn load(&self) -> AppResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let session = serde_json::from_str(&raw)
            .map_err(|e| AppError::internal(format!("corrupt session cache: {e}")))?;
        Ok(Some(session))
    }

    /// Persist the session, replacing any previous one
    pub fn save(&self, session: &Session) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    /// Remove the cached session (sign-out)
    pub fn clear(&self) -> AppResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
