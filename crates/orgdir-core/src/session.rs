//! Session stub: the signed-in user kept in a small JSON file.
//!
//! There is no real authentication: a session is just a name and email the
//! user typed into the login form. An unreadable or malformed file counts as
//! signed out.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub email: String,
    pub timestamp: DateTime<Utc>,
}

/// File-backed session store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `$XDG_CONFIG_HOME/orgdir/session.json`.
    pub fn default_location() -> Self {
        Self::new(crate::config::config_dir().join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored session, or `None` when absent or unreadable.
    pub fn load(&self) -> Option<Session> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::debug!(path = %self.path.display(), %err, "ignoring malformed session");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.load().is_some()
    }

    /// Display name of the signed-in user.
    pub fn user_name(&self) -> Option<String> {
        self.load().map(|s| s.name).filter(|n| !n.is_empty())
    }

    /// Validate the login form and persist a new session.
    ///
    /// # Errors
    ///
    /// [`SessionError::MissingCredentials`] if either field is blank after
    /// trimming; IO and encoding errors from writing the file.
    pub fn login(&self, name: &str, email: &str) -> Result<Session, SessionError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(SessionError::MissingCredentials);
        }

        let session = Session {
            name: name.to_string(),
            email: email.to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&session)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        std::fs::write(&self.path, json).map_err(|source| self.io_error(source))?;
        tracing::info!(user = %session.name, "logged in");
        Ok(session)
    }

    /// Remove the stored session. Logging out while signed out is fine.
    pub fn logout(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("logged out");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));
        (dir, store)
    }

    #[test]
    fn login_then_logout() {
        let (_dir, store) = store();
        assert!(!store.is_authenticated());

        let session = store.login("  Ada ", "ada@example.edu").unwrap();
        assert_eq!(session.name, "Ada");
        assert!(store.is_authenticated());
        assert_eq!(store.user_name().as_deref(), Some("Ada"));

        store.logout().unwrap();
        assert!(!store.is_authenticated());
        store.logout().unwrap();
    }

    #[test]
    fn blank_fields_are_rejected() {
        let (_dir, store) = store();
        assert!(matches!(
            store.login("Ada", "   "),
            Err(SessionError::MissingCredentials)
        ));
        assert!(matches!(
            store.login("", "ada@example.edu"),
            Err(SessionError::MissingCredentials)
        ));
        assert!(!store.path().exists());
    }

    #[test]
    fn malformed_file_counts_as_signed_out() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_none());
        assert!(!store.is_authenticated());
    }
}
