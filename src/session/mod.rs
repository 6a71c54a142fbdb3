//! Durable session storage.
//!
//! The client persists exactly one thing between runs: the auth token and the
//! user profile it authorizes, stored as string entries in a single JSON file
//! under the data directory. Small UI preferences (the display theme) share
//! the same key-value surface. Missing keys are a valid logged-out state, and
//! a corrupt file degrades to logged-out instead of failing the app.

use anyhow::{Context, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::api::models::User;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const THEME_KEY: &str = "theme";

const SESSION_FILE: &str = "session.json";

/// A complete persisted session: the auth token and the user it authorizes.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// File-backed key-value store holding the session and display preferences.
///
/// The file is mirrored in memory behind a lock; every write replaces the
/// file atomically, so token and user are never observable half-updated.
pub struct SessionStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl SessionStore {
    /// Open the store under `data_dir`, creating the directory if needed.
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        let path = data_dir.join(SESSION_FILE);
        let entries = load_entries(&path);
        debug!("Session store opened at {}", path.display());
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    /// Current auth token, if any.
    pub fn token(&self) -> Option<String> {
        self.entries.read().get(TOKEN_KEY).cloned()
    }

    /// Current user profile. A corrupt persisted profile reads as `None`.
    pub fn user(&self) -> Option<User> {
        let entries = self.entries.read();
        let raw = entries.get(USER_KEY)?;
        match serde_json::from_str(raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Discarding corrupt persisted user profile: {e}");
                None
            }
        }
    }

    /// The full session, present only when both token and user decode.
    pub fn session(&self) -> Option<Session> {
        Some(Session {
            token: self.token()?,
            user: self.user()?,
        })
    }

    /// Persist token and user together. Both entries land in one atomic file
    /// replace, so a concurrent reader observes either the old pair or the
    /// new pair, never a token without its user.
    pub fn set_session(&self, token: &str, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user).context("Failed to serialize user profile")?;
        let mut entries = self.entries.write();
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        entries.insert(USER_KEY.to_string(), raw);
        self.persist(&entries)
    }

    /// Remove both session entries. Idempotent: already-logged-out is a no-op.
    pub fn clear_session(&self) -> Result<()> {
        let mut entries = self.entries.write();
        let removed_token = entries.remove(TOKEN_KEY).is_some();
        let removed_user = entries.remove(USER_KEY).is_some();
        if removed_token || removed_user {
            self.persist(&entries)?;
        }
        Ok(())
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        let json =
            serde_json::to_string_pretty(entries).context("Failed to serialize session store")?;
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .context("Failed to create temporary session file")?;
        tmp.write_all(json.as_bytes())
            .context("Failed to write session file")?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

fn load_entries(path: &Path) -> HashMap<String, String> {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Session file {} is corrupt ({e}), starting logged out",
                    path.display()
                );
                HashMap::new()
            }
        },
        Err(_) => HashMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::Role;

    fn test_user() -> User {
        User {
            name: "ama".to_string(),
            email: "ama@example.com".to_string(),
            role: Role::Driver,
        }
    }

    #[test]
    fn test_session_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        let user = test_user();
        store.set_session("tok-123", &user).unwrap();

        assert_eq!(store.token().as_deref(), Some("tok-123"));
        assert_eq!(store.user(), Some(user.clone()));
        let session = store.session().unwrap();
        assert_eq!(session.token, "tok-123");
        assert_eq!(session.user, user);
    }

    #[test]
    fn test_clear_session_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        // Clearing an empty store is a no-op, not an error
        store.clear_session().unwrap();
        assert!(store.token().is_none());
        assert!(store.user().is_none());

        store.set_session("tok", &test_user()).unwrap();
        store.clear_session().unwrap();
        store.clear_session().unwrap();
        assert!(store.token().is_none());
        assert!(store.user().is_none());
        assert!(store.session().is_none());
    }

    #[test]
    fn test_session_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = SessionStore::open(dir.path()).unwrap();
            store.set_session("tok-456", &test_user()).unwrap();
        }
        let store = SessionStore::open(dir.path()).unwrap();
        assert_eq!(store.token().as_deref(), Some("tok-456"));
        assert_eq!(store.user().unwrap().email, "ama@example.com");
    }

    #[test]
    fn test_corrupt_file_degrades_to_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SESSION_FILE), "{not valid json").unwrap();

        let store = SessionStore::open(dir.path()).unwrap();
        assert!(store.token().is_none());
        assert!(store.user().is_none());

        // The store stays writable after recovery
        store.set_session("tok", &test_user()).unwrap();
        assert!(store.session().is_some());
    }

    #[test]
    fn test_corrupt_user_profile_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        store.set(TOKEN_KEY, "tok").unwrap();
        store.set(USER_KEY, "not json").unwrap();

        assert_eq!(store.token().as_deref(), Some("tok"));
        assert!(store.user().is_none());
        assert!(store.session().is_none());
    }

    #[test]
    fn test_generic_entries_are_independent_of_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        store.set(THEME_KEY, "dark").unwrap();
        store.set_session("tok", &test_user()).unwrap();
        store.clear_session().unwrap();

        // Clearing the session leaves unrelated preferences alone
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        store.remove(THEME_KEY).unwrap();
        assert!(store.get(THEME_KEY).is_none());
    }
}
