//! Saved login session
//!
//! `session.json` keeps the token pair and the profile fetched at login so
//! later commands can build an authenticated [`RequestContext`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use super::file_io::{read_json, remove_if_exists, write_json_atomic};
use crate::api::{RequestContext, SecretString};
use crate::error::{PfError, PfResult};
use crate::models::UserProfile;

/// Tokens and user details persisted after login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access: SecretString,
    pub refresh: SecretString,
    pub user: UserProfile,
}

impl Session {
    /// Request context for this session against `base_url`
    pub fn context(&self, base_url: &str) -> RequestContext {
        RequestContext::authenticated(base_url, self.access.clone())
    }
}

/// Reads and writes the session file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// The saved session, if any
    pub fn load(&self) -> PfResult<Option<Session>> {
        let session: Option<Session> = read_json(&self.path)?;
        debug!(path = %self.path.display(), found = session.is_some(), "Loaded session");
        Ok(session)
    }

    /// The saved session, or an error telling the user to log in
    pub fn require(&self) -> PfResult<Session> {
        self.load()?.ok_or_else(|| {
            PfError::Unauthorized("no saved session; run `pftracker login` first".into())
        })
    }

    pub fn save(&self, session: &Session) -> PfResult<()> {
        write_json_atomic(&self.path, session)
    }

    /// Remove the saved session; returns whether one existed
    pub fn clear(&self) -> PfResult<bool> {
        remove_if_exists(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;
    use tempfile::TempDir;

    fn session() -> Session {
        Session {
            access: "access.token".into(),
            refresh: "refresh.token".into(),
            user: UserProfile {
                id: UserId::new(1),
                username: "asha".into(),
                email: "asha@example.com".into(),
                profile_pic: None,
            },
        }
    }

    #[test]
    fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path().join("session.json"));

        assert!(store.load().unwrap().is_none());
        assert!(store.require().unwrap_err().is_unauthorized());

        store.save(&session()).unwrap();
        let loaded = store.require().unwrap();
        assert_eq!(loaded.user.username, "asha");
        assert_eq!(loaded.access.expose(), "access.token");

        assert!(store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_session_context_is_authenticated() {
        let ctx = session().context("http://127.0.0.1:8000/api/");
        assert_eq!(ctx.authorization().unwrap(), "Bearer access.token");
    }
}
