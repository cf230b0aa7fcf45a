use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::api::TokenPair;
use crate::models::User;

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

/// Days a stored refresh token is assumed to stay valid.
/// Matches the backend's refresh-token lifetime; older session files are
/// discarded on load rather than failing the first request.
const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub tokens: TokenPair,
    pub user: User,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(tokens: TokenPair, user: User, email: String) -> Self {
        Self {
            tokens,
            user,
            email,
            created_at: Utc::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        let expiry = self.created_at + Duration::days(REFRESH_TOKEN_TTL_DAYS);
        Utc::now() > expiry
    }
}

/// On-disk session store. The token pair inside is the persisted copy of the
/// client's in-memory store; login, refresh, and logout are the only writers.
pub struct Session {
    cache_dir: PathBuf,
    pub data: Option<SessionData>,
}

impl Session {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            data: None,
        }
    }

    /// Load session from disk. Returns true when a usable session was found.
    pub fn load(&mut self) -> Result<bool> {
        let path = self.session_path();
        if path.exists() {
            let contents =
                std::fs::read_to_string(&path).context("Failed to read session file")?;
            let data: SessionData =
                serde_json::from_str(&contents).context("Failed to parse session file")?;

            if !data.is_expired() {
                self.data = Some(data);
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Save session to disk
    pub fn save(&self) -> Result<()> {
        if let Some(ref data) = self.data {
            let path = self.session_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(data)?;
            std::fs::write(path, contents)?;
        }
        Ok(())
    }

    /// Clear session data and remove the file
    pub fn clear(&mut self) -> Result<()> {
        self.data = None;
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Replace session data (after login)
    pub fn update(&mut self, data: SessionData) {
        self.data = Some(data);
    }

    /// Persist a refreshed token pair without touching the user info.
    pub fn update_tokens(&mut self, tokens: TokenPair) {
        if let Some(ref mut data) = self.data {
            data.tokens = tokens;
            data.created_at = Utc::now();
        }
    }

    pub fn tokens(&self) -> Option<&TokenPair> {
        self.data.as_ref().map(|d| &d.tokens)
    }

    pub fn user(&self) -> Option<&User> {
        self.data.as_ref().map(|d| &d.user)
    }

    pub fn is_valid(&self) -> bool {
        self.data.as_ref().map(|d| !d.is_expired()).unwrap_or(false)
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        serde_json::from_str(
            r#"{"_id": "u1", "email": "a@b.co", "firstName": "A", "lastName": "B"}"#,
        )
        .expect("valid user JSON")
    }

    fn sample_tokens() -> TokenPair {
        TokenPair {
            token: "acc".to_string(),
            refresh_token: "ref".to_string(),
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = Session::new(dir.path().to_path_buf());
        session.update(SessionData::new(
            sample_tokens(),
            sample_user(),
            "a@b.co".to_string(),
        ));
        session.save().expect("save");

        let mut loaded = Session::new(dir.path().to_path_buf());
        assert!(loaded.load().expect("load"));
        assert_eq!(loaded.tokens(), Some(&sample_tokens()));
        assert_eq!(loaded.user().map(|u| u.email.as_str()), Some("a@b.co"));
        assert!(loaded.is_valid());
    }

    #[test]
    fn test_expired_session_is_not_loaded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = Session::new(dir.path().to_path_buf());
        let mut data = SessionData::new(sample_tokens(), sample_user(), "a@b.co".to_string());
        data.created_at = Utc::now() - Duration::days(REFRESH_TOKEN_TTL_DAYS + 1);
        session.update(data);
        session.save().expect("save");

        let mut loaded = Session::new(dir.path().to_path_buf());
        assert!(!loaded.load().expect("load"));
        assert!(loaded.data.is_none());
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = Session::new(dir.path().to_path_buf());
        session.update(SessionData::new(
            sample_tokens(),
            sample_user(),
            "a@b.co".to_string(),
        ));
        session.save().expect("save");
        session.clear().expect("clear");

        let mut loaded = Session::new(dir.path().to_path_buf());
        assert!(!loaded.load().expect("load"));
    }

    #[test]
    fn test_update_tokens_keeps_user() {
        let mut session = Session::new(PathBuf::from("/tmp/unused"));
        session.update(SessionData::new(
            sample_tokens(),
            sample_user(),
            "a@b.co".to_string(),
        ));

        let new_pair = TokenPair {
            token: "acc2".to_string(),
            refresh_token: "ref2".to_string(),
        };
        session.update_tokens(new_pair.clone());

        assert_eq!(session.tokens(), Some(&new_pair));
        assert_eq!(session.user().map(|u| u.id.as_str()), Some("u1"));
    }
}
