//! cvdeval-session
//!
//! Key-value persistence for the login session: bearer token plus the
//! user's display name and email, written as a JSON file under the
//! platform config directory. Survives app restarts; cleared on logout.

pub mod error;

use std::path::PathBuf;

use tracing::info;

use cvdeval_core::models::session::Session;

use crate::error::SessionError;

const SESSION_FILE: &str = "session.json";

/// File-backed session store rooted at a directory.
///
/// Production code opens the default location; tests point the store at
/// a temp dir.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Store under `<config dir>/com.cvdeval.client`.
    pub fn open_default() -> Result<Self, SessionError> {
        let base = dirs::config_dir().ok_or(SessionError::NoConfigDir)?;
        Ok(Self {
            dir: base.join("com.cvdeval.client"),
        })
    }

    /// Store rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Load the persisted session. A missing file is an empty session,
    /// not an error.
    pub fn load(&self) -> Result<Session, SessionError> {
        let path = self.path();
        if !path.exists() {
            return Ok(Session::default());
        }
        let contents = std::fs::read_to_string(&path)?;
        let session: Session = serde_json::from_str(&contents)?;
        Ok(session)
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        std::fs::create_dir_all(&self.dir)?;

        let json = serde_json::to_string_pretty(session)?;
        let path = self.path();

        // Write to a temp file then rename for atomicity
        let tmp_path = self.dir.join(format!("{SESSION_FILE}.tmp"));
        std::fs::write(&tmp_path, json.as_bytes())?;

        // Set restrictive permissions on Unix before renaming
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
        }

        std::fs::rename(&tmp_path, &path)?;

        info!(path = %path.display(), "session saved");
        Ok(())
    }

    /// Remove the persisted session. Missing file is not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        let path = self.path();
        if path.exists() {
            std::fs::remove_file(&path)?;
            info!(path = %path.display(), "session cleared");
        }
        Ok(())
    }

    /// The persisted bearer token, if any. Every authenticated request
    /// reads the token through here.
    pub fn token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.load()?.token)
    }
}
