//! Signed-in session and its persistence.
//!
//! A [`Session`] is an explicit value passed to whatever needs it; nothing
//! reads the current user from global state. Persistence goes through a
//! [`SessionStore`]: the system keychain by default, or a JSON file when
//! `GEMSHOP_SESSION_FILE` is set.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::GemshopError;
use crate::models::{AuthResponse, Secret};

/// Keychain service name used for the stored session.
const SERVICE: &str = "gemshop";

/// Keychain entry holding the serialized session.
const ENTRY: &str = "session";

/// An authenticated user: username plus bearer token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub token: Secret,
}

impl Session {
    /// Creates a session from its parts.
    #[must_use]
    pub fn new(username: impl Into<String>, token: Secret) -> Self {
        Self {
            username: username.into(),
            token,
        }
    }

    /// Builds a session from a sign-in response.
    ///
    /// Returns `None` when the gateway did not issue a token.
    #[must_use]
    pub fn from_auth(response: AuthResponse) -> Option<Self> {
        let token = response.token.filter(|t| !t.is_empty())?;
        Some(Self::new(response.username, token))
    }
}

/// Load/save/clear lifecycle for the persisted session.
pub trait SessionStore: Send + Sync {
    /// Returns the stored session, or `None` if nobody is signed in.
    fn load(&self) -> crate::Result<Option<Session>>;

    /// Persists `session`, replacing any previous one.
    fn save(&self, session: &Session) -> crate::Result<()>;

    /// Removes the stored session. Clearing an empty store is not an error.
    fn clear(&self) -> crate::Result<()>;
}

/// Session store backed by the system keychain.
#[derive(Debug, Default)]
pub struct KeyringSessionStore;

impl KeyringSessionStore {
    fn entry() -> crate::Result<keyring::Entry> {
        keyring::Entry::new(SERVICE, ENTRY)
            .map_err(|e| GemshopError::Session(format!("keyring entry error: {e}")))
    }
}

impl SessionStore for KeyringSessionStore {
    fn load(&self) -> crate::Result<Option<Session>> {
        match Self::entry()?.get_password() {
            Ok(raw) => {
                let session = serde_json::from_str(&raw)?;
                debug!("loaded session from keychain");
                Ok(Some(session))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(GemshopError::Session(format!(
                "failed to read keychain: {e}"
            ))),
        }
    }

    fn save(&self, session: &Session) -> crate::Result<()> {
        let raw = serde_json::to_string(session)?;
        Self::entry()?
            .set_password(&raw)
            .map_err(|e| GemshopError::Session(format!("failed to save to keychain: {e}")))?;
        info!(username = %session.username, "saved session to keychain");
        Ok(())
    }

    fn clear(&self) -> crate::Result<()> {
        match Self::entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(GemshopError::Session(format!(
                "failed to clear keychain: {e}"
            ))),
        }
    }
}

/// Session store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store that reads and writes `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> crate::Result<Option<Session>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(GemshopError::Session(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> crate::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                GemshopError::Session(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, raw).map_err(|e| {
            GemshopError::Session(format!("failed to write {}: {e}", self.path.display()))
        })?;
        info!(username = %session.username, path = %self.path.display(), "saved session");
        Ok(())
    }

    fn clear(&self) -> crate::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GemshopError::Session(format!(
                "failed to remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

/// Picks the store for the configured session file.
#[must_use]
pub fn store_for(session_file: Option<&Path>) -> Box<dyn SessionStore> {
    match session_file {
        Some(path) => Box::new(FileSessionStore::new(path)),
        None => Box::new(KeyringSessionStore),
    }
}
