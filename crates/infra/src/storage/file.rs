//! JSON file token store
//!
//! The session lives in one small JSON document. Writes go to a sibling
//! temporary file that is then renamed over the target, so readers never
//! see a half-written pair.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use informado_core::TokenStore;
use informado_domain::{CredentialPair, InformadoError, Result};
use parking_lot::Mutex;
use tracing::{debug, warn};

use super::StoredSession;
use crate::errors::InfraError;

/// Session persisted to a JSON file.
///
/// Every read goes to disk, so separate processes sharing the file observe
/// each other's logins and logouts.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    /// Store backed by the JSON file at `path`; nothing is read until used.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf(), write_lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read(&self) -> StoredSession {
        match fs::read_to_string(&self.path) {
            Ok(raw) => StoredSession::decode(&raw).unwrap_or_default(),
            Err(err) if err.kind() == ErrorKind::NotFound => StoredSession::default(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Failed to read session file");
                StoredSession::default()
            }
        }
    }

    fn write(&self, session: &StoredSession) -> Result<()> {
        let contents = session.encode()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(storage_error)?;
        }

        let temp = self.temp_path();
        fs::write(&temp, contents).map_err(storage_error)?;
        if let Err(err) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(storage_error(err));
        }
        Ok(())
    }
}

fn storage_error(err: std::io::Error) -> InformadoError {
    InfraError::from(err).into()
}

impl TokenStore for FileTokenStore {
    fn save(&self, pair: &CredentialPair) -> Result<()> {
        let _guard = self.write_lock.lock();
        self.write(&StoredSession::from(pair))?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock();
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session file removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_error(err)),
        }
    }

    fn access_token(&self) -> Option<String> {
        self.read().access_token
    }

    fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token
    }

    fn role(&self) -> Option<String> {
        self.read().role
    }

    fn load(&self) -> Option<CredentialPair> {
        let session = self.read();
        Some(CredentialPair {
            access_token: session.access_token?,
            refresh_token: session.refresh_token?,
            role: session.role?,
        })
    }
}
