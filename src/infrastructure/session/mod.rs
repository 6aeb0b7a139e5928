//! File-backed session persistence.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::entities::Employee;
use crate::domain::errors::SessionError;
use crate::domain::ports::SessionPort;

const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "billed";
const APP_NAME: &str = "frais";
const SESSION_FILE_NAME: &str = "session.json";

// On-disk shape, kept compatible with the web client's stored user record.
#[derive(Debug, Serialize, Deserialize)]
struct SessionRecord {
    #[serde(rename = "type", default = "default_kind")]
    kind: String,
    email: String,
}

fn default_kind() -> String {
    "Employee".to_string()
}

/// Session store keeping a single JSON record on disk.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store under the platform data directory.
    ///
    /// # Errors
    /// Returns an error when the data directory cannot be determined.
    pub fn new() -> Result<Self, SessionError> {
        let path = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join(SESSION_FILE_NAME))
            .ok_or(SessionError::DirUnavailable)?;

        Ok(Self { path })
    }

    /// Creates a store backed by a specific file (useful for testing).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the session file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomically(&self, content: &str) -> Result<(), SessionError> {
        let parent = self
            .path
            .parent()
            .ok_or(SessionError::DirUnavailable)?;
        fs::create_dir_all(parent)?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(&self.path).map_err(|e| e.error)?;

        Ok(())
    }
}

impl SessionPort for FileSessionStore {
    fn current_user(&self) -> Result<Option<Employee>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let record: SessionRecord = serde_json::from_str(&content)
            .map_err(|e| SessionError::corrupted(e.to_string()))?;

        debug!(email = %record.email, "Session loaded");
        Ok(Some(Employee::new(record.email)))
    }

    fn store_user(&self, employee: &Employee) -> Result<(), SessionError> {
        let record = SessionRecord {
            kind: default_kind(),
            email: employee.email().to_string(),
        };
        let content = serde_json::to_string(&record)
            .map_err(|e| SessionError::corrupted(e.to_string()))?;

        self.write_atomically(&content)?;
        info!(email = %employee.email(), "Session stored");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            info!("Session cleared");
        }
        Ok(())
    }
}
