use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Errors raised while reading or writing the persisted payload
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to read persisted payload {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write persisted payload {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete persisted payload {}: {source}", .path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Keeps the last good raw provider payload in a single file
#[derive(Debug, Clone)]
pub struct PersistenceAdapter {
    path: PathBuf,
}

impl PersistenceAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomically replaces the persisted file with `raw`, creating its directory if needed
    pub async fn save(&self, raw: &str) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| self.write_error(source))?;
        }

        // Stage beside the target; the rename replaces the file in one step
        let staging = self.staging_path();
        fs::write(&staging, raw)
            .await
            .map_err(|source| self.write_error(source))?;

        if let Err(source) = fs::rename(&staging, &self.path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(self.write_error(source));
        }

        debug!("Persisted {} bytes to {}", raw.len(), self.path.display());
        Ok(())
    }

    /// Reads the persisted payload; a missing file yields `None`
    pub async fn load(&self) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Removes the persisted file; a missing file is not an error
    pub async fn delete(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PersistenceError::Delete {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
