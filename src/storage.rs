//! Physical storage for uploaded image files.
//!
//! The store is not covered by the database transaction; callers order the
//! file operation and the row mutation so that a row never points at a file
//! the store no longer holds.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

/// Failures raised by the image store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write stored file {name}: {source}")]
    Write {
        name: String,
        source: std::io::Error,
    },
    #[error("failed to delete stored file {name}: {source}")]
    Delete {
        name: String,
        source: std::io::Error,
    },
}

/// Persists and removes image files by stored name.
pub trait ImageStore {
    /// Write `bytes` under `file_name`, replacing any previous content.
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<(), StorageError>;
    /// Remove the file named `file_name`. Removing a file that is already
    /// gone succeeds, so delete is idempotent.
    fn delete(&self, file_name: &str) -> Result<(), StorageError>;
}

/// Derive a collision-resistant stored name for an uploaded file:
/// current unix timestamp, a process-wide sequence number and the
/// client-supplied name with any path components stripped. The sequence
/// keeps names distinct when several files land in the same second.
pub fn stored_file_name(original: &str) -> String {
    use std::sync::atomic::{AtomicU64, Ordering};

    static SEQUENCE: AtomicU64 = AtomicU64::new(0);

    let base = Path::new(original)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload");
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}", Utc::now().timestamp(), seq, base)
}

/// Image store backed by a directory on the local filesystem.
#[derive(Clone, Debug)]
pub struct DiskImageStore {
    root: PathBuf,
}

impl DiskImageStore {
    /// Create a store rooted at `root`, creating the directory when missing.
    pub fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directory this store writes into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }
}

impl ImageStore for DiskImageStore {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        fs::write(self.path_for(file_name), bytes).map_err(|source| StorageError::Write {
            name: file_name.to_string(),
            source,
        })
    }

    fn delete(&self, file_name: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(file_name)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::warn!("Stored file {file_name} was already gone");
                Ok(())
            }
            Err(source) => Err(StorageError::Delete {
                name: file_name.to_string(),
                source,
            }),
        }
    }
}
