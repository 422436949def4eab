//! Flat-file save store adapter.
//!
//! Writes go to a temporary file in the target directory and are atomically
//! renamed into place, so a crash mid-write can never leave a truncated
//! container behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::infrastructure::ports::{SaveStorePort, StoreError};

/// [`SaveStorePort`] backed by a single file on disk.
pub struct FileSaveStore {
    path: PathBuf,
}

impl FileSaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SaveStorePort for FileSaveStore {
    async fn read(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn write(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.path.clone();
        let bytes = bytes.to_vec();

        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            std::fs::create_dir_all(&dir)?;

            let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
            tmp.write_all(&bytes)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| StoreError::Io(std::io::Error::other(e)))?
    }
}
