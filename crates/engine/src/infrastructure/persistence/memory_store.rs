//! In-memory save store for development and testing
//!
//! Holds the container bytes in memory only; suitable for tests and
//! one-shot tooling, never for a real world.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{SaveStorePort, StoreError};

/// In-memory [`SaveStorePort`] implementation.
#[derive(Default)]
pub struct MemorySaveStore {
    bytes: RwLock<Option<Vec<u8>>>,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the store, as if a previous process had written it.
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: RwLock::new(Some(bytes)),
        }
    }
}

#[async_trait]
impl SaveStorePort for MemorySaveStore {
    async fn read(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.bytes.read().await.clone())
    }

    async fn write(&self, bytes: &[u8]) -> Result<(), StoreError> {
        *self.bytes.write().await = Some(bytes.to_vec());
        Ok(())
    }
}
