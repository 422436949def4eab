//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete
//! types. Ports exist for:
//! - Save storage (could swap flat file -> region file / database)
//! - Dirty notification (so the registry never holds a back-reference to the
//!   persistence collaborator)

use async_trait::async_trait;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Save store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode save record: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Failed to decode save record: {0}")]
    Decode(#[source] serde_json::Error),
}

// =============================================================================
// Ports
// =============================================================================

/// Observer of registry mutations.
///
/// Implementations schedule a rewrite of persisted state; the call must be
/// cheap and non-blocking since it sits on the register/unregister hot path.
pub trait DirtySink: Send + Sync {
    fn mark_dirty(&self);
}

/// Sink for registries with no persistence collaborator attached (tests,
/// one-shot tooling).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDirtySink;

impl DirtySink for NullDirtySink {
    fn mark_dirty(&self) {}
}

/// Byte-oriented storage for the portal save container.
///
/// The registry's encode/decode is pure in-memory; all I/O funnels through
/// this port.
#[async_trait]
pub trait SaveStorePort: Send + Sync {
    /// Read the whole container, or `None` if it has never been written.
    async fn read(&self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the whole container.
    async fn write(&self, bytes: &[u8]) -> Result<(), StoreError>;
}
