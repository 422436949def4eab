//! Riftgate Engine library.
//!
//! This crate contains the server-side portal subsystem:
//!
//! ## Structure
//!
//! - `stores/` - Concurrent in-memory state (the portal registry)
//! - `infrastructure/` - Ports and adapters for world save persistence

pub mod infrastructure;
pub mod stores;

pub use infrastructure::persistence::{
    DirtyFlag, FileSaveStore, MemorySaveStore, PortalRecord, PortalSaveRecord, WorldSaveData,
};
pub use infrastructure::ports::{DirtySink, NullDirtySink, SaveStorePort, StoreError};
pub use stores::PortalRegistry;
