//! World save persistence: the record format, storage adapters, and the
//! save-data collaborator that observes the registry's dirty flag.

pub mod file_store;
pub mod memory_store;
pub mod record;
pub mod world_save;

pub use file_store::FileSaveStore;
pub use memory_store::MemorySaveStore;
pub use record::{PortalRecord, PortalSaveRecord};
pub use world_save::{DirtyFlag, WorldSaveData};
