//! In-memory state storage modules.
//!
//! Stores manage runtime state that doesn't belong on disk between saves:
//! - `PortalRegistry` - Directory of every live portal endpoint

pub mod portal_registry;

// Re-export store types
pub use portal_registry::PortalRegistry;
