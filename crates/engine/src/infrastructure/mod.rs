//! Infrastructure layer: ports and adapters for world save persistence.

pub mod persistence;
pub mod ports;
