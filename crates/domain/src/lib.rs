pub mod block_pos;
pub mod dimension;
pub mod error;
pub mod ids;
pub mod portal;

pub use block_pos::BlockPos;
pub use dimension::DimensionId;
pub use error::DomainError;
pub use ids::PortalId;
pub use portal::{Portal, PortalState};
