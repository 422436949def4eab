//! Portal endpoint entity and its activation lifecycle
//!
//! A portal endpoint is one side of a link between two dimensions. Its
//! lifecycle is linear: a freshly framed portal is `Inactive`, igniting it
//! makes it `Activated` (one-way traversable), a completed crossing drops it
//! to `Deactivated`, and a stabilization action makes it `Stabilized`
//! (two-way, permanent). `Stabilized` never regresses.
//!
//! The entity is plain data; registry-aware mutation (dirty marking, index
//! bookkeeping) lives in the engine's `PortalRegistry`.

use serde::{Deserialize, Serialize};

use crate::block_pos::BlockPos;
use crate::dimension::DimensionId;
use crate::ids::PortalId;

/// Activation lifecycle state of one portal endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortalState {
    /// Frame built, not yet ignited
    Inactive,
    /// Ignited; traversable one-way toward the paired dimension
    Activated,
    /// A traveler completed the one-way crossing; no longer traversable
    Deactivated,
    /// Permanently traversable in both directions (terminal)
    Stabilized,
}

impl PortalState {
    /// Whether a traveler can currently enter this endpoint.
    pub fn allows_travel(&self) -> bool {
        matches!(self, Self::Activated | Self::Stabilized)
    }

    /// Whether travel works in both directions.
    pub fn is_bidirectional(&self) -> bool {
        matches!(self, Self::Stabilized)
    }

    /// Whether the frame holds portal blocks (everything after ignition).
    pub fn has_portal_blocks(&self) -> bool {
        !matches!(self, Self::Inactive)
    }

    /// Whether the stabilization action applies to this endpoint.
    pub fn can_be_stabilized(&self) -> bool {
        matches!(self, Self::Deactivated)
    }

    /// Check if this is a terminal state (no further transitions expected)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stabilized)
    }

    /// Whether the linear lifecycle permits moving to `next`.
    ///
    /// `Stabilized -> Stabilized` is permitted as a no-op; no other
    /// self-transition or regression is.
    pub fn can_transition_to(&self, next: PortalState) -> bool {
        matches!(
            (self, next),
            (Self::Inactive, Self::Activated)
                | (Self::Activated, Self::Deactivated)
                | (Self::Deactivated, Self::Stabilized)
                | (Self::Stabilized, Self::Stabilized)
        )
    }

    /// Canonical persisted name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Inactive => "INACTIVE",
            Self::Activated => "ACTIVATED",
            Self::Deactivated => "DEACTIVATED",
            Self::Stabilized => "STABILIZED",
        }
    }

    /// Resolve a persisted state name, case-insensitively.
    ///
    /// Unknown or missing names decode to `Inactive` so that records written
    /// by unrecognized writers stay loadable.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "ACTIVATED" => Self::Activated,
            "DEACTIVATED" => Self::Deactivated,
            "STABILIZED" => Self::Stabilized,
            _ => Self::Inactive,
        }
    }
}

impl std::fmt::Display for PortalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One physical portal endpoint.
///
/// Identity is the `id` alone; dimension and position are immutable after
/// construction (a portal that moves is a new portal).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portal {
    id: PortalId,
    dimension: DimensionId,
    position: BlockPos,
    state: PortalState,
}

impl Portal {
    /// Create a freshly framed portal endpoint.
    pub fn new(dimension: DimensionId, position: BlockPos) -> Self {
        Self {
            id: PortalId::new(),
            dimension,
            position,
            state: PortalState::Inactive,
        }
    }

    /// Rebuild a persisted portal endpoint.
    pub fn restore(
        id: PortalId,
        dimension: DimensionId,
        position: BlockPos,
        state: PortalState,
    ) -> Self {
        Self {
            id,
            dimension,
            position,
            state,
        }
    }

    pub fn with_state(mut self, state: PortalState) -> Self {
        self.state = state;
        self
    }

    pub fn id(&self) -> PortalId {
        self.id
    }

    pub fn dimension(&self) -> &DimensionId {
        &self.dimension
    }

    pub fn position(&self) -> BlockPos {
        self.position
    }

    pub fn state(&self) -> PortalState {
        self.state
    }

    /// Unconditional state write at the data level.
    ///
    /// Lifecycle policy (including the terminal `Stabilized` rule) is
    /// enforced by the registry, which is also responsible for marking the
    /// world save data dirty.
    pub fn set_state(&mut self, state: PortalState) {
        self.state = state;
    }
}

impl PartialEq for Portal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Portal {}

impl std::hash::Hash for Portal {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
