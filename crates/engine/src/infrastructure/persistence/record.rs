//! Persisted record format for the portal registry.
//!
//! The container is a named list field `"Portals"`; each element carries
//! exactly four fields (`PortalId`, `Dimension`, `Position`, `State`). Every
//! field defaults when missing so containers written by older writers stay
//! loadable: an empty id or dimension makes the record skippable, an unknown
//! state name decodes to `INACTIVE`.

use serde::{Deserialize, Serialize};

use riftgate_domain::{BlockPos, DimensionId, DomainError, Portal, PortalId, PortalState};

/// Top-level persisted container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortalSaveRecord {
    #[serde(rename = "Portals", default)]
    pub portals: Vec<PortalRecord>,
}

/// One persisted portal endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortalRecord {
    /// Canonical UUID text form of the portal id.
    #[serde(rename = "PortalId", default)]
    pub portal_id: String,
    /// `namespace:path` dimension identifier.
    #[serde(rename = "Dimension", default)]
    pub dimension: String,
    /// Packed 64-bit block position (see [`BlockPos::as_long`]).
    #[serde(rename = "Position", default)]
    pub position: i64,
    /// Lifecycle state name; unknown values decode to `INACTIVE`.
    #[serde(rename = "State", default)]
    pub state: String,
}

impl PortalRecord {
    pub fn from_portal(portal: &Portal) -> Self {
        Self {
            portal_id: portal.id().to_string(),
            dimension: portal.dimension().to_string(),
            position: portal.position().as_long(),
            state: portal.state().name().to_string(),
        }
    }

    /// Decode back into a portal entity.
    ///
    /// Fails on an unparseable id or dimension (the caller skips the record);
    /// position and state decoding are total.
    pub fn decode(&self) -> Result<Portal, DomainError> {
        let id: PortalId = self.portal_id.parse()?;
        let dimension = DimensionId::parse(&self.dimension)?;
        let position = BlockPos::from_long(self.position);
        let state = PortalState::from_name(&self.state);
        Ok(Portal::restore(id, dimension, position, state))
    }
}
