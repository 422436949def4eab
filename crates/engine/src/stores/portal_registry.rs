//! Directory of every live portal endpoint.
//!
//! The registry owns all registered [`Portal`]s and keeps three synchronized
//! views of them: by id (authoritative), by packed position, and by dimension
//! membership, plus a lazily rebuilt per-dimension snapshot cache for the
//! per-tick maintenance sweep.
//!
//! All index structures are DashMaps, so every operation completes in bounded
//! non-blocking time under concurrent access from tick tasks, interaction
//! handlers, and world load/save. Inside a mutation the id index is always
//! written first; derived indexes may briefly lag it but never lead it, so a
//! reader can never follow a derived entry to a missing portal and find stale
//! state the id index disagrees with for longer than the call itself.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;

use riftgate_domain::{BlockPos, DimensionId, DomainError, Portal, PortalId, PortalState};

use crate::infrastructure::persistence::{PortalRecord, PortalSaveRecord};
use crate::infrastructure::ports::DirtySink;

/// Key of the position index: a dimension plus the packed block position.
type PositionKey = (DimensionId, i64);

/// Concurrency-safe directory of all portal endpoints in the server.
///
/// Explicitly constructed and shared as an `Arc` by the composition root;
/// tests build isolated instances with [`NullDirtySink`].
///
/// [`NullDirtySink`]: crate::infrastructure::ports::NullDirtySink
pub struct PortalRegistry {
    /// Authoritative owner of every registered portal.
    by_id: DashMap<PortalId, Portal>,
    /// Derived index: dimension -> member portal ids.
    by_dimension: DashMap<DimensionId, HashSet<PortalId>>,
    /// Derived index: (dimension, packed position) -> portal id.
    by_position: DashMap<PositionKey, PortalId>,
    /// Invalidate-on-write, rebuild-on-read snapshots of `by_dimension`.
    dimension_view_cache: DashMap<DimensionId, Arc<HashSet<PortalId>>>,
    /// Persistence notification hook.
    dirty: Arc<dyn DirtySink>,
}

impl PortalRegistry {
    pub fn new(dirty: Arc<dyn DirtySink>) -> Self {
        Self {
            by_id: DashMap::new(),
            by_dimension: DashMap::new(),
            by_position: DashMap::new(),
            dimension_view_cache: DashMap::new(),
            dirty,
        }
    }

    /// Register a portal endpoint, replacing any previous registration with
    /// the same id everywhere (last-write-wins; a re-register is how callers
    /// force-reset an endpoint).
    pub fn register(&self, portal: Portal) {
        let id = portal.id();
        let dimension = portal.dimension().clone();
        let position_key = (dimension.clone(), portal.position().as_long());

        // Id index first: it is the source of truth the derived indexes
        // are allowed to lag behind.
        let displaced = self.by_id.insert(id, portal);

        // Scrub the displaced registration's derived entries when it lived
        // somewhere else.
        if let Some(old) = &displaced {
            let old_key = (old.dimension().clone(), old.position().as_long());
            if old_key != position_key {
                self.by_position.remove_if(&old_key, |_, mapped| *mapped == id);
            }
            if old.dimension() != &dimension {
                if let Some(mut members) = self.by_dimension.get_mut(old.dimension()) {
                    members.remove(&id);
                }
                self.dimension_view_cache.remove(old.dimension());
            }
        }

        self.by_position.insert(position_key, id);
        self.by_dimension.entry(dimension.clone()).or_default().insert(id);
        self.dimension_view_cache.remove(&dimension);

        self.dirty.mark_dirty();
        tracing::debug!(portal = %id, dimension = %dimension, "Registered portal");
    }

    /// Remove a portal from every index. Unknown ids are a no-op.
    pub fn unregister(&self, id: PortalId) -> Option<Portal> {
        let (_, portal) = self.by_id.remove(&id)?;

        let position_key = (portal.dimension().clone(), portal.position().as_long());
        self.by_position.remove_if(&position_key, |_, mapped| *mapped == id);
        if let Some(mut members) = self.by_dimension.get_mut(portal.dimension()) {
            members.remove(&id);
        }
        self.dimension_view_cache.remove(portal.dimension());

        self.dirty.mark_dirty();
        tracing::debug!(portal = %id, dimension = %portal.dimension(), "Unregistered portal");
        Some(portal)
    }

    /// O(1) lookup by id. A miss is normal control flow (e.g. a stale
    /// reference after a concurrent unregister), never an error.
    pub fn get(&self, id: PortalId) -> Option<Portal> {
        self.by_id.get(&id).map(|entry| entry.value().clone())
    }

    /// O(1) lookup by position, via the position index then the id index.
    pub fn get_at(&self, dimension: &DimensionId, position: BlockPos) -> Option<Portal> {
        let key = (dimension.clone(), position.as_long());
        let id = *self.by_position.get(&key)?;
        self.get(id)
    }

    /// Read-only snapshot of a dimension's portal ids.
    ///
    /// Served from the snapshot cache; the first call after any mutation in
    /// the dimension rebuilds it, so the per-tick hot path is allocation-free
    /// between mutations.
    pub fn portals_in(&self, dimension: &DimensionId) -> Arc<HashSet<PortalId>> {
        if let Some(snapshot) = self.dimension_view_cache.get(dimension) {
            return Arc::clone(snapshot.value());
        }

        // Rebuild while holding the cache key's entry. A concurrent mutation
        // cannot slip its invalidation between the read of `by_dimension`
        // and the install of the snapshot: its `remove` serializes after the
        // insert and deletes any snapshot that was stale on arrival.
        Arc::clone(
            self.dimension_view_cache
                .entry(dimension.clone())
                .or_insert_with(|| {
                    Arc::new(
                        self.by_dimension
                            .get(dimension)
                            .map(|members| members.value().clone())
                            .unwrap_or_default(),
                    )
                })
                .value(),
        )
    }

    /// Snapshot of every registered portal, for maintenance sweeps.
    pub fn all_portals(&self) -> Vec<Portal> {
        self.by_id.iter().map(|entry| entry.value().clone()).collect()
    }

    /// The registry-side mutation funnel for portal lifecycle state.
    ///
    /// Unconditional at the data level except that `Stabilized` never
    /// regresses: an attempt to leave it is a no-op returning the unchanged
    /// state, since stabilization is advertised to players as permanent.
    /// Returns the state the portal holds after the call.
    pub fn set_state(
        &self,
        id: PortalId,
        new_state: PortalState,
    ) -> Result<PortalState, DomainError> {
        let mut entry = self
            .by_id
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Portal", id.to_string()))?;

        let current = entry.state();
        if current == new_state {
            return Ok(current);
        }
        if current.is_terminal() {
            tracing::debug!(
                portal = %id,
                requested = %new_state,
                "Ignoring state change on stabilized portal"
            );
            return Ok(current);
        }

        entry.set_state(new_state);
        drop(entry);

        self.dirty.mark_dirty();
        tracing::debug!(portal = %id, state = %new_state, "Portal state changed");
        Ok(new_state)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Empty every index and the cache. Used on world unload; not
    /// transactional with persistence, so callers save first if they want
    /// the data retained.
    pub fn clear(&self) {
        self.by_id.clear();
        self.by_position.clear();
        self.by_dimension.clear();
        self.dimension_view_cache.clear();
    }

    /// Pure in-memory encode of every portal into the persisted container.
    pub fn save_to_record(&self) -> PortalSaveRecord {
        let portals: Vec<PortalRecord> = self
            .by_id
            .iter()
            .map(|entry| PortalRecord::from_portal(entry.value()))
            .collect();
        tracing::debug!(count = portals.len(), "Saved portals to record");
        PortalSaveRecord { portals }
    }

    /// Pure in-memory decode of the persisted container.
    ///
    /// Clears current state, then registers each record that decodes. A
    /// record with an unparseable id or dimension is skipped with a warning
    /// carrying its index; a bad state name decodes to `Inactive` (see
    /// [`PortalState::from_name`]) and never fails the load.
    pub fn load_from_record(&self, record: &PortalSaveRecord) {
        self.clear();

        let mut loaded = 0usize;
        for (index, portal_record) in record.portals.iter().enumerate() {
            match portal_record.decode() {
                Ok(portal) => {
                    self.register(portal);
                    loaded += 1;
                }
                Err(error) => {
                    tracing::warn!(index, %error, "Skipping malformed portal record");
                }
            }
        }
        tracing::debug!(count = loaded, "Loaded portals from record");
    }
}
