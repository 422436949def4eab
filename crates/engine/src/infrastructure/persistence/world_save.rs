//! World save data collaborator.
//!
//! Sits between the portal registry and a [`SaveStorePort`]: the registry
//! marks the shared [`DirtyFlag`] on every mutation, and the world's save
//! loop asks [`WorldSaveData::save_if_dirty`] to flush at its next save
//! opportunity. Loading happens once when the owning world initializes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::infrastructure::persistence::record::PortalSaveRecord;
use crate::infrastructure::ports::{DirtySink, SaveStorePort, StoreError};
use crate::stores::PortalRegistry;

/// Shared dirty flag linking the registry to its persistence collaborator.
#[derive(Debug, Default)]
pub struct DirtyFlag(AtomicBool);

impl DirtyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dirty(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clear the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

impl DirtySink for DirtyFlag {
    fn mark_dirty(&self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Persistence collaborator owning the registry's save/load lifecycle.
pub struct WorldSaveData {
    registry: Arc<PortalRegistry>,
    flag: Arc<DirtyFlag>,
    store: Arc<dyn SaveStorePort>,
    last_saved_at: Mutex<Option<DateTime<Utc>>>,
}

impl WorldSaveData {
    /// Wire up a fresh registry, its dirty flag, and the given store.
    ///
    /// Returns the registry handle separately so the composition root can
    /// inject it into whatever constructs and queries portals.
    pub fn bootstrap(store: Arc<dyn SaveStorePort>) -> (Arc<PortalRegistry>, Self) {
        let flag = Arc::new(DirtyFlag::new());
        let registry = Arc::new(PortalRegistry::new(flag.clone()));
        let save_data = Self {
            registry: Arc::clone(&registry),
            flag,
            store,
            last_saved_at: Mutex::new(None),
        };
        (registry, save_data)
    }

    pub fn registry(&self) -> &Arc<PortalRegistry> {
        &self.registry
    }

    pub fn is_dirty(&self) -> bool {
        self.flag.is_dirty()
    }

    pub fn mark_dirty(&self) {
        self.flag.mark_dirty();
    }

    /// Timestamp of the last successful save, for diagnostics.
    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .to_owned()
    }

    /// Load the persisted container into the registry.
    ///
    /// A store that has never been written is a fresh world; a container
    /// that fails to decode leaves the registry cleared rather than
    /// half-loaded. Either way the world starts clean (not dirty).
    pub async fn load(&self) -> Result<(), StoreError> {
        let result = match self.store.read().await? {
            Some(bytes) => match serde_json::from_slice::<PortalSaveRecord>(&bytes) {
                Ok(record) => {
                    self.registry.load_from_record(&record);
                    Ok(())
                }
                Err(e) => {
                    self.registry.clear();
                    Err(StoreError::Decode(e))
                }
            },
            None => {
                self.registry.clear();
                tracing::debug!("No portal save data found, starting fresh");
                Ok(())
            }
        };
        // load_from_record re-registers everything, which sets the flag; a
        // freshly loaded world has nothing new to persist.
        self.flag.take();
        result
    }

    /// Encode the registry and write it through the store.
    pub async fn save(&self) -> Result<(), StoreError> {
        let record = self.registry.save_to_record();
        let bytes = serde_json::to_vec(&record).map_err(StoreError::Encode)?;
        self.store.write(&bytes).await?;

        *self
            .last_saved_at
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Utc::now());
        self.flag.take();
        Ok(())
    }

    /// Save only when a mutation has happened since the last save.
    /// Returns whether a write was performed.
    pub async fn save_if_dirty(&self) -> Result<bool, StoreError> {
        if !self.flag.is_dirty() {
            return Ok(false);
        }
        self.save().await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::memory_store::MemorySaveStore;
    use crate::infrastructure::persistence::record::PortalRecord;
    use riftgate_domain::{BlockPos, DimensionId, Portal, PortalState};
    use std::collections::HashSet;

    fn overworld() -> DimensionId {
        DimensionId::parse("overworld").expect("valid identifier")
    }

    fn tuples(registry: &PortalRegistry) -> HashSet<(String, String, i64, String)> {
        registry
            .all_portals()
            .iter()
            .map(|p| {
                (
                    p.id().to_string(),
                    p.dimension().to_string(),
                    p.position().as_long(),
                    p.state().name().to_string(),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn mutations_dirty_the_save_data_and_save_clears_it() {
        let (registry, save_data) = WorldSaveData::bootstrap(Arc::new(MemorySaveStore::new()));
        assert!(!save_data.is_dirty());

        registry.register(Portal::new(overworld(), BlockPos::new(1, 64, 1)));
        assert!(save_data.is_dirty());

        assert!(save_data.save_if_dirty().await.expect("save succeeds"));
        assert!(!save_data.is_dirty());
        assert!(save_data.last_saved_at().is_some());

        // Nothing changed: the next sweep is a no-op.
        assert!(!save_data.save_if_dirty().await.expect("save succeeds"));
    }

    #[tokio::test]
    async fn loading_a_missing_container_is_a_fresh_world() {
        let (registry, save_data) = WorldSaveData::bootstrap(Arc::new(MemorySaveStore::new()));
        save_data.load().await.expect("load succeeds");
        assert!(registry.is_empty());
        assert!(!save_data.is_dirty());
    }

    #[tokio::test]
    async fn save_load_round_trip_preserves_every_tuple() {
        let store = Arc::new(MemorySaveStore::new());
        let (registry, save_data) = WorldSaveData::bootstrap(Arc::clone(&store) as Arc<dyn SaveStorePort>);

        let hollow = DimensionId::parse("riftgate:hollow").expect("valid identifier");
        registry.register(Portal::new(overworld(), BlockPos::new(10, 64, 10)));
        registry.register(
            Portal::new(overworld(), BlockPos::new(-40, 12, 7)).with_state(PortalState::Activated),
        );
        registry.register(
            Portal::new(hollow, BlockPos::new(0, 90, 0)).with_state(PortalState::Stabilized),
        );
        let before = tuples(&registry);

        save_data.save().await.expect("save succeeds");

        // Simulate a restart against the same store.
        let (reloaded, reloaded_save) = WorldSaveData::bootstrap(store);
        reloaded_save.load().await.expect("load succeeds");
        assert_eq!(tuples(&reloaded), before);
    }

    #[tokio::test]
    async fn malformed_records_are_skipped_not_fatal() {
        let good = Portal::new(overworld(), BlockPos::new(3, 60, 3));
        let container = PortalSaveRecord {
            portals: vec![
                PortalRecord {
                    portal_id: String::new(), // missing id: skip
                    dimension: "overworld".to_string(),
                    position: 0,
                    state: "ACTIVATED".to_string(),
                },
                PortalRecord::from_portal(&good),
                PortalRecord {
                    portal_id: uuid::Uuid::new_v4().to_string(),
                    dimension: "Not A Dimension".to_string(), // bad text: skip
                    position: 9,
                    state: String::new(),
                },
            ],
        };
        let bytes = serde_json::to_vec(&container).expect("serializes");

        let (registry, save_data) =
            WorldSaveData::bootstrap(Arc::new(MemorySaveStore::with_bytes(bytes)));
        save_data.load().await.expect("load succeeds");

        assert_eq!(registry.len(), 1);
        assert!(registry.get(good.id()).is_some());
    }

    #[tokio::test]
    async fn undecodable_container_leaves_registry_cleared() {
        let (registry, save_data) =
            WorldSaveData::bootstrap(Arc::new(MemorySaveStore::with_bytes(b"not json".to_vec())));
        registry.register(Portal::new(overworld(), BlockPos::new(1, 1, 1)));

        let result = save_data.load().await;
        assert!(matches!(result, Err(StoreError::Decode(_))));
        assert!(registry.is_empty());
    }

    /// The end-to-end lifecycle: register, query, transition, save, clear,
    /// reload, and the transitioned state survives the restart.
    #[tokio::test]
    async fn portal_state_survives_a_save_and_reload() {
        let store = Arc::new(MemorySaveStore::new());
        let (registry, save_data) = WorldSaveData::bootstrap(Arc::clone(&store) as Arc<dyn SaveStorePort>);

        let portal = Portal::new(overworld(), BlockPos::new(10, 64, 10));
        let id = portal.id();
        registry.register(portal);

        let members = registry.portals_in(&overworld());
        assert_eq!(members.len(), 1);
        assert!(members.contains(&id));

        registry
            .set_state(id, PortalState::Activated)
            .expect("portal is registered");

        let record = registry.save_to_record();
        assert_eq!(record.portals.len(), 1);
        assert_eq!(record.portals[0].portal_id, id.to_string());
        assert_eq!(record.portals[0].dimension, "riftgate:overworld");
        assert_eq!(
            record.portals[0].position,
            BlockPos::new(10, 64, 10).as_long()
        );
        assert_eq!(record.portals[0].state, "ACTIVATED");

        save_data.save().await.expect("save succeeds");
        registry.clear();
        assert!(registry.is_empty());

        save_data.load().await.expect("load succeeds");
        assert_eq!(
            registry.get(id).map(|p| p.state()),
            Some(PortalState::Activated)
        );
    }
}
