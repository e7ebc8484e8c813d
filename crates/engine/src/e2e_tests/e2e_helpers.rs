//! E2E test helpers for constructing the full application stack.
//!
//! Wires an [`App`] to the in-memory adapters and a [`ManualScheduler`], so
//! whole open/close cycles run deterministically in a single thread.

use std::sync::Arc;

use structmover_domain::{BlockData, BlockPos, Cuboid, MotionResult, Structure, StructureId};

use crate::app::{Adapters, App};
use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::memory::{
    AllowAll, InMemoryProxies, InMemoryStructureStore, InMemoryWorld, TracingNotifier,
};
use crate::infrastructure::ports::StructureStorePort;
use crate::test_fixtures::structures::build;
use crate::test_fixtures::ManualScheduler;

/// Ticks after which a scenario is considered stuck.
const SETTLE_LIMIT: u64 = 20_000;

pub struct TestEngine {
    pub app: App,
    pub scheduler: Arc<ManualScheduler>,
    pub world: Arc<InMemoryWorld>,
    pub proxies: Arc<InMemoryProxies>,
    pub store: Arc<InMemoryStructureStore>,
}

impl TestEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let scheduler = Arc::new(ManualScheduler::new());
        let world = Arc::new(InMemoryWorld::new());
        let proxies = Arc::new(InMemoryProxies::new());
        let store = Arc::new(InMemoryStructureStore::new());
        scheduler.attach_physics(proxies.clone());

        let app = App::new(
            config,
            Adapters {
                world: world.clone(),
                proxies: proxies.clone(),
                scheduler: scheduler.clone(),
                store: store.clone(),
                clock: scheduler.clock(),
                permissions: Arc::new(AllowAll),
                notifier: Arc::new(TracingNotifier),
            },
        );
        Self {
            app,
            scheduler,
            world,
            proxies,
            store,
        }
    }

    /// Build `structure` in the world and persist it.
    pub fn place(&self, structure: &Structure) {
        build(&self.world, structure);
        self.store.insert(structure.clone());
    }

    pub fn toggle(&self, id: StructureId) -> MotionResult {
        self.app.toggle(id, 0.0, false, true)
    }

    pub fn toggle_instant(&self, id: StructureId) -> MotionResult {
        self.app.toggle(id, 0.0, true, true)
    }

    /// Run until no timer is pending.
    pub fn settle(&self) {
        let advanced = self.scheduler.run_until_idle(SETTLE_LIMIT);
        assert!(advanced < SETTLE_LIMIT, "scenario did not settle");
    }

    pub fn stored(&self, id: StructureId) -> Structure {
        match self.store.get(id) {
            Ok(Some(structure)) => structure,
            other => panic!("structure {id} missing from store: {other:?}"),
        }
    }

    pub fn is_busy(&self, id: StructureId) -> bool {
        self.app.stores.activity.is_busy(id)
    }

    /// Non-air voxels within `margin` blocks of `structure`'s box.
    pub fn layout(&self, structure: &Structure, margin: i32) -> Vec<(BlockPos, BlockData)> {
        let pad = BlockPos::new(margin, margin, margin);
        let region = Cuboid::from_corners(
            structure.cuboid().min() - pad,
            structure.cuboid().max() + pad,
        );
        self.world.snapshot(structure.world_id(), &region)
    }
}
