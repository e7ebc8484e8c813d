//! Application state and composition.

use std::sync::Arc;

use structmover_domain::{MotionResult, StructureId};

use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::ports::{
    ClockPort, NotifierPort, PermissionPort, ProxyFactoryPort, SchedulerPort, StructureStorePort,
    VoxelWorldPort,
};
use crate::movers::MoverContext;
use crate::stores::{ActivityStore, AutoCloseStore};
use crate::use_cases::{OpenStructure, StopStructure, StructureUseCases};

/// Host-provided port implementations.
pub struct Adapters {
    pub world: Arc<dyn VoxelWorldPort>,
    pub proxies: Arc<dyn ProxyFactoryPort>,
    pub scheduler: Arc<dyn SchedulerPort>,
    pub store: Arc<dyn StructureStorePort>,
    pub clock: Arc<dyn ClockPort>,
    pub permissions: Arc<dyn PermissionPort>,
    pub notifier: Arc<dyn NotifierPort>,
}

/// Process-scoped registries shared by openers and movers.
pub struct Stores {
    pub activity: Arc<ActivityStore>,
    pub auto_close: Arc<AutoCloseStore>,
}

/// Container for all use cases.
pub struct UseCases {
    pub structure: StructureUseCases,
}

/// Main application state.
pub struct App {
    pub config: Arc<EngineConfig>,
    pub structures: Arc<dyn StructureStorePort>,
    pub stores: Stores,
    pub use_cases: UseCases,
}

impl App {
    pub fn new(config: EngineConfig, adapters: Adapters) -> Self {
        let config = Arc::new(config);
        let stores = Stores {
            activity: Arc::new(ActivityStore::new()),
            auto_close: Arc::new(AutoCloseStore::new(adapters.scheduler.clone())),
        };

        let ctx = MoverContext {
            world: adapters.world,
            proxies: adapters.proxies,
            scheduler: adapters.scheduler,
            store: adapters.store.clone(),
            clock: adapters.clock,
            activity: stores.activity.clone(),
            auto_close: stores.auto_close.clone(),
            settings: Arc::new(config.mover_settings()),
        };
        let open = Arc::new(OpenStructure::new(
            ctx,
            adapters.permissions,
            adapters.notifier,
            config.clone(),
        ));
        let stop = Arc::new(StopStructure::new(stores.activity.clone()));

        Self {
            config,
            structures: adapters.store,
            stores,
            use_cases: UseCases {
                structure: StructureUseCases::new(open, stop),
            },
        }
    }

    /// Toggle a stored structure. Must run on the world context.
    pub fn toggle(
        &self,
        id: StructureId,
        duration_secs: f64,
        instant: bool,
        silent: bool,
    ) -> MotionResult {
        match self.structures.get(id) {
            Ok(Some(structure)) => {
                self.use_cases
                    .structure
                    .open
                    .execute(&structure, duration_secs, instant, silent)
            }
            Ok(None) => {
                tracing::warn!(structure_id = %id, "Unknown structure");
                MotionResult::Error
            }
            Err(err) => {
                tracing::error!(structure_id = %id, error = %err, "Failed to load structure");
                MotionResult::Error
            }
        }
    }

    /// Stop accepting moves, drop pending auto-closes and finalize every
    /// animation in flight. Returns the number of movers aborted.
    ///
    /// Must run on the world context.
    pub fn shutdown(&self) -> usize {
        let movers = self.stores.activity.shutdown();
        self.stores.auto_close.cancel_all();
        for mover in &movers {
            mover.abort();
        }
        tracing::info!(aborted = movers.len(), "Engine shut down");
        movers.len()
    }
}
