//! Auto-close timer registry.
//!
//! Single slot per structure: scheduling a new timer cancels the previous
//! one for the same structure.

use std::sync::Arc;

use dashmap::DashMap;

use crate::infrastructure::ports::{SchedulerPort, SyncTask, TaskHandle};
use structmover_domain::StructureId;

pub struct AutoCloseStore {
    timers: Arc<DashMap<StructureId, TaskHandle>>,
    scheduler: Arc<dyn SchedulerPort>,
}

impl AutoCloseStore {
    pub fn new(scheduler: Arc<dyn SchedulerPort>) -> Self {
        Self {
            timers: Arc::new(DashMap::new()),
            scheduler,
        }
    }

    /// Run `reopen` on the world context after `delay_ticks`, replacing any
    /// pending timer for `id`.
    pub fn schedule(&self, id: StructureId, delay_ticks: u64, reopen: SyncTask) {
        let timers = self.timers.clone();
        let handle = self.scheduler.run_delayed(
            Box::new(move || {
                timers.remove(&id);
                reopen();
            }),
            delay_ticks,
        );
        if let Some(previous) = self.timers.insert(id, handle) {
            previous.cancel();
            tracing::debug!(structure_id = %id, "Replaced pending auto-close");
        }
    }

    pub fn cancel(&self, id: StructureId) -> bool {
        match self.timers.remove(&id) {
            Some((_, handle)) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_scheduled(&self, id: StructureId) -> bool {
        self.timers.contains_key(&id)
    }

    pub fn cancel_all(&self) {
        self.timers.iter().for_each(|timer| timer.cancel());
        self.timers.clear();
    }
}
