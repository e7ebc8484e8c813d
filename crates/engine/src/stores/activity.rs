//! Busy-flag registry.
//!
//! At most one mover may animate or finalize a structure at a time. Openers
//! claim a structure with [`ActivityStore::try_acquire`], which is the sole
//! admission gate; the entry is released by the mover's finalize, after an
//! optional cooldown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::infrastructure::ports::TaskHandle;
use crate::movers::BlockMover;
use structmover_domain::StructureId;

struct Activity {
    /// Cooperative cancel flag checked by the mover every tick
    cancel: TaskHandle,
    mover: Option<Arc<BlockMover>>,
}

pub struct ActivityStore {
    entries: DashMap<StructureId, Activity>,
    /// Global "may continue" gate, closed on shutdown
    running: AtomicBool,
}

impl ActivityStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            running: AtomicBool::new(true),
        }
    }

    /// Atomically mark `id` busy. Returns the cancel flag of the new
    /// activity, or `None` when the structure is already busy or the engine
    /// is shutting down.
    pub fn try_acquire(&self, id: StructureId) -> Option<TaskHandle> {
        if !self.may_continue() {
            return None;
        }
        match self.entries.entry(id) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let cancel = TaskHandle::new();
                slot.insert(Activity {
                    cancel: cancel.clone(),
                    mover: None,
                });
                Some(cancel)
            }
        }
    }

    /// Record the mover driving an acquired structure.
    pub fn attach(&self, id: StructureId, mover: Arc<BlockMover>) {
        if let Some(mut activity) = self.entries.get_mut(&id) {
            activity.mover = Some(mover);
        }
    }

    pub fn release(&self, id: StructureId) {
        if self.entries.remove(&id).is_some() {
            tracing::debug!(structure_id = %id, "Released busy flag");
        }
    }

    pub fn is_busy(&self, id: StructureId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    /// Raise the cancel flag of a busy structure. Returns false when the
    /// structure is idle.
    pub fn cancel(&self, id: StructureId) -> bool {
        match self.entries.get(&id) {
            Some(activity) => {
                activity.cancel.cancel();
                true
            }
            None => false,
        }
    }

    pub fn may_continue(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Close the gate, cancel every activity and hand back the movers still
    /// attached so the caller can finalize them.
    pub fn shutdown(&self) -> Vec<Arc<BlockMover>> {
        self.running.store(false, Ordering::SeqCst);
        self.entries
            .iter()
            .filter_map(|activity| {
                activity.cancel.cancel();
                activity.mover.clone()
            })
            .collect()
    }
}

impl Default for ActivityStore {
    fn default() -> Self {
        Self::new()
    }
}
