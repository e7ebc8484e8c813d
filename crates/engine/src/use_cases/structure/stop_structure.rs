//! Stop structure use case.

use std::sync::Arc;

use structmover_domain::StructureId;

use crate::stores::ActivityStore;

/// Cuts an animation short.
///
/// Cancellation is cooperative: the mover notices the flag on its next tick
/// and finalizes in abort mode, committing the structure to its destination
/// without scheduling auto-close.
pub struct StopStructure {
    activity: Arc<ActivityStore>,
}

impl StopStructure {
    pub fn new(activity: Arc<ActivityStore>) -> Self {
        Self { activity }
    }

    /// Returns false when the structure was not moving.
    pub fn execute(&self, id: StructureId) -> bool {
        let stopped = self.activity.cancel(id);
        if stopped {
            tracing::info!(structure_id = %id, "Stop requested");
        } else {
            tracing::debug!(structure_id = %id, "Stop requested for idle structure");
        }
        stopped
    }
}
