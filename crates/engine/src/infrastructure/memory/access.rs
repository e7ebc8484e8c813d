use crate::infrastructure::ports::{DenialReason, NotifierPort, PermissionPort};
use structmover_domain::{Cuboid, MotionResult, PlayerId, StructureId, WorldId};

/// Permission adapter for hosts without region guards.
#[derive(Debug, Default)]
pub struct AllowAll;

impl PermissionPort for AllowAll {
    fn can_modify(
        &self,
        _actor: PlayerId,
        _world: WorldId,
        _region: &Cuboid,
    ) -> Option<DenialReason> {
        None
    }
}

/// Notifier that only logs outcomes.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl NotifierPort for TracingNotifier {
    fn notify(&self, owner: PlayerId, structure: StructureId, result: MotionResult) {
        tracing::info!(
            owner = %owner,
            structure_id = %structure,
            result = %result,
            "Structure motion result"
        );
    }
}
