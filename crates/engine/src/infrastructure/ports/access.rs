//! Access control and owner notification ports.

use std::fmt;

use structmover_domain::{Cuboid, MotionResult, PlayerId, StructureId, WorldId};

/// Why a region guard refused a modification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenialReason {
    /// Name of the guard that refused (region plugin, claim system, ...)
    pub guard: String,
    pub message: String,
}

impl DenialReason {
    pub fn new(guard: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            guard: guard.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.guard, self.message)
    }
}

/// Checks whether an actor may modify a region.
#[cfg_attr(test, mockall::automock)]
pub trait PermissionPort: Send + Sync {
    fn can_modify(&self, actor: PlayerId, world: WorldId, region: &Cuboid)
        -> Option<DenialReason>;
}

/// Delivers user-visible outcomes to a structure's owner.
#[cfg_attr(test, mockall::automock)]
pub trait NotifierPort: Send + Sync {
    fn notify(&self, owner: PlayerId, structure: StructureId, result: MotionResult);
}
