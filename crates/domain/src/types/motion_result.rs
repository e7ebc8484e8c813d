//! Caller-facing outcome of a toggle request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of asking an opener to move a structure.
///
/// Every variant except `Success` and `TooBig { instant_opened: true }`
/// guarantees that no structure state was mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum MotionResult {
    /// A mover was committed
    Success,
    /// Another animation of this structure is in flight; retry later
    Busy,
    /// An environment precondition failed (region not loaded, bad shape)
    Error,
    /// No direction leads to a free destination
    NoDirection,
    /// The owner may not modify the destination region
    NoPermission,
    /// The structure is locked
    Locked,
    /// The archetype is disabled in configuration
    TypeDisabled,
    /// The structure exceeds a size limit. With `instant_opened` the move
    /// still happened, degraded to an instant relocation.
    TooBig { instant_opened: bool },
}

impl MotionResult {
    /// True when the structure was (or is being) moved.
    pub fn is_committed(&self) -> bool {
        matches!(
            self,
            Self::Success
                | Self::TooBig {
                    instant_opened: true
                }
        )
    }

    /// Results worth telling the owner about.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Self::Success)
    }
}

impl fmt::Display for MotionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Busy => write!(f, "structure is busy"),
            Self::Error => write!(f, "structure could not be moved"),
            Self::NoDirection => write!(f, "no free direction to move in"),
            Self::NoPermission => write!(f, "no permission to modify the destination"),
            Self::Locked => write!(f, "structure is locked"),
            Self::TypeDisabled => write!(f, "structure type is disabled"),
            Self::TooBig { instant_opened: true } => {
                write!(f, "structure too big to animate, moved instantly")
            }
            Self::TooBig {
                instant_opened: false,
            } => write!(f, "structure too big to move"),
        }
    }
}
