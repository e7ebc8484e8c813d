//! Structure archetypes.
//!
//! Each archetype has its own motion law. Translating archetypes slide along
//! an axis, rotating archetypes swing a quarter turn about a hinge, and
//! continuous archetypes spin or wave in place without a destination.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The archetype of a persisted structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureType {
    /// Swings a quarter turn about a vertical hinge column
    Door,
    /// Flaps a quarter turn about a horizontal hinge edge
    Drawbridge,
    /// Slides vertically into free space above or below
    Portcullis,
    /// Vertical mover with a fixed travel distance
    Elevator,
    /// Slides horizontally in one of the four compass directions
    SlidingDoor,
    /// Rolls up onto (or down from) an overhead track
    GarageDoor,
    /// Spins about a horizontal axis through its engine
    Windmill,
    /// Spins about a vertical axis through its engine
    RevolvingDoor,
    /// Waves in place around its pole
    Flag,
}

impl StructureType {
    pub const ALL: [StructureType; 9] = [
        Self::Door,
        Self::Drawbridge,
        Self::Portcullis,
        Self::Elevator,
        Self::SlidingDoor,
        Self::GarageDoor,
        Self::Windmill,
        Self::RevolvingDoor,
        Self::Flag,
    ];

    /// Continuous archetypes never reach a destination and never toggle
    /// their open state.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::Windmill | Self::RevolvingDoor | Self::Flag)
    }

    /// Archetypes that move by pure translation.
    pub fn is_translating(&self) -> bool {
        matches!(self, Self::Portcullis | Self::Elevator | Self::SlidingDoor)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Door => "door",
            Self::Drawbridge => "drawbridge",
            Self::Portcullis => "portcullis",
            Self::Elevator => "elevator",
            Self::SlidingDoor => "sliding_door",
            Self::GarageDoor => "garage_door",
            Self::Windmill => "windmill",
            Self::RevolvingDoor => "revolving_door",
            Self::Flag => "flag",
        }
    }
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StructureType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .or(match normalized.as_str() {
                "bridge" => Some(Self::Drawbridge),
                "sliding" | "slidingdoor" => Some(Self::SlidingDoor),
                "garage" | "garagedoor" => Some(Self::GarageDoor),
                "revolving" | "revolvingdoor" => Some(Self::RevolvingDoor),
                _ => None,
            })
            .ok_or_else(|| DomainError::parse(format!("Unknown structure type: {}", s)))
    }
}
