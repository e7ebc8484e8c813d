//! Captured voxel payload.

use serde::{Deserialize, Serialize};

use super::{Axis, BlockFace};

/// Broad category of a voxel, used for passability and movability checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockCategory {
    Air,
    Liquid,
    Solid,
    /// Tile entities with inventories; never detached.
    Container,
}

/// Orientation state carried by directional blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    None,
    /// Stairs, buttons, torches: point at a face.
    Facing(BlockFace),
    /// Logs, pillars: aligned with an axis.
    Aligned(Axis),
}

impl Orientation {
    /// Orientation after a quarter turn about `axis`.
    pub fn rotated(self, axis: Axis, positive: bool) -> Self {
        match self {
            Self::None => Self::None,
            Self::Facing(face) => {
                let turned = face.offset().rotate_quarter(axis, positive);
                BlockFace::from_offset(turned).map_or(self, Self::Facing)
            }
            Self::Aligned(aligned) if aligned == axis => self,
            Self::Aligned(aligned) => Self::Aligned(match (axis, aligned) {
                (Axis::Y, Axis::X) => Axis::Z,
                (Axis::Y, _) => Axis::X,
                (Axis::X, Axis::Y) => Axis::Z,
                (Axis::X, _) => Axis::Y,
                (Axis::Z, Axis::X) => Axis::Y,
                (Axis::Z, _) => Axis::X,
            }),
        }
    }
}

/// Material and state of one voxel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockData {
    pub material: String,
    pub category: BlockCategory,
    #[serde(default)]
    pub orientation: Orientation,
}

impl BlockData {
    pub fn air() -> Self {
        Self {
            material: "air".to_string(),
            category: BlockCategory::Air,
            orientation: Orientation::None,
        }
    }

    pub fn solid(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            category: BlockCategory::Solid,
            orientation: Orientation::None,
        }
    }

    pub fn liquid(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            category: BlockCategory::Liquid,
            orientation: Orientation::None,
        }
    }

    pub fn container(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            category: BlockCategory::Container,
            orientation: Orientation::None,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn is_air(&self) -> bool {
        self.category == BlockCategory::Air
    }

    /// Air and liquids do not obstruct a moving structure.
    pub fn is_passable(&self) -> bool {
        matches!(self.category, BlockCategory::Air | BlockCategory::Liquid)
    }

    pub fn can_rotate(&self) -> bool {
        self.orientation != Orientation::None
    }

    /// Payload after a quarter turn about `axis`, if its orientation changes.
    pub fn rotated(&self, axis: Axis, positive: bool) -> Option<Self> {
        let orientation = self.orientation.rotated(axis, positive);
        (orientation != self.orientation).then(|| Self {
            orientation,
            ..self.clone()
        })
    }
}
