//! Axis-aligned integer bounding cuboid.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Axis, BlockFace, BlockPos};
use crate::error::DomainError;

/// Inclusive axis-aligned box of voxels.
///
/// Invariant: `min <= max` component-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCuboid")]
pub struct Cuboid {
    min: BlockPos,
    max: BlockPos,
}

#[derive(Deserialize)]
struct RawCuboid {
    min: BlockPos,
    max: BlockPos,
}

impl TryFrom<RawCuboid> for Cuboid {
    type Error = DomainError;

    fn try_from(raw: RawCuboid) -> Result<Self, Self::Error> {
        Cuboid::new(raw.min, raw.max)
    }
}

impl Cuboid {
    /// Create a cuboid, rejecting inverted corners.
    pub fn new(min: BlockPos, max: BlockPos) -> Result<Self, DomainError> {
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Err(DomainError::validation(format!(
                "cuboid min {} exceeds max {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Create the smallest cuboid containing both corners, in any order.
    pub fn from_corners(a: BlockPos, b: BlockPos) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest cuboid containing every position, or `None` for no positions.
    pub fn enclosing(positions: impl IntoIterator<Item = BlockPos>) -> Option<Self> {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::from_corners(first, first), |acc, pos| Self {
            min: acc.min.min(pos),
            max: acc.max.max(pos),
        }))
    }

    pub fn min(&self) -> BlockPos {
        self.min
    }

    pub fn max(&self) -> BlockPos {
        self.max
    }

    /// Number of voxels along `axis`.
    pub fn size(&self, axis: Axis) -> i32 {
        self.max.component(axis) - self.min.component(axis) + 1
    }

    pub fn height(&self) -> i32 {
        self.size(Axis::Y)
    }

    pub fn volume(&self) -> u64 {
        [Axis::X, Axis::Y, Axis::Z]
            .into_iter()
            .map(|axis| self.size(axis) as u64)
            .product()
    }

    pub fn contains(&self, pos: BlockPos) -> bool {
        (self.min.x..=self.max.x).contains(&pos.x)
            && (self.min.y..=self.max.y).contains(&pos.y)
            && (self.min.z..=self.max.z).contains(&pos.z)
    }

    pub fn translate(&self, offset: BlockPos) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// The 1-voxel-thick layer of this cuboid lying on `face`.
    pub fn layer(&self, face: BlockFace) -> Self {
        let axis = face.axis();
        let value = if face.is_positive() {
            self.max.component(axis)
        } else {
            self.min.component(axis)
        };
        Self {
            min: self.min.with_component(axis, value),
            max: self.max.with_component(axis, value),
        }
    }

    /// The eight corner voxels (duplicates for flat cuboids).
    pub fn corners(&self) -> [BlockPos; 8] {
        let (a, b) = (self.min, self.max);
        [
            BlockPos::new(a.x, a.y, a.z),
            BlockPos::new(b.x, a.y, a.z),
            BlockPos::new(a.x, b.y, a.z),
            BlockPos::new(a.x, a.y, b.z),
            BlockPos::new(b.x, b.y, a.z),
            BlockPos::new(b.x, a.y, b.z),
            BlockPos::new(a.x, b.y, b.z),
            BlockPos::new(b.x, b.y, b.z),
        ]
    }

    /// Every voxel, bottom layer first.
    pub fn positions(&self) -> impl Iterator<Item = BlockPos> + '_ {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| {
            (min.x..=max.x)
                .flat_map(move |x| (min.z..=max.z).map(move |z| BlockPos::new(x, y, z)))
        })
    }
}

impl fmt::Display for Cuboid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.min, self.max)
    }
}
