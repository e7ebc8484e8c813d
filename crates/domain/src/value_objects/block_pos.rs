//! Integer voxel coordinates.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::{Axis, BlockFace};

/// Integer coordinate of a voxel in a uniform 3D grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const ZERO: BlockPos = BlockPos { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Neighbour `distance` voxels away through `face`.
    pub fn relative(self, face: BlockFace, distance: i32) -> Self {
        self + face.offset() * distance
    }

    /// Center of the voxel in continuous space.
    pub fn center(self) -> DVec3 {
        DVec3::new(
            f64::from(self.x) + 0.5,
            f64::from(self.y) + 0.5,
            f64::from(self.z) + 0.5,
        )
    }

    /// Voxel whose center is nearest to `center`.
    ///
    /// Rounding happens only here, when a continuous position is
    /// materialized back onto the grid.
    pub fn from_center(center: DVec3) -> Self {
        let snapped = (center - DVec3::splat(0.5)).round();
        Self::new(snapped.x as i32, snapped.y as i32, snapped.z as i32)
    }

    pub fn as_dvec3(self) -> DVec3 {
        DVec3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    pub fn component(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn with_component(mut self, axis: Axis, value: i32) -> Self {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
        self
    }

    /// Component-wise minimum.
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Exact quarter turn of this offset about `axis`.
    ///
    /// A positive turn matches a positive angle in
    /// [`crate::kinematics::rotate_about`]; about Y it is clockwise seen from
    /// above (North to East).
    pub fn rotate_quarter(self, axis: Axis, positive: bool) -> Self {
        let Self { x, y, z } = self;
        match (axis, positive) {
            (Axis::Y, true) => Self::new(-z, y, x),
            (Axis::Y, false) => Self::new(z, y, -x),
            (Axis::X, true) => Self::new(x, -z, y),
            (Axis::X, false) => Self::new(x, z, -y),
            (Axis::Z, true) => Self::new(-y, x, z),
            (Axis::Z, false) => Self::new(y, -x, z),
        }
    }

    pub fn length_squared(self) -> i64 {
        let (x, y, z) = (i64::from(self.x), i64::from(self.y), i64::from(self.z));
        x * x + y * y + z * z
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for BlockPos {
    type Output = BlockPos;

    fn add(self, rhs: BlockPos) -> BlockPos {
        BlockPos::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for BlockPos {
    type Output = BlockPos;

    fn sub(self, rhs: BlockPos) -> BlockPos {
        BlockPos::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for BlockPos {
    type Output = BlockPos;

    fn mul(self, rhs: i32) -> BlockPos {
        BlockPos::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for BlockPos {
    type Output = BlockPos;

    fn neg(self) -> BlockPos {
        BlockPos::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_round_trips_through_from_center() {
        let pos = BlockPos::new(-3, 64, 17);
        assert_eq!(BlockPos::from_center(pos.center()), pos);
    }

    #[test]
    fn from_center_absorbs_float_noise() {
        let noisy = BlockPos::new(4, 10, -2).center() + DVec3::new(1e-9, -3e-7, 0.2);
        assert_eq!(BlockPos::from_center(noisy), BlockPos::new(4, 10, -2));
    }

    #[test]
    fn relative_walks_through_face() {
        let pos = BlockPos::new(0, 0, 0);
        assert_eq!(pos.relative(BlockFace::North, 3), BlockPos::new(0, 0, -3));
        assert_eq!(pos.relative(BlockFace::Up, 2), BlockPos::new(0, 2, 0));
    }
}
