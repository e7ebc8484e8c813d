//! Rotations about axis-aligned lines through a pivot voxel.

use glam::DVec3;

use crate::value_objects::{Axis, BlockFace, BlockPos};

/// Rotate `v` by `angle` radians about `axis`.
///
/// Positive angles agree with [`BlockPos::rotate_quarter`]: at `PI / 2`
/// this is exactly the positive quarter turn.
pub fn rotate_about(v: DVec3, axis: Axis, angle: f64) -> DVec3 {
    let (sin, cos) = angle.sin_cos();
    match axis {
        Axis::Y => DVec3::new(v.x * cos - v.z * sin, v.y, v.x * sin + v.z * cos),
        Axis::X => DVec3::new(v.x, v.y * cos - v.z * sin, v.y * sin + v.z * cos),
        Axis::Z => DVec3::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos, v.z),
    }
}

/// Axis and sign of the quarter turn taking face `from` onto face `to`.
pub fn turn_between(from: BlockFace, to: BlockFace) -> Option<(Axis, bool)> {
    if from.axis() == to.axis() {
        return None;
    }
    let axis = [Axis::X, Axis::Y, Axis::Z]
        .into_iter()
        .find(|axis| *axis != from.axis() && *axis != to.axis())?;
    [true, false]
        .into_iter()
        .find(|positive| from.offset().rotate_quarter(axis, *positive) == to.offset())
        .map(|positive| (axis, positive))
}

/// A rotation about a line through the center of `pivot`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotRotation {
    pub pivot: BlockPos,
    pub axis: Axis,
    pub positive: bool,
}

impl PivotRotation {
    pub fn new(pivot: BlockPos, axis: Axis, positive: bool) -> Self {
        Self {
            pivot,
            axis,
            positive,
        }
    }

    fn signed(&self, angle: f64) -> f64 {
        if self.positive {
            angle
        } else {
            -angle
        }
    }

    /// Distance of `origin`'s center from the rotation axis.
    pub fn radius(&self, origin: BlockPos) -> f64 {
        let offset = (origin - self.pivot).with_component(self.axis, 0);
        (offset.length_squared() as f64).sqrt()
    }

    /// Center of `origin` after turning `angle` radians (unsigned; the
    /// rotation's own sign is applied).
    pub fn position(&self, origin: BlockPos, angle: f64) -> DVec3 {
        let pivot = self.pivot.center();
        pivot + rotate_about(origin.center() - pivot, self.axis, self.signed(angle))
    }

    /// Exact voxel after `quarter_turns` quarter turns.
    pub fn turned(&self, origin: BlockPos, quarter_turns: u32) -> BlockPos {
        let offset = (0..quarter_turns % 4).fold(origin - self.pivot, |offset, _| {
            offset.rotate_quarter(self.axis, self.positive)
        });
        self.pivot + offset
    }
}
