//! Flags: a travelling wave through the cloth, anchored at the pole.
//!
//! The wave amplitude grows with the distance from the pole and is shaped by
//! an envelope that is zero at both ends of the run, so the cloth settles
//! back onto its original voxels.

use std::f64::consts::{PI, TAU};

use glam::DVec3;

use super::spin::{run_length, spin_direction};
use super::{Kinematics, Motion, Plan, PlanContext, PlanError};
use structmover_domain::{Axis, BlockPos, Placement, RotateDirection, Structure};

/// Lateral swing of the free end of the cloth, in blocks.
const MAX_AMPLITUDE: f64 = 0.6;

/// Blocks of cloth per full wave.
const WAVELENGTH: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlagMotion {
    pub pole: BlockPos,
    /// Axis the cloth extends along
    pub along: Axis,
    /// Axis the cloth swings along
    pub swing: Axis,
    pub length: f64,
    pub waves: u32,
    /// +1 or -1, the direction the wave travels
    pub sense: f64,
}

impl FlagMotion {
    fn swing_unit(&self) -> DVec3 {
        BlockPos::ZERO.with_component(self.swing, 1).as_dvec3()
    }
}

impl Kinematics for FlagMotion {
    /// Distance from the pole.
    fn radius(&self, origin: BlockPos) -> f64 {
        f64::from((origin.component(self.along) - self.pole.component(self.along)).abs())
    }

    fn position(&self, origin: BlockPos, radius: f64, step_sum: f64) -> DVec3 {
        let end = self.end_value();
        let envelope = (PI * (step_sum / end).clamp(0.0, 1.0)).sin();
        let amplitude = MAX_AMPLITUDE * (radius / self.length.max(1.0)).min(1.0);
        let phase = self.sense * step_sum - TAU * radius / WAVELENGTH;
        origin.center() + self.swing_unit() * (amplitude * envelope * phase.sin())
    }

    fn final_position(&self, origin: BlockPos) -> BlockPos {
        origin
    }

    fn end_value(&self) -> f64 {
        TAU * f64::from(self.waves)
    }

    fn update_coordinates(&self, structure: &Structure) -> Placement {
        structure.placement()
    }
}

pub(super) fn plan(ctx: &PlanContext<'_>) -> Result<Plan, PlanError> {
    let structure = ctx.structure;
    let cuboid = structure.cuboid();
    let (along, swing) = match (cuboid.size(Axis::X), cuboid.size(Axis::Z)) {
        (1, 1) => return Err(ctx.invalid("flag has no cloth")),
        (1, _) => (Axis::Z, Axis::X),
        (_, 1) => (Axis::X, Axis::Z),
        _ => return Err(ctx.invalid("flag must be one block thick")),
    };
    let pole = structure.engine();
    let (duration, waves) = run_length(ctx);
    let direction = spin_direction(structure);
    let motion = FlagMotion {
        pole,
        along,
        swing,
        length: f64::from(cuboid.size(along) - 1),
        waves,
        sense: if direction == RotateDirection::Clockwise {
            1.0
        } else {
            -1.0
        },
    };
    Ok(Plan {
        path_length: MAX_AMPLITUDE * 4.0 * f64::from(waves),
        motion: Motion::Flag(motion),
        direction,
        destination: cuboid,
        duration_secs: Some(duration),
    })
}
