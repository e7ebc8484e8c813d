//! Continuous rotation shared by windmills and revolving doors.
//!
//! The structure spins a whole number of revolutions about an axis through
//! its engine, so every voxel ends where it started.

use std::f64::consts::TAU;

use glam::DVec3;

use super::{Kinematics, Motion, Plan, PlanContext};
use structmover_domain::kinematics::PivotRotation;
use structmover_domain::{Axis, BlockPos, Placement, RotateDirection, Structure};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinMotion {
    pub rotation: PivotRotation,
    pub revolutions: u32,
}

impl Kinematics for SpinMotion {
    fn radius(&self, origin: BlockPos) -> f64 {
        self.rotation.radius(origin)
    }

    fn position(&self, origin: BlockPos, _radius: f64, step_sum: f64) -> DVec3 {
        self.rotation.position(origin, step_sum)
    }

    fn final_position(&self, origin: BlockPos) -> BlockPos {
        origin
    }

    fn end_value(&self) -> f64 {
        TAU * f64::from(self.revolutions)
    }

    fn update_coordinates(&self, structure: &Structure) -> Placement {
        structure.placement()
    }
}

/// Run time and revolution count of a continuous motion.
pub(super) fn run_length(ctx: &PlanContext<'_>) -> (f64, u32) {
    let duration = if ctx.requested_secs > 0.0 {
        ctx.requested_secs
    } else {
        ctx.continuous.duration_secs
    };
    let revolutions = (duration * ctx.continuous.rpm / 60.0).round().max(1.0) as u32;
    (duration, revolutions)
}

/// Spin direction: the configured one, clockwise by default.
pub(super) fn spin_direction(structure: &Structure) -> RotateDirection {
    match structure.open_direction() {
        direction if direction.is_rotational() => direction,
        _ => RotateDirection::Clockwise,
    }
}

pub(super) fn spin_plan(
    ctx: &PlanContext<'_>,
    axis: Axis,
    variant: fn(SpinMotion) -> Motion,
) -> Plan {
    let structure = ctx.structure;
    let direction = spin_direction(structure);
    let (duration, revolutions) = run_length(ctx);
    let motion = SpinMotion {
        rotation: PivotRotation::new(
            structure.engine(),
            axis,
            direction == RotateDirection::Clockwise,
        ),
        revolutions,
    };
    let reach = structure
        .cuboid()
        .corners()
        .into_iter()
        .map(|corner| motion.radius(corner))
        .fold(0.0, f64::max);
    Plan {
        path_length: reach * motion.end_value(),
        motion: variant(motion),
        direction,
        destination: structure.cuboid(),
        duration_secs: Some(duration),
    }
}
