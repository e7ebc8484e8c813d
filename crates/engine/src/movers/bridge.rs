//! Drawbridges: a quarter turn about a horizontal hinge edge.
//!
//! The hinge runs through the engine block along the engine-side face. A
//! flat bridge extends away from its engine side and raises to standing; a
//! standing bridge lowers onto one of the two sides perpendicular to the
//! hinge. After lowering, the engine side is the face the bridge was
//! lowered away from.

use std::f64::consts::FRAC_PI_2;

use glam::DVec3;

use super::{moved_placement, Kinematics, Motion, Plan, PlanContext, PlanError};
use structmover_domain::kinematics::{quarter_sweep, turn_between, PivotRotation};
use structmover_domain::{
    Axis, BlockFace, BlockPos, Cuboid, Placement, RotateDirection, Structure,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BridgeMotion {
    pub rotation: PivotRotation,
    /// Engine side after the motion
    pub engine_side: BlockFace,
}

impl Kinematics for BridgeMotion {
    fn radius(&self, origin: BlockPos) -> f64 {
        self.rotation.radius(origin)
    }

    fn position(&self, origin: BlockPos, _radius: f64, step_sum: f64) -> DVec3 {
        self.rotation.position(origin, step_sum)
    }

    fn final_position(&self, origin: BlockPos) -> BlockPos {
        self.rotation.turned(origin, 1)
    }

    fn end_value(&self) -> f64 {
        FRAC_PI_2
    }

    fn payload_turn(&self) -> Option<(Axis, bool)> {
        Some((self.rotation.axis, self.rotation.positive))
    }

    fn update_coordinates(&self, structure: &Structure) -> Placement {
        moved_placement(self, structure, Some(self.engine_side))
    }
}

/// The horizontal face carrying the hinge, stored or derived from the shape.
fn hinge_side(ctx: &PlanContext<'_>) -> Result<BlockFace, PlanError> {
    let structure = ctx.structure;
    let cuboid = structure.cuboid();
    if let Some(side) = structure.engine_side().filter(|side| side.is_horizontal()) {
        if !cuboid.layer(side).contains(structure.engine()) {
            return Err(ctx.invalid(format!("engine is not on the {side} edge")));
        }
        return Ok(side);
    }
    if cuboid.height() > 1 {
        return match (cuboid.size(Axis::X), cuboid.size(Axis::Z)) {
            (_, 1) => Ok(BlockFace::North),
            (1, _) => Ok(BlockFace::West),
            _ => Err(ctx.invalid("standing bridge must be one block thick")),
        };
    }
    BlockFace::HORIZONTAL
        .into_iter()
        .find(|face| cuboid.size(face.axis()) > 1 && cuboid.layer(*face).contains(structure.engine()))
        .ok_or_else(|| ctx.invalid("engine must sit on an edge of the bridge"))
}

pub(super) fn plan(ctx: &PlanContext<'_>) -> Result<Plan, PlanError> {
    let structure = ctx.structure;
    let cuboid = structure.cuboid();
    let engine = structure.engine();
    let side = hinge_side(ctx)?;
    let hinge_axis = side.axis().other_horizontal();
    let span = (
        cuboid.min().component(hinge_axis),
        cuboid.max().component(hinge_axis),
    );

    let standing = cuboid.height() > 1;
    let (arm, length, targets) = if standing {
        if cuboid.size(side.axis()) != 1 {
            return Err(ctx.invalid("standing bridge must be one block thick"));
        }
        if engine.y != cuboid.min().y {
            return Err(ctx.invalid("standing bridge must hinge on its bottom row"));
        }
        let configured = structure
            .open_direction()
            .as_face()
            .filter(|face| face.axis() == side.axis());
        let targets = match configured {
            Some(face) => vec![face],
            None => vec![side.opposite(), side],
        };
        (BlockFace::Up, cuboid.height() - 1, targets)
    } else {
        if engine.y != cuboid.min().y {
            return Err(ctx.invalid("engine must be level with the bridge"));
        }
        (
            side.opposite(),
            cuboid.size(side.axis()) - 1,
            vec![BlockFace::Up],
        )
    };

    for target in targets {
        let Some((axis, positive)) = turn_between(arm, target) else {
            continue;
        };
        let swept = quarter_sweep(engine, arm, target, length, axis, span);
        if !ctx.all_free(swept.into_iter()) {
            continue;
        }

        let engine_side = if standing { target.opposite() } else { side };
        let motion = BridgeMotion {
            rotation: PivotRotation::new(engine, axis, positive),
            engine_side,
        };
        let destination = Cuboid::enclosing(cuboid.corners().map(|c| motion.final_position(c)))
            .unwrap_or(cuboid);
        return Ok(Plan {
            motion: Motion::Drawbridge(motion),
            direction: RotateDirection::from_face(target),
            destination,
            path_length: f64::from(length) * FRAC_PI_2,
            duration_secs: None,
        });
    }
    Err(PlanError::NoDirection)
}
