//! Doors: a quarter turn about the vertical hinge column.
//!
//! The hinge is the engine column. The door must be one block thick and the
//! engine must sit on one of its end columns; the face pointing from the
//! hinge to the far end is the door's current facing.

use std::f64::consts::FRAC_PI_2;

use glam::DVec3;

use super::{moved_placement, Kinematics, Motion, Plan, PlanContext, PlanError};
use structmover_domain::kinematics::{quarter_sweep, PivotRotation};
use structmover_domain::{
    Axis, BlockFace, BlockPos, Cuboid, Placement, RotateDirection, Structure,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorMotion {
    pub rotation: PivotRotation,
}

impl Kinematics for DoorMotion {
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
        Some((Axis::Y, self.rotation.positive))
    }

    fn update_coordinates(&self, structure: &Structure) -> Placement {
        moved_placement(self, structure, structure.engine_side())
    }
}

/// Face from the hinge column to the far end of the door, and the door's
/// length beyond the hinge.
fn facing(ctx: &PlanContext<'_>) -> Result<(BlockFace, i32), PlanError> {
    let cuboid = ctx.structure.cuboid();
    let engine = ctx.structure.engine();
    let (min, max) = (cuboid.min(), cuboid.max());
    let (width_x, width_z) = (cuboid.size(Axis::X), cuboid.size(Axis::Z));

    let (axis, towards_max, towards_min) = match (width_x > 1, width_z > 1) {
        (true, true) => return Err(ctx.invalid("door must be one block thick")),
        (false, false) => return Err(ctx.invalid("door needs at least two columns")),
        (true, false) => (Axis::X, BlockFace::East, BlockFace::West),
        (false, true) => (Axis::Z, BlockFace::South, BlockFace::North),
    };
    let thin = axis.other_horizontal();
    if engine.component(thin) != min.component(thin) {
        return Err(ctx.invalid("engine is not in line with the door"));
    }
    let length = cuboid.size(axis) - 1;
    if engine.component(axis) == min.component(axis) {
        Ok((towards_max, length))
    } else if engine.component(axis) == max.component(axis) {
        Ok((towards_min, length))
    } else {
        Err(ctx.invalid("engine must sit on an end column"))
    }
}

fn candidates(structure: &Structure) -> Vec<RotateDirection> {
    use RotateDirection::{Clockwise, Counterclockwise};

    let configured = structure.open_direction();
    match (configured.is_rotational(), structure.is_open()) {
        (true, false) => vec![configured],
        (true, true) => vec![configured.opposite()],
        (false, false) => vec![Clockwise, Counterclockwise],
        (false, true) => vec![Counterclockwise, Clockwise],
    }
}

pub(super) fn plan(ctx: &PlanContext<'_>) -> Result<Plan, PlanError> {
    let structure = ctx.structure;
    let (arm, length) = facing(ctx)?;
    let cuboid = structure.cuboid();
    let engine = structure.engine();
    let height = (cuboid.min().y, cuboid.max().y);

    for direction in candidates(structure) {
        let clockwise = direction == RotateDirection::Clockwise;
        let swing_to = if clockwise {
            arm.clockwise()
        } else {
            arm.counter_clockwise()
        };
        let swept = quarter_sweep(engine, arm, swing_to, length, Axis::Y, height);
        if !ctx.all_free(swept.into_iter()) {
            continue;
        }

        let motion = DoorMotion {
            rotation: PivotRotation::new(engine, Axis::Y, clockwise),
        };
        let destination = Cuboid::enclosing(cuboid.corners().map(|c| motion.final_position(c)))
            .unwrap_or(cuboid);
        return Ok(Plan {
            motion: Motion::Door(motion),
            direction,
            destination,
            path_length: f64::from(length) * FRAC_PI_2,
            duration_secs: None,
        });
    }
    Err(PlanError::NoDirection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movers::testing::{assert_endpoint_consistent, built, plan_in, structure};
    use structmover_domain::{BlockData, Orientation, StructureType};

    /// Door running north from its hinge at (0, 64, 0), 4 wide, 3 high.
    fn north_door() -> Structure {
        structure(
            StructureType::Door,
            BlockPos::new(0, 64, -3),
            BlockPos::new(0, 66, 0),
            BlockPos::new(0, 64, 0),
        )
    }

    #[test]
    fn closed_door_swings_clockwise_first() {
        let door = north_door();
        let world = built(&door);
        let plan = plan_in(&door, &world).unwrap();
        assert_eq!(plan.direction, RotateDirection::Clockwise);
        // north-pointing door ends up pointing east
        assert_eq!(
            plan.destination,
            Cuboid::from_corners(BlockPos::new(0, 64, 0), BlockPos::new(3, 66, 0))
        );
        assert_endpoint_consistent(&plan.motion, &door.cuboid());
    }

    #[test]
    fn obstruction_in_swing_picks_other_side() {
        let door = north_door();
        let world = built(&door);
        world.set(door.world_id(), BlockPos::new(2, 65, -1), BlockData::solid("stone"));
        let plan = plan_in(&door, &world).unwrap();
        assert_eq!(plan.direction, RotateDirection::Counterclockwise);
        assert_eq!(
            plan.destination,
            Cuboid::from_corners(BlockPos::new(-3, 64, 0), BlockPos::new(0, 66, 0))
        );
    }

    #[test]
    fn configured_direction_is_the_only_candidate() {
        let door = north_door().with_open_direction(RotateDirection::Clockwise);
        let world = built(&door);
        world.set(door.world_id(), BlockPos::new(3, 64, 0), BlockData::solid("stone"));
        assert_eq!(plan_in(&door, &world), Err(PlanError::NoDirection));
    }

    #[test]
    fn open_door_closes_against_its_configured_direction() {
        let door = structure(
            StructureType::Door,
            BlockPos::new(0, 64, 0),
            BlockPos::new(3, 66, 0),
            BlockPos::new(0, 64, 0),
        )
        .with_open(true)
        .with_open_direction(RotateDirection::Clockwise);
        let world = built(&door);
        let plan = plan_in(&door, &world).unwrap();
        assert_eq!(plan.direction, RotateDirection::Counterclockwise);
        assert_eq!(plan.destination, north_door().cuboid());
    }

    #[test]
    fn thick_door_is_rejected() {
        let door = structure(
            StructureType::Door,
            BlockPos::new(0, 64, 0),
            BlockPos::new(2, 66, 1),
            BlockPos::new(0, 64, 0),
        );
        let world = built(&door);
        assert!(matches!(
            plan_in(&door, &world),
            Err(PlanError::InvalidShape(_))
        ));
    }

    #[test]
    fn payload_turns_with_the_door() {
        let motion = DoorMotion {
            rotation: PivotRotation::new(BlockPos::ZERO, Axis::Y, true),
        };
        let stairs = BlockData::solid("oak_stairs")
            .with_orientation(Orientation::Facing(BlockFace::North));
        let (axis, positive) = motion.payload_turn().unwrap();
        assert_eq!(
            stairs.rotated(axis, positive).map(|data| data.orientation),
            Some(Orientation::Facing(BlockFace::East))
        );
    }
}
