//! Windmills spin their sails about the horizontal axis normal to the sail
//! plane.

use super::spin::spin_plan;
use super::{Motion, Plan, PlanContext, PlanError};
use structmover_domain::Axis;

pub(super) fn plan(ctx: &PlanContext<'_>) -> Result<Plan, PlanError> {
    let cuboid = ctx.structure.cuboid();
    let axis = match (cuboid.size(Axis::X), cuboid.size(Axis::Z)) {
        (_, 1) => Axis::Z,
        (1, _) => Axis::X,
        _ => return Err(ctx.invalid("windmill sails must be one block thick")),
    };
    Ok(spin_plan(ctx, axis, Motion::Windmill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movers::testing::{assert_endpoint_consistent, built, plan_in, structure};
    use crate::movers::Kinematics;
    use std::f64::consts::TAU;
    use structmover_domain::{BlockData, BlockPos, Cuboid, RotateDirection, Structure, StructureType};

    fn windmill() -> Structure {
        structure(
            StructureType::Windmill,
            BlockPos::new(-2, 62, 5),
            BlockPos::new(2, 66, 5),
            BlockPos::new(0, 64, 5),
        )
    }

    #[test]
    fn sails_spin_about_z_and_end_in_place() {
        let mill = windmill();
        let world = built(&mill);
        let plan = plan_in(&mill, &world).unwrap();
        let Motion::Windmill(spin) = &plan.motion else {
            panic!("expected a windmill motion, got {:?}", plan.motion);
        };
        assert_eq!(spin.rotation.axis, Axis::Z);
        // 10 s at 6 rpm
        assert_eq!(spin.revolutions, 1);
        assert!((plan.motion.end_value() - TAU).abs() < 1e-12);
        assert_eq!(plan.direction, RotateDirection::Clockwise);
        assert_eq!(plan.destination, mill.cuboid());
        assert_endpoint_consistent(&plan.motion, &mill.cuboid());
    }

    #[test]
    fn spinning_ignores_obstructions() {
        let mill = windmill();
        let world = built(&mill);
        world.fill(
            mill.world_id(),
            &Cuboid::from_corners(BlockPos::new(-3, 61, 4), BlockPos::new(3, 67, 6)),
            &BlockData::solid("stone"),
        );
        assert!(plan_in(&mill, &world).is_ok());
    }

    #[test]
    fn thick_sails_are_rejected() {
        let mill = structure(
            StructureType::Windmill,
            BlockPos::new(0, 0, 0),
            BlockPos::new(2, 2, 2),
            BlockPos::new(1, 1, 1),
        );
        let world = built(&mill);
        assert!(matches!(plan_in(&mill, &world), Err(PlanError::InvalidShape(_))));
    }
}
