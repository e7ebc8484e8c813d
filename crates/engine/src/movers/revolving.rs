//! Revolving doors spin about the vertical axis through their engine.

use super::spin::spin_plan;
use super::{Motion, Plan, PlanContext, PlanError};
use structmover_domain::Axis;

pub(super) fn plan(ctx: &PlanContext<'_>) -> Result<Plan, PlanError> {
    let cuboid = ctx.structure.cuboid();
    let column = ctx.structure.engine().with_component(Axis::Y, cuboid.min().y);
    if !cuboid.contains(column) {
        return Err(ctx.invalid("engine must stand inside the revolving door"));
    }
    Ok(spin_plan(ctx, Axis::Y, Motion::Revolving))
}
