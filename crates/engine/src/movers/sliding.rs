//! Sliding doors: horizontal translation in one of the compass directions.

use super::translation::{best_run, checked_travel, retrace, translation_plan};
use super::{Motion, Plan, PlanContext, PlanError};
use structmover_domain::BlockFace;

pub(super) fn plan(ctx: &PlanContext<'_>) -> Result<Plan, PlanError> {
    let structure = ctx.structure;
    let configured = structure
        .open_direction()
        .as_face()
        .filter(|face| face.is_horizontal());

    if structure.is_open() {
        if let (Some(face), Some(distance)) = (configured, structure.open_distance()) {
            let (back, distance) = retrace(ctx, face, distance)?;
            return Ok(translation_plan(ctx, back, distance, Motion::Sliding));
        }
    }

    let candidates = match configured {
        Some(face) if structure.is_open() => vec![face.opposite()],
        Some(face) => vec![face],
        None => BlockFace::HORIZONTAL.to_vec(),
    };
    let cuboid = structure.cuboid();
    let blocks_to_move = checked_travel(structure.blocks_to_move())?;
    let cap = |face: BlockFace| {
        if blocks_to_move > 0 {
            blocks_to_move
        } else {
            cuboid.size(face.axis()) as u32
        }
    };

    let (face, distance) = best_run(ctx, &candidates, cap, 0).ok_or(PlanError::NoDirection)?;
    Ok(translation_plan(ctx, face, distance, Motion::Sliding))
}
