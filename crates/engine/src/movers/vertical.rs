//! Portcullises and elevators: vertical translation.
//!
//! Both directions are ray-marched and the larger run wins; on a tie the
//! upward run, computed first, is kept. Elevators with a fixed travel
//! distance only move when the whole distance is free.

use super::translation::{best_run, checked_travel, retrace, translation_plan};
use super::{Motion, Plan, PlanContext, PlanError};
use structmover_domain::{BlockFace, StructureType};

pub(super) fn plan(ctx: &PlanContext<'_>) -> Result<Plan, PlanError> {
    let structure = ctx.structure;
    let configured = structure
        .open_direction()
        .as_face()
        .filter(|face| !face.is_horizontal());

    if structure.is_open() {
        if let (Some(face), Some(distance)) = (configured, structure.open_distance()) {
            let (back, distance) = retrace(ctx, face, distance)?;
            return Ok(translation_plan(ctx, back, distance, Motion::Vertical));
        }
    }

    let candidates = match configured {
        Some(face) if structure.is_open() => vec![face.opposite()],
        Some(face) => vec![face],
        None => vec![BlockFace::Up, BlockFace::Down],
    };
    let blocks_to_move = checked_travel(structure.blocks_to_move())?;
    let cap = if blocks_to_move > 0 {
        blocks_to_move
    } else {
        structure.cuboid().height() as u32
    };
    let required = match structure.kind() {
        StructureType::Elevator => blocks_to_move,
        _ => 0,
    };

    let (face, distance) =
        best_run(ctx, &candidates, |_| cap, required).ok_or(PlanError::NoDirection)?;
    tracing::trace!(
        structure_id = %structure.id(),
        face = %face,
        distance,
        "Vertical run chosen"
    );
    Ok(translation_plan(ctx, face, distance, Motion::Vertical))
}
