//! Garage doors: an L-shaped track.
//!
//! A closed (standing) door rolls up onto a horizontal track in the row
//! above its top edge; an open (flat) door rolls back towards the door
//! plane and down into it. Each voxel first travels along the leg it is
//! already on for `radius` blocks, then turns the corner. Every voxel
//! travels the same `height + 1` blocks, so the door keeps its shape.
//! The panel turns a quarter at the corner, so oriented blocks are turned
//! from the first leg's direction onto the second's.

use glam::DVec3;

use super::{moved_placement, Kinematics, Motion, Plan, PlanContext, PlanError};
use structmover_domain::kinematics::turn_between;
use structmover_domain::{
    Axis, BlockFace, BlockPos, Cuboid, Placement, RotateDirection, Structure,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GarageMotion {
    /// Leg travelled before the corner
    pub first: BlockFace,
    /// Leg travelled after the corner
    pub second: BlockFace,
    /// Coordinate along `first`'s axis where the corner lies
    pub corner: i32,
    /// Track length of every voxel
    pub path: u32,
    pub engine_side: Option<BlockFace>,
}

impl GarageMotion {
    fn first_leg(&self, origin: BlockPos) -> i32 {
        (self.corner - origin.component(self.first.axis())).abs()
    }
}

impl Kinematics for GarageMotion {
    /// Distance to the track corner.
    fn radius(&self, origin: BlockPos) -> f64 {
        f64::from(self.first_leg(origin))
    }

    fn position(&self, origin: BlockPos, radius: f64, step_sum: f64) -> DVec3 {
        let first = self.first.offset().as_dvec3();
        if step_sum <= radius {
            origin.center() + first * step_sum
        } else {
            origin.center() + first * radius + self.second.offset().as_dvec3() * (step_sum - radius)
        }
    }

    fn final_position(&self, origin: BlockPos) -> BlockPos {
        let leg = self.first_leg(origin);
        origin
            .relative(self.first, leg)
            .relative(self.second, self.path as i32 - leg)
    }

    fn end_value(&self) -> f64 {
        f64::from(self.path)
    }

    fn payload_turn(&self) -> Option<(Axis, bool)> {
        turn_between(self.first, self.second)
    }

    fn update_coordinates(&self, structure: &Structure) -> Placement {
        moved_placement(self, structure, self.engine_side)
    }
}

/// Horizontal axis the standing door faces along.
fn plane_normal(ctx: &PlanContext<'_>) -> Result<Axis, PlanError> {
    let cuboid = ctx.structure.cuboid();
    match (cuboid.size(Axis::X), cuboid.size(Axis::Z)) {
        (1, 1) => Ok(ctx
            .structure
            .engine_side()
            .filter(|side| side.is_horizontal())
            .map_or(Axis::Z, |side| side.axis())),
        (1, _) => Ok(Axis::X),
        (_, 1) => Ok(Axis::Z),
        _ => Err(ctx.invalid("standing garage door must be one block thick")),
    }
}

fn open_plan(ctx: &PlanContext<'_>) -> Result<Plan, PlanError> {
    let structure = ctx.structure;
    let cuboid = structure.cuboid();
    let normal = plane_normal(ctx)?;
    let height = cuboid.height();
    let top = cuboid.max().y;

    let configured = structure
        .open_direction()
        .as_face()
        .filter(|face| face.is_horizontal() && face.axis() == normal);
    let candidates: Vec<BlockFace> = match configured {
        Some(face) => vec![face],
        None => BlockFace::HORIZONTAL
            .into_iter()
            .filter(|face| face.axis() == normal)
            .collect(),
    };

    // Row directly above the door, the corner of the track.
    let corner_row = Cuboid::from_corners(
        cuboid.min().with_component(Axis::Y, top + 1),
        cuboid.max().with_component(Axis::Y, top + 1),
    );
    for face in candidates {
        let far = corner_row.translate(face.offset() * height);
        let track = Cuboid::from_corners(corner_row.min(), far.max());
        if !ctx.all_free(track.positions()) {
            continue;
        }
        let resting = Cuboid::from_corners(corner_row.translate(face.offset()).min(), far.max());
        let motion = GarageMotion {
            first: BlockFace::Up,
            second: face,
            corner: top + 1,
            path: (height + 1) as u32,
            engine_side: Some(face.opposite()),
        };
        return Ok(Plan {
            motion: Motion::Garage(motion),
            direction: RotateDirection::from_face(face),
            destination: resting,
            path_length: f64::from(height + 1),
            duration_secs: None,
        });
    }
    Err(PlanError::NoDirection)
}

fn close_plan(ctx: &PlanContext<'_>) -> Result<Plan, PlanError> {
    let structure = ctx.structure;
    let cuboid = structure.cuboid();
    if cuboid.height() != 1 {
        return Err(ctx.invalid("open garage door must lie flat"));
    }
    let side = structure
        .engine_side()
        .filter(|side| side.is_horizontal())
        .ok_or_else(|| ctx.invalid("open garage door has no engine side"))?;
    let depth = cuboid.size(side.axis());

    // Top of the door plane, right next to the track's inner edge.
    let plane_top = cuboid.layer(side).translate(side.offset());
    let plane = Cuboid::from_corners(
        plane_top.min().relative(BlockFace::Down, depth),
        plane_top.max(),
    );
    if !ctx.all_free(plane.positions()) {
        return Err(PlanError::NoDirection);
    }
    let motion = GarageMotion {
        first: side,
        second: BlockFace::Down,
        corner: plane_top.min().component(side.axis()),
        path: (depth + 1) as u32,
        engine_side: structure.engine_side(),
    };
    let standing = Cuboid::from_corners(
        plane_top.min().relative(BlockFace::Down, depth),
        plane_top.max().relative(BlockFace::Down, 1),
    );
    Ok(Plan {
        motion: Motion::Garage(motion),
        direction: RotateDirection::Down,
        destination: standing,
        path_length: f64::from(depth + 1),
        duration_secs: None,
    })
}

pub(super) fn plan(ctx: &PlanContext<'_>) -> Result<Plan, PlanError> {
    if ctx.structure.is_open() {
        close_plan(ctx)
    } else {
        open_plan(ctx)
    }
}
