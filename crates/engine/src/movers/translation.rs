//! Pure translation shared by sliding doors, portcullises and elevators.

use glam::DVec3;

use super::{moved_placement, Kinematics, Motion, Plan, PlanContext, PlanError};
use structmover_domain::kinematics::free_run;
use structmover_domain::{BlockFace, BlockPos, Placement, RotateDirection, Structure};

/// Straight-line motion of `distance` blocks through `face`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationMotion {
    pub face: BlockFace,
    pub distance: u32,
}

impl TranslationMotion {
    /// Signed block offset. Planners only build motions within `i32` range.
    fn offset(&self) -> i32 {
        i32::try_from(self.distance).unwrap_or(i32::MAX)
    }
}

/// Reject travel distances whose block offsets do not fit the grid.
pub(super) fn checked_travel(distance: u32) -> Result<u32, PlanError> {
    i32::try_from(distance)
        .map(|_| distance)
        .map_err(|_| PlanError::TooFar(distance))
}

impl Kinematics for TranslationMotion {
    /// Translations have no pivot.
    fn radius(&self, _origin: BlockPos) -> f64 {
        0.0
    }

    fn position(&self, origin: BlockPos, _radius: f64, step_sum: f64) -> DVec3 {
        origin.center() + self.face.offset().as_dvec3() * step_sum
    }

    fn final_position(&self, origin: BlockPos) -> BlockPos {
        origin.relative(self.face, self.offset())
    }

    fn end_value(&self) -> f64 {
        f64::from(self.distance)
    }

    fn update_coordinates(&self, structure: &Structure) -> Placement {
        moved_placement(self, structure, structure.engine_side())
    }
}

/// Free run of the whole structure through `face`, capped at `cap`.
pub(super) fn run(ctx: &PlanContext<'_>, face: BlockFace, cap: u32) -> u32 {
    let layer = ctx.structure.cuboid().layer(face);
    free_run(layer, face, cap, |pos| ctx.is_free(pos))
}

/// Candidate with the longest free run.
///
/// Ties keep the earlier candidate, so the order of `candidates` is the
/// tie-break priority. A run shorter than `required` does not count.
pub(super) fn best_run(
    ctx: &PlanContext<'_>,
    candidates: &[BlockFace],
    cap: impl Fn(BlockFace) -> u32,
    required: u32,
) -> Option<(BlockFace, u32)> {
    let mut best: Option<(BlockFace, u32)> = None;
    for &face in candidates {
        let distance = run(ctx, face, cap(face));
        if distance == 0 || distance < required {
            continue;
        }
        if best.map_or(true, |(_, longest)| distance > longest) {
            best = Some((face, distance));
        }
    }
    best
}

/// Retrace the persisted opening move exactly.
pub(super) fn retrace(
    ctx: &PlanContext<'_>,
    opened_toward: BlockFace,
    distance: u32,
) -> Result<(BlockFace, u32), PlanError> {
    let distance = checked_travel(distance)?;
    let back = opened_toward.opposite();
    if run(ctx, back, distance) == distance {
        Ok((back, distance))
    } else {
        Err(PlanError::NoDirection)
    }
}

/// Build the plan of a translation, wrapping it with `variant`.
pub(super) fn translation_plan(
    ctx: &PlanContext<'_>,
    face: BlockFace,
    distance: u32,
    variant: fn(TranslationMotion) -> Motion,
) -> Plan {
    let motion = TranslationMotion { face, distance };
    let destination = ctx
        .structure
        .cuboid()
        .translate(face.offset() * motion.offset());
    Plan {
        motion: variant(motion),
        direction: RotateDirection::from_face(face),
        destination,
        path_length: f64::from(distance),
        duration_secs: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movers::testing::assert_endpoint_consistent;
    use structmover_domain::Cuboid;

    #[test]
    fn translation_endpoint_is_exact() {
        let region = Cuboid::from_corners(BlockPos::new(0, 0, 0), BlockPos::new(2, 3, 0));
        for face in [BlockFace::East, BlockFace::Down] {
            let motion = Motion::Sliding(TranslationMotion { face, distance: 7 });
            assert_endpoint_consistent(&motion, &region);
        }
    }

    #[test]
    fn interpolation_is_linear() {
        let motion = TranslationMotion {
            face: BlockFace::South,
            distance: 4,
        };
        let origin = BlockPos::new(1, 1, 1);
        let halfway = motion.position(origin, 0.0, 2.0);
        assert!((halfway - DVec3::new(1.5, 1.5, 3.5)).length() < 1e-12);
    }

    #[test]
    fn travel_beyond_the_grid_is_refused() {
        assert_eq!(checked_travel(12), Ok(12));
        assert_eq!(checked_travel(i32::MAX as u32), Ok(i32::MAX as u32));
        assert_eq!(
            checked_travel(u32::MAX),
            Err(PlanError::TooFar(u32::MAX))
        );
    }
}
