//! Structure movers.
//!
//! Every archetype contributes two things: a planner that decides whether
//! and how far the structure may move (`plan`), and a motion law
//! implementing [`Kinematics`]. The motion laws form the closed [`Motion`]
//! sum type; the choice is made once by the planner and the
//! [`BlockMover`] engine drives whichever variant it is handed.

mod block_mover;
mod bridge;
mod door;
mod element;
mod flag;
mod garage;
mod revolving;
mod sliding;
mod spin;
mod tick;
mod translation;
mod vertical;
mod windmill;

use glam::DVec3;

use crate::infrastructure::ports::VoxelWorldPort;
use structmover_domain::{
    Axis, BlockFace, BlockPos, Cuboid, DomainError, Placement, RotateDirection, Structure,
    StructureType,
};

pub use block_mover::{BlockMover, MoverContext, MoverError, MoverSettings, Reopen};
pub use bridge::BridgeMotion;
pub use door::DoorMotion;
pub use element::{AnimatedElement, ProxyGuard};
pub use flag::FlagMotion;
pub use garage::GarageMotion;
pub use spin::SpinMotion;
pub use tick::{step, ElementView, TickInput, TickOutput, TickState, DAMPING};
pub use translation::TranslationMotion;

/// The motion law of one archetype.
pub trait Kinematics {
    /// Distance of a voxel from the pivot or path corner.
    fn radius(&self, origin: BlockPos) -> f64;

    /// Target center of the voxel that started at `origin` once the
    /// interpolation parameter reaches `step_sum`.
    fn position(&self, origin: BlockPos, radius: f64, step_sum: f64) -> DVec3;

    /// Voxel the element is materialized at. Equals the rounded
    /// `position` at `end_value`.
    fn final_position(&self, origin: BlockPos) -> BlockPos;

    /// `step_sum` at the end of the motion (blocks or radians).
    fn end_value(&self) -> f64;

    /// Quarter turn applied to oriented payloads, if the motion rotates them.
    fn payload_turn(&self) -> Option<(Axis, bool)> {
        None
    }

    /// Persisted placement after the motion.
    fn update_coordinates(&self, structure: &Structure) -> Placement;
}

/// Placement obtained by moving the whole bounding box and engine with
/// `kinematics`.
pub(crate) fn moved_placement<K: Kinematics + ?Sized>(
    kinematics: &K,
    structure: &Structure,
    engine_side: Option<BlockFace>,
) -> Placement {
    let corners = structure
        .cuboid()
        .corners()
        .map(|corner| kinematics.final_position(corner));
    Placement {
        cuboid: Cuboid::enclosing(corners).unwrap_or_else(|| structure.cuboid()),
        engine: kinematics.final_position(structure.engine()),
        engine_side,
    }
}

/// Motion law chosen for one run, one variant per archetype.
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    Door(DoorMotion),
    Drawbridge(BridgeMotion),
    Sliding(TranslationMotion),
    Vertical(TranslationMotion),
    Garage(GarageMotion),
    Windmill(SpinMotion),
    Revolving(SpinMotion),
    Flag(FlagMotion),
}

impl Motion {
    fn kinematics(&self) -> &dyn Kinematics {
        match self {
            Self::Door(motion) => motion,
            Self::Drawbridge(motion) => motion,
            Self::Sliding(motion) | Self::Vertical(motion) => motion,
            Self::Garage(motion) => motion,
            Self::Windmill(motion) | Self::Revolving(motion) => motion,
            Self::Flag(motion) => motion,
        }
    }

    /// Continuous motions end where they started and do not toggle the
    /// open state.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::Windmill(_) | Self::Revolving(_) | Self::Flag(_))
    }

    /// Blocks travelled by a translation, persisted so closing can retrace it.
    pub fn travel(&self) -> Option<u32> {
        match self {
            Self::Sliding(motion) | Self::Vertical(motion) => Some(motion.distance),
            _ => None,
        }
    }
}

impl Kinematics for Motion {
    fn radius(&self, origin: BlockPos) -> f64 {
        self.kinematics().radius(origin)
    }

    fn position(&self, origin: BlockPos, radius: f64, step_sum: f64) -> DVec3 {
        self.kinematics().position(origin, radius, step_sum)
    }

    fn final_position(&self, origin: BlockPos) -> BlockPos {
        self.kinematics().final_position(origin)
    }

    fn end_value(&self) -> f64 {
        self.kinematics().end_value()
    }

    fn payload_turn(&self) -> Option<(Axis, bool)> {
        self.kinematics().payload_turn()
    }

    fn update_coordinates(&self, structure: &Structure) -> Placement {
        self.kinematics().update_coordinates(structure)
    }
}

// =============================================================================
// Planning
// =============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Every candidate destination is obstructed.
    #[error("No free direction to move in")]
    NoDirection,

    #[error(transparent)]
    InvalidShape(#[from] DomainError),

    #[error("Region not loaded at {0}")]
    NotLoaded(BlockPos),

    /// Requested travel does not fit the block grid.
    #[error("Cannot travel {0} blocks")]
    TooFar(u32),
}

impl PlanError {
    pub fn invalid_shape(kind: StructureType, reason: impl Into<String>) -> Self {
        Self::InvalidShape(DomainError::invalid_shape(kind.as_str(), reason))
    }
}

/// Settings of continuous archetypes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousSettings {
    pub duration_secs: f64,
    pub rpm: f64,
}

/// Inputs of a planner.
pub struct PlanContext<'a> {
    pub structure: &'a Structure,
    pub world: &'a dyn VoxelWorldPort,
    /// Duration asked for by the caller, 0 for "use the default"
    pub requested_secs: f64,
    pub continuous: ContinuousSettings,
}

impl PlanContext<'_> {
    pub fn is_free(&self, pos: BlockPos) -> bool {
        self.world.is_passable(self.structure.world_id(), pos)
    }

    pub fn all_free(&self, mut positions: impl Iterator<Item = BlockPos>) -> bool {
        positions.all(|pos| self.is_free(pos))
    }

    fn invalid(&self, reason: impl Into<String>) -> PlanError {
        PlanError::invalid_shape(self.structure.kind(), reason)
    }
}

/// Outcome of a successful planning pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub motion: Motion,
    /// Direction chosen for this run
    pub direction: RotateDirection,
    /// Region the structure will occupy or sweep into, checked for permission
    pub destination: Cuboid,
    /// Distance travelled by the fastest voxel, in blocks
    pub path_length: f64,
    /// Fixed run time of continuous motions
    pub duration_secs: Option<f64>,
}

/// Decide whether and how `ctx.structure` can move right now.
pub fn plan(ctx: &PlanContext<'_>) -> Result<Plan, PlanError> {
    match ctx.structure.kind() {
        StructureType::Door => door::plan(ctx),
        StructureType::Drawbridge => bridge::plan(ctx),
        StructureType::SlidingDoor => sliding::plan(ctx),
        StructureType::Portcullis | StructureType::Elevator => vertical::plan(ctx),
        StructureType::GarageDoor => garage::plan(ctx),
        StructureType::Windmill => windmill::plan(ctx),
        StructureType::RevolvingDoor => revolving::plan(ctx),
        StructureType::Flag => flag::plan(ctx),
    }
}
