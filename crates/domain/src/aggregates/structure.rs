//! Structure aggregate - a persisted multi-voxel object that can be animated
//!
//! The aggregate is owned by the storage collaborator; the animation engine
//! works on snapshots of it and reports changes back through the store.
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: mutation only through methods that keep invariants
//! - **Valid by construction**: the bounding box is a validated [`Cuboid`]
//! - **Builder pattern**: fluent `with_*` API for optional settings

use serde::{Deserialize, Serialize};

use crate::types::StructureType;
use crate::value_objects::{BlockFace, BlockPos, Cuboid, RotateDirection};
use structmover_domain::{PlayerId, StructureId, WorldId};

/// Where a structure sits: its bounding box, engine block and engine side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub cuboid: Cuboid,
    pub engine: BlockPos,
    pub engine_side: Option<BlockFace>,
}

/// A persisted structure
///
/// # Invariants
///
/// - `cuboid` is always a valid box (min <= max component-wise)
/// - `open_distance` is only set while a translating structure is open
///
/// # Example
///
/// ```
/// use structmover_domain::{BlockPos, Cuboid, PlayerId, Structure, StructureType, WorldId};
///
/// let cuboid = Cuboid::from_corners(BlockPos::new(0, 64, 0), BlockPos::new(3, 66, 0));
/// let door = Structure::new(
///     "front door",
///     WorldId::new(),
///     PlayerId::new(),
///     StructureType::Door,
///     cuboid,
///     BlockPos::new(0, 64, 0),
/// );
///
/// assert!(!door.is_open());
/// assert_eq!(door.block_count(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    // Identity
    id: StructureId,
    name: String,
    world_id: WorldId,
    owner: PlayerId,

    // Shape
    kind: StructureType,
    cuboid: Cuboid,
    /// Hinge or engine block the motion pivots on
    engine: BlockPos,
    /// Cuboid face holding the hinge, for archetypes that need one
    engine_side: Option<BlockFace>,

    // Motion settings
    open_direction: RotateDirection,
    is_open: bool,
    /// Travel limit for translating archetypes (0 = auto-detect)
    blocks_to_move: u32,
    /// Distance travelled by the last opening move of a translating archetype
    open_distance: Option<u32>,
    /// Seconds after opening before the structure closes itself
    auto_close_secs: Option<u32>,
    locked: bool,
}

impl Structure {
    // =========================================================================
    // Constructor
    // =========================================================================

    pub fn new(
        name: impl Into<String>,
        world_id: WorldId,
        owner: PlayerId,
        kind: StructureType,
        cuboid: Cuboid,
        engine: BlockPos,
    ) -> Self {
        Self {
            id: StructureId::new(),
            name: name.into(),
            world_id,
            owner,
            kind,
            cuboid,
            engine,
            engine_side: None,
            open_direction: RotateDirection::None,
            is_open: false,
            blocks_to_move: 0,
            open_distance: None,
            auto_close_secs: None,
            locked: false,
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    pub fn with_id(mut self, id: StructureId) -> Self {
        self.id = id;
        self
    }

    pub fn with_engine_side(mut self, side: BlockFace) -> Self {
        self.engine_side = Some(side);
        self
    }

    pub fn with_open_direction(mut self, direction: RotateDirection) -> Self {
        self.open_direction = direction;
        self
    }

    pub fn with_open(mut self, open: bool) -> Self {
        self.is_open = open;
        self
    }

    pub fn with_blocks_to_move(mut self, blocks: u32) -> Self {
        self.blocks_to_move = blocks;
        self
    }

    pub fn with_open_distance(mut self, distance: Option<u32>) -> Self {
        self.open_distance = distance;
        self
    }

    pub fn with_auto_close(mut self, secs: u32) -> Self {
        self.auto_close_secs = (secs > 0).then_some(secs);
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> StructureId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn world_id(&self) -> WorldId {
        self.world_id
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn kind(&self) -> StructureType {
        self.kind
    }

    pub fn cuboid(&self) -> Cuboid {
        self.cuboid
    }

    pub fn engine(&self) -> BlockPos {
        self.engine
    }

    pub fn engine_side(&self) -> Option<BlockFace> {
        self.engine_side
    }

    pub fn placement(&self) -> Placement {
        Placement {
            cuboid: self.cuboid,
            engine: self.engine,
            engine_side: self.engine_side,
        }
    }

    pub fn open_direction(&self) -> RotateDirection {
        self.open_direction
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn blocks_to_move(&self) -> u32 {
        self.blocks_to_move
    }

    pub fn open_distance(&self) -> Option<u32> {
        self.open_distance
    }

    pub fn auto_close_secs(&self) -> Option<u32> {
        self.auto_close_secs
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn block_count(&self) -> u64 {
        self.cuboid.volume()
    }

    // =========================================================================
    // Mutations (applied by storage adapters when the engine reports changes)
    // =========================================================================

    pub fn apply_placement(&mut self, placement: Placement) {
        self.cuboid = placement.cuboid;
        self.engine = placement.engine;
        self.engine_side = placement.engine_side;
    }

    pub fn set_open(&mut self, open: bool) {
        self.is_open = open;
        if !open {
            self.open_distance = None;
        }
    }

    pub fn set_open_direction(&mut self, direction: RotateDirection) {
        self.open_direction = direction;
    }

    pub fn set_open_distance(&mut self, distance: Option<u32>) {
        self.open_distance = distance;
    }
}
