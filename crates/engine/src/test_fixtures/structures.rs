//! Structure builders for scenario tests.
//!
//! Every builder places its structure around the origin at y = 64 in a fresh
//! world; [`build`] fills the bounding box with solid blocks.

use structmover_domain::{
    BlockData, BlockPos, Cuboid, PlayerId, Structure, StructureType, WorldId,
};

use crate::infrastructure::memory::InMemoryWorld;

pub const MATERIAL: &str = "oak_planks";

pub fn structure(kind: StructureType, min: BlockPos, max: BlockPos, engine: BlockPos) -> Structure {
    Structure::new(
        kind.as_str(),
        WorldId::new(),
        PlayerId::new(),
        kind,
        Cuboid::from_corners(min, max),
        engine,
    )
}

/// Fill the structure's bounding box with [`MATERIAL`].
pub fn build(world: &InMemoryWorld, structure: &Structure) {
    world.fill(
        structure.world_id(),
        &structure.cuboid(),
        &BlockData::solid(MATERIAL),
    );
}

/// Fill `min..=max` with stone.
pub fn wall(world: &InMemoryWorld, structure: &Structure, min: BlockPos, max: BlockPos) {
    world.fill(
        structure.world_id(),
        &Cuboid::from_corners(min, max),
        &BlockData::solid("stone"),
    );
}

/// Gate five blocks long along x, two high.
pub fn sliding_gate() -> Structure {
    structure(
        StructureType::SlidingDoor,
        BlockPos::new(0, 64, 0),
        BlockPos::new(4, 65, 0),
        BlockPos::new(0, 64, 0),
    )
}

/// Portcullis three wide, three high, hanging at y 64..=66.
pub fn portcullis() -> Structure {
    structure(
        StructureType::Portcullis,
        BlockPos::new(0, 64, 0),
        BlockPos::new(2, 66, 0),
        BlockPos::new(1, 64, 0),
    )
}

/// Door running north from its hinge, four long and three high.
pub fn door() -> Structure {
    structure(
        StructureType::Door,
        BlockPos::new(0, 64, -3),
        BlockPos::new(0, 66, 0),
        BlockPos::new(0, 64, 0),
    )
}

/// Standing drawbridge, three wide and five high, hinged on its bottom row.
pub fn drawbridge() -> Structure {
    structure(
        StructureType::Drawbridge,
        BlockPos::new(0, 64, 0),
        BlockPos::new(2, 68, 0),
        BlockPos::new(1, 64, 0),
    )
}

/// Garage door four wide and three high, in the x/y plane.
pub fn garage_door() -> Structure {
    structure(
        StructureType::GarageDoor,
        BlockPos::new(0, 64, 0),
        BlockPos::new(3, 66, 0),
        BlockPos::new(0, 64, 0),
    )
}

/// Windmill sails in the x/y plane around their hub.
pub fn windmill() -> Structure {
    structure(
        StructureType::Windmill,
        BlockPos::new(-2, 62, 0),
        BlockPos::new(2, 66, 0),
        BlockPos::new(0, 64, 0),
    )
}

pub fn revolving_door() -> Structure {
    structure(
        StructureType::RevolvingDoor,
        BlockPos::new(-1, 64, -1),
        BlockPos::new(1, 66, 1),
        BlockPos::new(0, 64, 0),
    )
}

/// Flag on a pole at x 0, cloth running east.
pub fn flag() -> Structure {
    structure(
        StructureType::Flag,
        BlockPos::new(0, 66, 0),
        BlockPos::new(4, 67, 0),
        BlockPos::new(0, 66, 0),
    )
}

/// Elevator platform that travels exactly `floors` blocks.
pub fn elevator(floors: u32) -> Structure {
    structure(
        StructureType::Elevator,
        BlockPos::new(0, 64, 0),
        BlockPos::new(2, 64, 2),
        BlockPos::new(1, 64, 1),
    )
    .with_blocks_to_move(floors)
}

/// One of each archetype.
pub fn all() -> Vec<Structure> {
    vec![
        sliding_gate(),
        portcullis(),
        door(),
        drawbridge(),
        garage_door(),
        windmill(),
        revolving_door(),
        flag(),
        elevator(3),
    ]
}
