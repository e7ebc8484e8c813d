//! Directions, faces and rotation axes of the voxel grid.
//!
//! Convention: +x is east, +y is up, +z is south. A clockwise turn seen from
//! above takes North to East.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::BlockPos;
use crate::error::DomainError;

/// One of the six faces of a voxel (or of a cuboid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockFace {
    North,
    East,
    South,
    West,
    Up,
    Down,
}

impl BlockFace {
    /// Horizontal faces in priority order (North > East > South > West).
    pub const HORIZONTAL: [BlockFace; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Unit step of this face on the grid.
    pub fn offset(self) -> BlockPos {
        match self {
            Self::North => BlockPos::new(0, 0, -1),
            Self::East => BlockPos::new(1, 0, 0),
            Self::South => BlockPos::new(0, 0, 1),
            Self::West => BlockPos::new(-1, 0, 0),
            Self::Up => BlockPos::new(0, 1, 0),
            Self::Down => BlockPos::new(0, -1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// The axis this face points along.
    pub fn axis(self) -> Axis {
        match self {
            Self::East | Self::West => Axis::X,
            Self::Up | Self::Down => Axis::Y,
            Self::North | Self::South => Axis::Z,
        }
    }

    pub fn is_horizontal(self) -> bool {
        !matches!(self, Self::Up | Self::Down)
    }

    /// True when the face points towards the positive end of its axis.
    pub fn is_positive(self) -> bool {
        matches!(self, Self::East | Self::South | Self::Up)
    }

    /// Face whose unit offset equals `pos`, if any.
    pub fn from_offset(pos: BlockPos) -> Option<Self> {
        [
            Self::North,
            Self::East,
            Self::South,
            Self::West,
            Self::Up,
            Self::Down,
        ]
        .into_iter()
        .find(|face| face.offset() == pos)
    }

    /// Clockwise (seen from above) neighbour of a horizontal face.
    pub fn clockwise(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
            other => other,
        }
    }

    pub fn counter_clockwise(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
            other => other,
        }
    }
}

impl fmt::Display for BlockFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
            Self::Up => "up",
            Self::Down => "down",
        };
        f.write_str(name)
    }
}

/// Rotation axis through a pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Swaps X and Z; Y maps to itself.
    pub fn other_horizontal(self) -> Axis {
        match self {
            Self::X => Self::Z,
            Self::Z => Self::X,
            Self::Y => Self::Y,
        }
    }
}

/// Configured or computed direction of a structure's motion.
///
/// Rotating archetypes use the rotational variants, translating archetypes
/// use the compass and vertical variants. `None` lets the opener decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotateDirection {
    #[default]
    None,
    Clockwise,
    Counterclockwise,
    North,
    East,
    South,
    West,
    Up,
    Down,
}

impl RotateDirection {
    pub fn opposite(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Clockwise => Self::Counterclockwise,
            Self::Counterclockwise => Self::Clockwise,
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// The face this direction points at, for compass and vertical variants.
    pub fn as_face(self) -> Option<BlockFace> {
        match self {
            Self::North => Some(BlockFace::North),
            Self::East => Some(BlockFace::East),
            Self::South => Some(BlockFace::South),
            Self::West => Some(BlockFace::West),
            Self::Up => Some(BlockFace::Up),
            Self::Down => Some(BlockFace::Down),
            Self::None | Self::Clockwise | Self::Counterclockwise => None,
        }
    }

    pub fn from_face(face: BlockFace) -> Self {
        match face {
            BlockFace::North => Self::North,
            BlockFace::East => Self::East,
            BlockFace::South => Self::South,
            BlockFace::West => Self::West,
            BlockFace::Up => Self::Up,
            BlockFace::Down => Self::Down,
        }
    }

    pub fn is_rotational(self) -> bool {
        matches!(self, Self::Clockwise | Self::Counterclockwise)
    }

    /// Sign of the rotation angle (+1 clockwise, -1 counterclockwise).
    pub fn sign(self) -> Option<f64> {
        match self {
            Self::Clockwise => Some(1.0),
            Self::Counterclockwise => Some(-1.0),
            _ => None,
        }
    }
}

impl fmt::Display for RotateDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Clockwise => "clockwise",
            Self::Counterclockwise => "counterclockwise",
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
            Self::Up => "up",
            Self::Down => "down",
        };
        f.write_str(name)
    }
}

impl FromStr for RotateDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "clockwise" | "cw" => Ok(Self::Clockwise),
            "counterclockwise" | "ccw" => Ok(Self::Counterclockwise),
            "north" => Ok(Self::North),
            "east" => Ok(Self::East),
            "south" => Ok(Self::South),
            "west" => Ok(Self::West),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(DomainError::parse(format!(
                "Unknown rotate direction: {}",
                other
            ))),
        }
    }
}
