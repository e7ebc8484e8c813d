//! Value objects - Immutable objects defined by their attributes

mod block_data;
mod block_pos;
mod cuboid;
mod direction;

pub use block_data::{BlockCategory, BlockData, Orientation};
pub use block_pos::BlockPos;
pub use cuboid::Cuboid;
pub use direction::{Axis, BlockFace, RotateDirection};
