extern crate self as structmover_domain;

pub mod aggregates;
pub mod error;
pub mod ids;
pub mod kinematics;
pub mod types;
pub mod value_objects;

pub use aggregates::{Placement, Structure};
pub use error::DomainError;
pub use ids::{PlayerId, StructureId, WorldId};
pub use types::{MotionResult, StructureType};
pub use value_objects::{
    Axis, BlockCategory, BlockData, BlockFace, BlockPos, Cuboid, Orientation, RotateDirection,
};
