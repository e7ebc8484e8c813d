//! Shared vocabulary types.
//!
//! Pure data: no I/O, no async, no side effects. All types derive
//! Serialize/Deserialize so storage adapters can persist them directly.

mod motion_result;
pub use motion_result::MotionResult;

mod structure_type;
pub use structure_type::StructureType;
