//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Has a unique identity
//! - Exposes behavior through methods, not public fields
//! - Is persisted by an external store; the engine only reports changes

pub mod structure;

pub use structure::{Placement, Structure};
