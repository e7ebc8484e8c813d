//! Use cases - User story orchestration.
//!
//! Use cases validate requests against the ports and stores and hand
//! committed work to the mover engine.

pub mod structure;

pub use structure::{OpenStructure, StopStructure, StructureUseCases};
