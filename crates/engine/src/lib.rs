//! Structmover Engine library.
//!
//! Animates multi-block structures inside a voxel world.
//!
//! ## Structure
//!
//! - `movers/` - Motion planning per archetype and the shared `BlockMover`
//! - `use_cases/` - Opening and stopping structures
//! - `stores/` - Busy flags and auto-close timers
//! - `infrastructure/` - Ports, configuration and the adapters we ship with
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod movers;
pub mod stores;
pub mod use_cases;

/// Test fixtures module for scenario testing.
#[cfg(test)]
pub mod test_fixtures;

/// End-to-end scenarios driven by the manual scheduler.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
