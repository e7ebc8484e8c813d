//! Infrastructure implementations.
//!
//! Contains port trait definitions and the adapters the engine ships with.

pub mod clock;
pub mod config;
pub mod memory;
pub mod ports;
pub mod scheduler;
