//! End-to-end scenarios.
//!
//! Every scenario runs the full stack (App, use cases, movers, stores and
//! in-memory adapters) on the manual scheduler, so animations complete in a
//! few thousand simulated ticks without wall-clock waits.
//!
//! ```bash
//! cargo test -p structmover-engine --lib e2e_tests
//! ```

mod e2e_helpers;
mod lifecycle_tests;

pub use e2e_helpers::*;
