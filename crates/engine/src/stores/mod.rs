//! In-memory state storage modules.
//!
//! Stores manage process-scoped runtime state that is never persisted:
//! - `ActivityStore` - busy flags of structures with an in-flight mover
//! - `AutoCloseStore` - pending auto-close timers

pub mod activity;
pub mod auto_close;

pub use activity::ActivityStore;
pub use auto_close::AutoCloseStore;
