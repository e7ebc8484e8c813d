//! Geometry and kinematics library.
//!
//! Pure functions shared by every archetype's motion law: rotations about a
//! pivot, swept-volume and free-run queries, and the speed/tick budget of an
//! animation. Nothing here touches the world; callers pass passability in.

mod rotation;
mod sweep;
mod timing;

pub use rotation::{rotate_about, turn_between, PivotRotation};
pub use sweep::{free_run, quarter_sweep};
pub use timing::{tick_rate_from_speed, MotionTiming, SpeedLimits, TICKS_PER_SECOND, TICK_MILLIS};
