//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Voxel world access and proxy entities (the host game)
//! - Scheduling on the host's tick loop
//! - Structure persistence (could swap in-memory -> SQL)
//! - Region guards and owner notifications
//! - Clock (for testing)

mod access;
mod error;
mod scheduler;
mod store;
mod testing;
mod world;

pub use access::{DenialReason, NotifierPort, PermissionPort};
pub use error::{ProxyError, StoreError, WorldError};
pub use scheduler::{Repeat, RepeatingTask, SchedulerPort, SyncTask, TaskHandle};
pub use store::StructureStorePort;
pub use testing::ClockPort;
pub use world::{ProxyEntity, ProxyFactoryPort, VoxelWorldPort};

#[cfg(test)]
pub use access::{MockNotifierPort, MockPermissionPort};
#[cfg(test)]
pub use store::MockStructureStorePort;
#[cfg(test)]
pub use testing::MockClockPort;
#[cfg(test)]
pub use world::{MockProxyFactoryPort, MockVoxelWorldPort};
