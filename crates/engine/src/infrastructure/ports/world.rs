//! Voxel world and proxy entity ports.

use glam::DVec3;
use structmover_domain::{BlockData, BlockPos, Cuboid, WorldId};

use super::error::{ProxyError, WorldError};

/// Read/write access to the host's voxel grid.
///
/// Writes must only happen on the synchronous world context.
#[cfg_attr(test, mockall::automock)]
pub trait VoxelWorldPort: Send + Sync {
    /// True when every chunk overlapping `region` is resident.
    fn is_loaded(&self, world: WorldId, region: &Cuboid) -> bool;

    /// Current payload of a voxel, `None` when its chunk is not loaded.
    fn read(&self, world: WorldId, pos: BlockPos) -> Option<BlockData>;

    fn write(&self, world: WorldId, pos: BlockPos, data: BlockData) -> Result<(), WorldError>;

    /// Air and liquids are passable; unloaded voxels are not.
    fn is_passable(&self, world: WorldId, pos: BlockPos) -> bool;

    /// Force a block-state update so neighbours and clients see the change.
    fn refresh(&self, world: WorldId, pos: BlockPos);
}

/// A transient, free-moving stand-in for a detached voxel.
pub trait ProxyEntity: Send {
    fn set_velocity(&mut self, velocity: DVec3);

    fn velocity(&self) -> DVec3;

    fn position(&self) -> DVec3;

    /// Remove the entity from the world. Called exactly once.
    fn destroy(&mut self);
}

/// Spawns proxies for detached voxels.
#[cfg_attr(test, mockall::automock)]
pub trait ProxyFactoryPort: Send + Sync {
    fn spawn(
        &self,
        world: WorldId,
        position: DVec3,
        data: &BlockData,
    ) -> Result<Box<dyn ProxyEntity>, ProxyError>;
}
