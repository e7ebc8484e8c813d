//! In-memory voxel world.
//!
//! Voxels default to air. Chunks (16x16 columns) can be marked unloaded to
//! simulate regions that are not resident.

use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::{DashMap, DashSet};

use crate::infrastructure::ports::{VoxelWorldPort, WorldError};
use structmover_domain::{BlockData, BlockPos, Cuboid, WorldId};

const CHUNK_SHIFT: i32 = 4;

type ChunkKey = (WorldId, i32, i32);

fn chunk_of(world: WorldId, pos: BlockPos) -> ChunkKey {
    (world, pos.x >> CHUNK_SHIFT, pos.z >> CHUNK_SHIFT)
}

#[derive(Default)]
pub struct InMemoryWorld {
    blocks: DashMap<(WorldId, BlockPos), BlockData>,
    unloaded: DashSet<ChunkKey>,
    refreshes: AtomicUsize,
}

impl InMemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a voxel directly, bypassing the load check.
    pub fn set(&self, world: WorldId, pos: BlockPos, data: BlockData) {
        if data.is_air() {
            self.blocks.remove(&(world, pos));
        } else {
            self.blocks.insert((world, pos), data);
        }
    }

    /// Fill every voxel of `region` with `data`.
    pub fn fill(&self, world: WorldId, region: &Cuboid, data: &BlockData) {
        for pos in region.positions() {
            self.set(world, pos, data.clone());
        }
    }

    pub fn get(&self, world: WorldId, pos: BlockPos) -> BlockData {
        self.blocks
            .get(&(world, pos))
            .map(|entry| entry.value().clone())
            .unwrap_or_else(BlockData::air)
    }

    pub fn unload_chunk_at(&self, world: WorldId, pos: BlockPos) {
        self.unloaded.insert(chunk_of(world, pos));
    }

    pub fn load_chunk_at(&self, world: WorldId, pos: BlockPos) {
        self.unloaded.remove(&chunk_of(world, pos));
    }

    /// Non-air voxels inside `region`, sorted for stable comparisons.
    pub fn snapshot(&self, world: WorldId, region: &Cuboid) -> Vec<(BlockPos, BlockData)> {
        let mut voxels: Vec<_> = self
            .blocks
            .iter()
            .filter(|entry| entry.key().0 == world && region.contains(entry.key().1))
            .map(|entry| (entry.key().1, entry.value().clone()))
            .collect();
        voxels.sort_by_key(|(pos, _)| (pos.x, pos.y, pos.z));
        voxels
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    fn chunk_loaded(&self, world: WorldId, pos: BlockPos) -> bool {
        !self.unloaded.contains(&chunk_of(world, pos))
    }
}

impl VoxelWorldPort for InMemoryWorld {
    fn is_loaded(&self, world: WorldId, region: &Cuboid) -> bool {
        let (min, max) = (region.min(), region.max());
        ((min.x >> CHUNK_SHIFT)..=(max.x >> CHUNK_SHIFT)).all(|cx| {
            ((min.z >> CHUNK_SHIFT)..=(max.z >> CHUNK_SHIFT))
                .all(|cz| !self.unloaded.contains(&(world, cx, cz)))
        })
    }

    fn read(&self, world: WorldId, pos: BlockPos) -> Option<BlockData> {
        self.chunk_loaded(world, pos).then(|| self.get(world, pos))
    }

    fn write(&self, world: WorldId, pos: BlockPos, data: BlockData) -> Result<(), WorldError> {
        if !self.chunk_loaded(world, pos) {
            return Err(WorldError::not_loaded(pos));
        }
        self.set(world, pos, data);
        Ok(())
    }

    fn is_passable(&self, world: WorldId, pos: BlockPos) -> bool {
        self.read(world, pos)
            .is_some_and(|data| data.is_passable())
    }

    fn refresh(&self, _world: WorldId, _pos: BlockPos) {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
    }
}
