//! The shared animation engine.
//!
//! A [`BlockMover`] owns one run of one structure: it snapshots and detaches
//! the movable voxels, drives their proxies from a repeating scheduler task
//! and commits the final layout exactly once, on the world context.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use super::element::{AnimatedElement, ProxyGuard};
use super::tick::{step, ElementView, TickInput, TickState};
use super::{Kinematics, Motion};
use crate::infrastructure::clock::elapsed_millis;
use crate::infrastructure::ports::{
    ClockPort, ProxyError, ProxyFactoryPort, Repeat, SchedulerPort, StructureStorePort,
    TaskHandle, VoxelWorldPort, WorldError,
};
use crate::stores::{ActivityStore, AutoCloseStore};
use structmover_domain::kinematics::{MotionTiming, TICKS_PER_SECOND};
use structmover_domain::{
    BlockCategory, BlockData, BlockPos, RotateDirection, Structure, StructureId,
};

/// Lift applied to proxies of the lowest layer so they don't drag on the
/// ground.
const GROUND_OFFSET: f64 = 0.01;

#[derive(Debug, Clone, Default)]
pub struct MoverSettings {
    /// Ticks the busy flag stays set after a run
    pub cooldown_ticks: u64,
    /// Extra ticks after an instant move
    pub instant_cooldown_ticks: u64,
    /// Materials that are never detached
    pub excluded_materials: HashSet<String>,
}

/// Re-invokes the opener for a structure, used by auto-close.
pub type Reopen = Arc<dyn Fn(StructureId) + Send + Sync>;

/// Collaborators shared by every mover.
#[derive(Clone)]
pub struct MoverContext {
    pub world: Arc<dyn VoxelWorldPort>,
    pub proxies: Arc<dyn ProxyFactoryPort>,
    pub scheduler: Arc<dyn SchedulerPort>,
    pub store: Arc<dyn StructureStorePort>,
    pub clock: Arc<dyn ClockPort>,
    pub activity: Arc<ActivityStore>,
    pub auto_close: Arc<AutoCloseStore>,
    pub settings: Arc<MoverSettings>,
}

#[derive(Debug, thiserror::Error)]
pub enum MoverError {
    #[error("Failed to spawn proxy: {0}")]
    Spawn(#[from] ProxyError),

    #[error("Failed to detach blocks: {0}")]
    Detach(#[from] WorldError),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct BlockMover {
    structure: Structure,
    motion: Motion,
    timing: MotionTiming,
    instant: bool,
    started_at: DateTime<Utc>,
    /// Cancel flag owned by the activity entry
    cancel: TaskHandle,
    reopen: Option<Reopen>,
    ctx: MoverContext,
    elements: Mutex<Vec<AnimatedElement>>,
    state: Mutex<TickState>,
    ticker: Mutex<Option<TaskHandle>>,
    finalized: AtomicBool,
}

impl std::fmt::Debug for BlockMover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockMover")
            .field("structure_id", &self.structure.id())
            .field("motion", &self.motion)
            .field("instant", &self.instant)
            .field("finalized", &self.is_finalized())
            .finish_non_exhaustive()
    }
}

impl BlockMover {
    /// Detach `structure` and start moving it.
    ///
    /// The structure must already be marked busy under `cancel`. Must run on
    /// the world context. On error the busy flag is released and the world is
    /// left in a consistent state: either untouched (detach failure) or with
    /// the structure committed to its destination (spawn failure).
    pub fn start(
        ctx: MoverContext,
        structure: Structure,
        motion: Motion,
        timing: MotionTiming,
        instant: bool,
        cancel: TaskHandle,
        reopen: Option<Reopen>,
    ) -> Result<Arc<Self>, MoverError> {
        let id = structure.id();
        let elements = snapshot(&ctx, &structure, &motion);
        if let Err(err) = detach(&ctx, &structure, &elements) {
            ctx.activity.release(id);
            return Err(err.into());
        }
        tracing::debug!(
            structure_id = %id,
            elements = elements.len(),
            instant,
            "Detached structure"
        );

        let mover = Arc::new(Self {
            started_at: ctx.clock.now(),
            structure,
            motion,
            timing,
            instant,
            cancel,
            reopen,
            ctx,
            elements: Mutex::new(elements),
            state: Mutex::new(TickState::default()),
            ticker: Mutex::new(None),
            finalized: AtomicBool::new(false),
        });

        if instant {
            mover.finalize(false);
            return Ok(mover);
        }

        if let Err(err) = mover.spawn_proxies() {
            tracing::error!(structure_id = %id, error = %err, "Proxy spawn failed, aborting");
            mover.finalize(true);
            return Err(err.into());
        }

        mover.ctx.activity.attach(id, mover.clone());
        let ticking = mover.clone();
        let period = u64::from(mover.timing.tick_rate);
        let handle = mover
            .ctx
            .scheduler
            .run_repeating(Box::new(move || ticking.tick()), period, period);
        *lock(&mover.ticker) = Some(handle);
        tracing::info!(
            structure_id = %id,
            kind = %mover.structure.kind(),
            steps = mover.timing.end_count,
            tick_rate = mover.timing.tick_rate,
            "Animation started"
        );
        Ok(mover)
    }

    pub fn structure_id(&self) -> StructureId {
        self.structure.id()
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn timing(&self) -> &MotionTiming {
        &self.timing
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized.load(Ordering::SeqCst)
    }

    /// Proxies currently alive.
    pub fn live_proxies(&self) -> usize {
        lock(&self.elements)
            .iter()
            .filter(|element| element.proxy.is_live())
            .count()
    }

    fn spawn_proxies(&self) -> Result<(), ProxyError> {
        let world = self.structure.world_id();
        let floor = self.structure.cuboid().min().y;
        let mut elements = lock(&self.elements);
        for element in elements.iter_mut() {
            let mut position = element.origin.center();
            if element.origin.y == floor {
                position.y += GROUND_OFFSET;
            }
            let proxy = self.ctx.proxies.spawn(world, position, &element.data)?;
            element.proxy = ProxyGuard::new(proxy);
        }
        Ok(())
    }

    /// One invocation of the repeating task.
    fn tick(self: &Arc<Self>) -> Repeat {
        if self.is_finalized() {
            return Repeat::Stop;
        }
        let input = TickInput {
            elapsed_ms: elapsed_millis(self.ctx.clock.as_ref(), self.started_at),
            may_continue: self.ctx.activity.may_continue() && !self.cancel.is_cancelled(),
        };

        let output = {
            let mut elements = lock(&self.elements);
            let views: Vec<ElementView> = elements
                .iter()
                .map(|element| ElementView {
                    origin: element.origin,
                    radius: element.radius,
                    position: element
                        .proxy
                        .position()
                        .unwrap_or_else(|| element.origin.center()),
                })
                .collect();

            let mut state = lock(&self.state);
            let (next, output) = step(*state, &self.timing, &self.motion, &views, input);
            *state = next;

            for (element, velocity) in elements.iter_mut().zip(&output.velocities) {
                element.proxy.set_velocity(*velocity);
            }
            if output.replace {
                if let Err(err) = self.swap_payloads(&mut elements) {
                    tracing::error!(
                        structure_id = %self.structure.id(),
                        error = %err,
                        "Failed to respawn rotated proxy, aborting"
                    );
                    drop(state);
                    drop(elements);
                    self.schedule_finalize(true);
                    return Repeat::Stop;
                }
            }
            output
        };

        if output.finish {
            self.schedule_finalize(output.aborted);
            return Repeat::Stop;
        }
        Repeat::Continue
    }

    /// Respawn rotatable proxies with their rotated payload, keeping their
    /// position and velocity.
    fn swap_payloads(&self, elements: &mut [AnimatedElement]) -> Result<(), ProxyError> {
        let world = self.structure.world_id();
        for element in elements.iter_mut() {
            let Some(rotated) = element.rotated.as_ref() else {
                continue;
            };
            let Some(position) = element.proxy.position() else {
                continue;
            };
            let velocity = element.proxy.velocity();
            let mut proxy = self.ctx.proxies.spawn(world, position, rotated)?;
            proxy.set_velocity(velocity);
            element.proxy.replace(proxy);
        }
        Ok(())
    }

    fn schedule_finalize(self: &Arc<Self>, abort: bool) {
        let mover = self.clone();
        self.ctx
            .scheduler
            .run_on_sync_thread(Box::new(move || mover.finalize(abort)));
    }

    /// Stop the run now and commit the structure to its destination without
    /// scheduling auto-close. Must run on the world context.
    pub fn abort(self: &Arc<Self>) {
        self.cancel.cancel();
        self.finalize(true);
    }

    /// Commit the final layout. Runs at most once; later calls are no-ops.
    fn finalize(self: &Arc<Self>, abort: bool) {
        if self.finalized.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(ticker) = lock(&self.ticker).take() {
            ticker.cancel();
        }

        let id = self.structure.id();
        let world_id = self.structure.world_id();
        let mut elements = std::mem::take(&mut *lock(&self.elements));
        let mut placed = Vec::with_capacity(elements.len());
        for element in elements.iter_mut() {
            element.proxy.destroy();
            let target = self.motion.final_position(element.origin);
            if let Err(err) = self
                .ctx
                .world
                .write(world_id, target, element.final_data().clone())
            {
                tracing::error!(structure_id = %id, error = %err, "Failed to place block");
            }
            placed.push(target);
        }
        for target in placed {
            self.ctx.world.refresh(world_id, target);
        }

        let now_open = self.commit_state();
        let release_delay = self.release(abort);

        if now_open {
            if !abort {
                self.schedule_auto_close(release_delay);
            }
        } else {
            self.ctx.auto_close.cancel(id);
        }
        tracing::info!(structure_id = %id, abort, open = now_open, "Structure finalized");
    }

    /// Persist placement and open state. Returns whether the structure is
    /// open afterwards.
    fn commit_state(&self) -> bool {
        let id = self.structure.id();
        let store = &self.ctx.store;
        let placement = self.motion.update_coordinates(&self.structure);
        if let Err(err) = store.update_placement(id, &placement) {
            tracing::error!(structure_id = %id, error = %err, "Failed to persist placement");
        }
        let direction = self.structure.open_direction();
        if direction != RotateDirection::None {
            if let Err(err) = store.set_open_direction(id, direction) {
                tracing::error!(structure_id = %id, error = %err, "Failed to persist direction");
            }
        }
        if self.motion.is_continuous() {
            return self.structure.is_open();
        }

        let now_open = !self.structure.is_open();
        if let Err(err) = store.set_open(id, now_open) {
            tracing::error!(structure_id = %id, error = %err, "Failed to persist open state");
        }
        if now_open {
            if let Some(travel) = self.motion.travel() {
                if let Err(err) = store.set_open_distance(id, Some(travel)) {
                    tracing::error!(structure_id = %id, error = %err, "Failed to persist travel");
                }
            }
        }
        now_open
    }

    /// Release the busy flag, after the cooldown unless aborting. Returns the
    /// delay used.
    fn release(&self, abort: bool) -> u64 {
        let id = self.structure.id();
        let settings = &self.ctx.settings;
        let delay = if abort {
            0
        } else if self.instant {
            settings.cooldown_ticks + settings.instant_cooldown_ticks
        } else {
            settings.cooldown_ticks
        };
        if delay == 0 {
            self.ctx.activity.release(id);
        } else {
            let activity = self.ctx.activity.clone();
            self.ctx
                .scheduler
                .run_delayed(Box::new(move || activity.release(id)), delay);
        }
        delay
    }

    fn schedule_auto_close(&self, release_delay: u64) {
        let (Some(secs), Some(reopen)) = (self.structure.auto_close_secs(), self.reopen.clone())
        else {
            return;
        };
        if secs == 0 {
            return;
        }
        let id = self.structure.id();
        let delay = (u64::from(secs) * u64::from(TICKS_PER_SECOND)).max(release_delay + 1);
        self.ctx
            .auto_close
            .schedule(id, delay, Box::new(move || reopen(id)));
        tracing::debug!(structure_id = %id, delay_ticks = delay, "Auto-close scheduled");
    }
}

/// Capture every movable voxel of the structure.
fn snapshot(ctx: &MoverContext, structure: &Structure, motion: &Motion) -> Vec<AnimatedElement> {
    let world = structure.world_id();
    let turn = motion.payload_turn();
    structure
        .cuboid()
        .positions()
        .filter_map(|pos| {
            let data = ctx.world.read(world, pos)?;
            is_movable(&ctx.settings, &data).then(|| {
                let rotated = turn.and_then(|(axis, positive)| data.rotated(axis, positive));
                AnimatedElement::new(pos, data, rotated, motion.radius(pos))
            })
        })
        .collect()
}

fn is_movable(settings: &MoverSettings, data: &BlockData) -> bool {
    !data.is_air()
        && data.category != BlockCategory::Container
        && !settings.excluded_materials.contains(&data.material)
}

/// Clear the captured voxels. On failure the ones already cleared are put
/// back.
fn detach(
    ctx: &MoverContext,
    structure: &Structure,
    elements: &[AnimatedElement],
) -> Result<(), WorldError> {
    let world = structure.world_id();
    for (index, element) in elements.iter().enumerate() {
        if let Err(err) = ctx.world.write(world, element.origin, BlockData::air()) {
            for restored in &elements[..index] {
                let origin: BlockPos = restored.origin;
                if let Err(restore_err) = ctx.world.write(world, origin, restored.data.clone()) {
                    tracing::error!(pos = %origin, error = %restore_err, "Failed to restore block");
                }
            }
            return Err(err);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::{InMemoryProxies, InMemoryStructureStore, InMemoryWorld};
    use crate::infrastructure::ports::MockVoxelWorldPort;
    use crate::movers::TranslationMotion;
    use crate::test_fixtures::ManualScheduler;
    use structmover_domain::kinematics::SpeedLimits;
    use structmover_domain::{BlockFace, Cuboid, PlayerId, StructureType, WorldId};

    struct Harness {
        ctx: MoverContext,
        scheduler: Arc<ManualScheduler>,
        world: Arc<InMemoryWorld>,
        proxies: Arc<InMemoryProxies>,
        store: Arc<InMemoryStructureStore>,
    }

    fn harness() -> Harness {
        let scheduler = Arc::new(ManualScheduler::new());
        let world = Arc::new(InMemoryWorld::new());
        let proxies = Arc::new(InMemoryProxies::new());
        let store = Arc::new(InMemoryStructureStore::new());
        let ctx = MoverContext {
            world: world.clone(),
            proxies: proxies.clone(),
            scheduler: scheduler.clone(),
            store: store.clone(),
            clock: scheduler.clock(),
            activity: Arc::new(ActivityStore::new()),
            auto_close: Arc::new(AutoCloseStore::new(scheduler.clone())),
            settings: Arc::new(MoverSettings {
                cooldown_ticks: 10,
                instant_cooldown_ticks: 20,
                excluded_materials: HashSet::from(["bedrock".to_string()]),
            }),
        };
        Harness {
            ctx,
            scheduler,
            world,
            proxies,
            store,
        }
    }

    fn gate(h: &Harness) -> Structure {
        let gate = Structure::new(
            "gate",
            WorldId::new(),
            PlayerId::new(),
            StructureType::SlidingDoor,
            Cuboid::from_corners(BlockPos::new(0, 64, 0), BlockPos::new(2, 65, 0)),
            BlockPos::new(0, 64, 0),
        );
        h.world
            .fill(gate.world_id(), &gate.cuboid(), &BlockData::solid("iron_block"));
        h.store.insert(gate.clone());
        gate
    }

    fn east(distance: u32) -> (Motion, MotionTiming) {
        let timing = MotionTiming::for_path(
            f64::from(distance),
            f64::from(distance),
            0.0,
            3.0,
            SpeedLimits::default(),
        );
        (
            Motion::Sliding(TranslationMotion {
                face: BlockFace::East,
                distance,
            }),
            timing,
        )
    }

    fn start(h: &Harness, structure: &Structure, instant: bool) -> Result<Arc<BlockMover>, MoverError> {
        let cancel = h.ctx.activity.try_acquire(structure.id()).unwrap();
        let (motion, timing) = east(3);
        BlockMover::start(h.ctx.clone(), structure.clone(), motion, timing, instant, cancel, None)
    }

    #[test]
    fn animation_runs_to_completion() {
        let h = harness();
        let gate = gate(&h);
        let mover = start(&h, &gate, false).unwrap();
        assert_eq!(h.proxies.live_count(), 6);
        assert!(h.world.get(gate.world_id(), BlockPos::new(0, 64, 0)).is_air());

        h.scheduler.advance(mover.timing().total_ticks() + 2 * u64::from(mover.timing().tick_rate));
        assert!(mover.is_finalized());
        assert_eq!(h.proxies.live_count(), 0);
        let moved = gate.cuboid().translate(BlockFace::East.offset() * 3);
        for pos in moved.positions() {
            assert_eq!(h.world.get(gate.world_id(), pos), BlockData::solid("iron_block"));
        }

        let stored = h.store.get(gate.id()).unwrap().unwrap();
        assert!(stored.is_open());
        assert_eq!(stored.cuboid(), moved);
        assert_eq!(stored.open_distance(), Some(3));

        // busy until the cooldown runs out
        assert!(h.ctx.activity.is_busy(gate.id()));
        h.scheduler.advance(10);
        assert!(!h.ctx.activity.is_busy(gate.id()));
    }

    #[test]
    fn lowest_layer_is_lifted() {
        let h = harness();
        let gate = gate(&h);
        let _mover = start(&h, &gate, false).unwrap();
        let bodies = h.proxies.bodies();
        assert!(bodies
            .iter()
            .filter(|body| body.position.y < 65.0)
            .all(|body| (body.position.y - 64.51).abs() < 1e-9));
        assert!(bodies
            .iter()
            .filter(|body| body.position.y > 65.0)
            .all(|body| (body.position.y - 65.5).abs() < 1e-9));
    }

    #[test]
    fn instant_move_skips_proxies() {
        let h = harness();
        let gate = gate(&h);
        let mover = start(&h, &gate, true).unwrap();
        assert!(mover.is_finalized());
        assert_eq!(h.proxies.spawned_count(), 0);
        assert_eq!(
            h.world.get(gate.world_id(), BlockPos::new(5, 65, 0)),
            BlockData::solid("iron_block")
        );
        h.scheduler.advance(29);
        assert!(h.ctx.activity.is_busy(gate.id()));
        h.scheduler.advance(1);
        assert!(!h.ctx.activity.is_busy(gate.id()));
    }

    #[test]
    fn excluded_blocks_stay_behind() {
        let h = harness();
        let gate = gate(&h);
        let world = gate.world_id();
        h.world.set(world, BlockPos::new(1, 64, 0), BlockData::container("chest"));
        h.world.set(world, BlockPos::new(2, 64, 0), BlockData::solid("bedrock"));
        let _mover = start(&h, &gate, true).unwrap();
        assert_eq!(h.world.get(world, BlockPos::new(1, 64, 0)), BlockData::container("chest"));
        assert_eq!(h.world.get(world, BlockPos::new(2, 64, 0)), BlockData::solid("bedrock"));
        assert!(h.world.get(world, BlockPos::new(4, 64, 0)).is_air());
    }

    #[test]
    fn abort_finalizes_once_and_releases_at_once() {
        let h = harness();
        let gate = gate(&h);
        let mover = start(&h, &gate, false).unwrap();
        h.scheduler.advance(8);
        mover.abort();
        mover.abort();
        assert_eq!(h.proxies.live_count(), 0);
        assert!(!h.ctx.activity.is_busy(gate.id()));
        h.scheduler.advance(200);
        assert_eq!(mover.live_proxies(), 0);
        assert!(h.store.get(gate.id()).unwrap().unwrap().is_open());
    }

    #[test]
    fn spawn_failure_commits_and_releases() {
        let h = harness();
        let gate = gate(&h);
        h.proxies.fail_after(2);
        let err = start(&h, &gate, false).unwrap_err();
        assert!(matches!(err, MoverError::Spawn(_)));
        assert_eq!(h.proxies.live_count(), 0);
        assert!(!h.ctx.activity.is_busy(gate.id()));
        assert_eq!(
            h.world.get(gate.world_id(), BlockPos::new(3, 64, 0)),
            BlockData::solid("iron_block")
        );
    }

    #[test]
    fn detach_failure_restores_the_structure() {
        let h = harness();
        let gate = gate(&h);
        let mut world = MockVoxelWorldPort::new();
        world
            .expect_read()
            .returning(|_, _| Some(BlockData::solid("iron_block")));
        let writes = std::sync::atomic::AtomicUsize::new(0);
        world.expect_write().returning(move |_, pos, data| {
            if data.is_air() && writes.fetch_add(1, Ordering::SeqCst) == 2 {
                Err(WorldError::write_rejected(pos, "protected"))
            } else {
                Ok(())
            }
        });
        let ctx = MoverContext {
            world: Arc::new(world),
            ..h.ctx.clone()
        };
        let cancel = ctx.activity.try_acquire(gate.id()).unwrap();
        let (motion, timing) = east(3);
        let chosen = gate.clone().with_open_direction(RotateDirection::East);
        let err = BlockMover::start(ctx, chosen, motion, timing, false, cancel, None).unwrap_err();
        assert!(matches!(err, MoverError::Detach(_)));
        assert!(!h.ctx.activity.is_busy(gate.id()));
        assert_eq!(h.proxies.spawned_count(), 0);
        let stored = h.store.get(gate.id()).unwrap().unwrap();
        assert_eq!(stored.open_direction(), RotateDirection::None);
        assert_eq!(stored.cuboid(), gate.cuboid());
    }
}
