//! Open structure use case.
//!
//! Validates a toggle request, plans the motion of the structure's archetype
//! and hands a committed plan to a [`BlockMover`]. Every failure path leaves
//! the structure untouched; the busy flag is only taken once every check has
//! passed.

use std::sync::{Arc, Weak};

use structmover_domain::kinematics::MotionTiming;
use structmover_domain::{MotionResult, RotateDirection, Structure, StructureId};

use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::ports::{NotifierPort, PermissionPort};
use crate::movers::{self, BlockMover, Kinematics, MoverContext, Plan, PlanContext, PlanError, Reopen};

/// Open structure use case.
///
/// Used identically by command handlers and by auto-close.
pub struct OpenStructure {
    ctx: MoverContext,
    permissions: Arc<dyn PermissionPort>,
    notifier: Arc<dyn NotifierPort>,
    config: Arc<EngineConfig>,
}

impl OpenStructure {
    pub fn new(
        ctx: MoverContext,
        permissions: Arc<dyn PermissionPort>,
        notifier: Arc<dyn NotifierPort>,
        config: Arc<EngineConfig>,
    ) -> Self {
        Self {
            ctx,
            permissions,
            notifier,
            config,
        }
    }

    /// Toggle `structure`.
    ///
    /// # Arguments
    /// * `duration_secs` - Requested run time, 0 for the archetype's default speed
    /// * `instant` - Skip the animation and place the structure at once
    /// * `silent` - Do not notify the owner of the outcome (logs are kept)
    ///
    /// Must run on the world context.
    pub fn execute(
        self: &Arc<Self>,
        structure: &Structure,
        duration_secs: f64,
        instant: bool,
        silent: bool,
    ) -> MotionResult {
        let result = self.attempt(structure, duration_secs, instant);
        if !silent && result.is_user_visible() {
            self.notifier
                .notify(structure.owner(), structure.id(), result);
        }
        result
    }

    fn attempt(self: &Arc<Self>, structure: &Structure, duration_secs: f64, instant: bool) -> MotionResult {
        let id = structure.id();
        let activity = &self.ctx.activity;

        // 1. Busy and state gates
        if !activity.may_continue() {
            tracing::warn!(structure_id = %id, "Engine is shutting down, refusing to move");
            return MotionResult::Error;
        }
        if activity.is_busy(id) {
            tracing::debug!(structure_id = %id, "Structure is busy");
            return MotionResult::Busy;
        }
        if structure.is_locked() {
            tracing::debug!(structure_id = %id, "Structure is locked");
            return MotionResult::Locked;
        }
        if self.config.is_disabled(structure.kind()) {
            tracing::debug!(structure_id = %id, kind = %structure.kind(), "Structure type is disabled");
            return MotionResult::TypeDisabled;
        }

        // 2. Region loaded
        let world_id = structure.world_id();
        if !self.ctx.world.is_loaded(world_id, &structure.cuboid()) {
            tracing::warn!(structure_id = %id, "Structure region is not loaded");
            return MotionResult::Error;
        }

        // 3. Size limits
        let blocks = structure.block_count();
        if self
            .config
            .max_structure_blocks
            .is_some_and(|limit| blocks > limit)
        {
            tracing::debug!(structure_id = %id, blocks, "Structure exceeds the size limit");
            return MotionResult::TooBig {
                instant_opened: false,
            };
        }
        let too_big = blocks > self.config.max_animated_blocks;
        let instant = instant || too_big;

        // 4. Direction and extent
        let plan = match movers::plan(&PlanContext {
            structure,
            world: self.ctx.world.as_ref(),
            requested_secs: duration_secs,
            continuous: self.config.continuous(),
        }) {
            Ok(plan) => plan,
            Err(err) => return self.plan_failed(id, err),
        };
        if !self.ctx.world.is_loaded(world_id, &plan.destination) {
            tracing::warn!(structure_id = %id, "Destination region is not loaded");
            return MotionResult::Error;
        }

        // 5. Permission on the destination only
        if let Some(reason) = self
            .permissions
            .can_modify(structure.owner(), world_id, &plan.destination)
        {
            tracing::debug!(structure_id = %id, reason = %reason, "Destination denied");
            return MotionResult::NoPermission;
        }

        // 6. Commit
        let Some(cancel) = activity.try_acquire(id) else {
            tracing::debug!(structure_id = %id, "Lost the race for the busy flag");
            return MotionResult::Busy;
        };
        let structure = self.remember_direction(structure, &plan);
        let timing = self.timing(&structure, &plan, duration_secs);

        match BlockMover::start(
            self.ctx.clone(),
            structure,
            plan.motion,
            timing,
            instant,
            cancel,
            Some(self.reopen()),
        ) {
            Ok(_) if too_big => MotionResult::TooBig {
                instant_opened: true,
            },
            Ok(_) => MotionResult::Success,
            Err(err) => {
                tracing::error!(structure_id = %id, error = %err, "Mover failed to start");
                MotionResult::Error
            }
        }
    }

    fn plan_failed(&self, id: StructureId, err: PlanError) -> MotionResult {
        match err {
            PlanError::NoDirection => {
                tracing::debug!(structure_id = %id, "No free direction");
                MotionResult::NoDirection
            }
            PlanError::InvalidShape(err) => {
                tracing::warn!(structure_id = %id, error = %err, "Cannot plan motion");
                MotionResult::Error
            }
            PlanError::NotLoaded(pos) => {
                tracing::warn!(structure_id = %id, pos = %pos, "Path crosses unloaded region");
                MotionResult::Error
            }
            PlanError::TooFar(blocks) => {
                tracing::debug!(structure_id = %id, blocks, "Travel exceeds the grid");
                MotionResult::TooBig {
                    instant_opened: false,
                }
            }
        }
    }

    /// Adopt the direction picked for a structure without a configured one.
    /// The mover persists it once the move is committed.
    fn remember_direction(&self, structure: &Structure, plan: &Plan) -> Structure {
        let mut structure = structure.clone();
        let opening = !structure.is_open() || plan.motion.is_continuous();
        if structure.open_direction() == RotateDirection::None
            && plan.direction != RotateDirection::None
            && opening
        {
            structure.set_open_direction(plan.direction);
        }
        structure
    }

    fn timing(&self, structure: &Structure, plan: &Plan, duration_secs: f64) -> MotionTiming {
        let limits = self.config.speed_limits();
        let end_value = plan.motion.end_value();
        match plan.duration_secs {
            Some(fixed) => MotionTiming::for_duration(plan.path_length, end_value, fixed, limits),
            None => MotionTiming::for_path(
                plan.path_length,
                end_value,
                duration_secs,
                self.config.default_speed_for(structure.kind()),
                limits,
            ),
        }
    }

    /// Callback re-running this opener on the stored structure.
    fn reopen(self: &Arc<Self>) -> Reopen {
        let opener: Weak<Self> = Arc::downgrade(self);
        Arc::new(move |id| {
            if let Some(opener) = opener.upgrade() {
                opener.auto_close(id);
            }
        })
    }

    fn auto_close(self: &Arc<Self>, id: StructureId) {
        match self.ctx.store.get(id) {
            Ok(Some(structure)) if structure.is_open() => {
                let result = self.execute(&structure, 0.0, false, true);
                tracing::debug!(structure_id = %id, result = %result, "Auto-close");
            }
            Ok(_) => tracing::debug!(structure_id = %id, "Auto-close skipped"),
            Err(err) => {
                tracing::warn!(structure_id = %id, error = %err, "Auto-close could not load structure");
            }
        }
    }
}
