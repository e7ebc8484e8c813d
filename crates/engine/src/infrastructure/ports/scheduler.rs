//! Tick-based scheduling port.
//!
//! One synchronous "world" context owns voxel writes and structure state.
//! Repeating tasks may run elsewhere; anything that touches the world must be
//! marshalled back with [`SchedulerPort::run_on_sync_thread`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Whether a repeating task wants another invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Continue,
    Stop,
}

pub type SyncTask = Box<dyn FnOnce() + Send + 'static>;
pub type RepeatingTask = Box<dyn FnMut() -> Repeat + Send + 'static>;

/// Cooperative cancellation handle of a scheduled task.
#[derive(Debug, Clone, Default)]
pub struct TaskHandle {
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

pub trait SchedulerPort: Send + Sync {
    /// Invoke `task` every `period_ticks` after `initial_delay_ticks`, until
    /// it returns [`Repeat::Stop`] or the handle is cancelled.
    fn run_repeating(
        &self,
        task: RepeatingTask,
        initial_delay_ticks: u64,
        period_ticks: u64,
    ) -> TaskHandle;

    /// Run `task` once on the synchronous context after `delay_ticks`.
    fn run_delayed(&self, task: SyncTask, delay_ticks: u64) -> TaskHandle;

    /// Run `task` on the synchronous context as soon as possible.
    fn run_on_sync_thread(&self, task: SyncTask);
}
