//! Test fixtures: a deterministic scheduler and structure builders.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{structures, ManualScheduler};
//!
//! #[test]
//! fn gate_slides() {
//!     let scheduler = Arc::new(ManualScheduler::new());
//!     let gate = structures::sliding_gate();
//!     // ... open it, then
//!     scheduler.advance(100);
//! }
//! ```

pub mod structures;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::infrastructure::clock::ManualClock;
use crate::infrastructure::memory::InMemoryProxies;
use crate::infrastructure::ports::{
    Repeat, RepeatingTask, SchedulerPort, SyncTask, TaskHandle,
};

// =============================================================================
// Manual Scheduler
// =============================================================================

enum Job {
    Once(SyncTask),
    Repeating { task: RepeatingTask, period: u64 },
}

struct Timer {
    due: u64,
    /// Insertion order, keeps same-tick timers FIFO
    seq: u64,
    handle: TaskHandle,
    job: Job,
}

/// Scheduler driven by explicit [`ManualScheduler::advance`] calls.
///
/// Every tick advances the attached [`ManualClock`] by 50 ms, integrates the
/// attached proxies, runs due timers and then drains the world queue. No
/// lock is held while a task runs, so tasks may schedule further tasks.
pub struct ManualScheduler {
    now: AtomicU64,
    seq: AtomicU64,
    clock: Arc<ManualClock>,
    timers: Mutex<Vec<Timer>>,
    sync_queue: Mutex<VecDeque<SyncTask>>,
    physics: Mutex<Option<Arc<InMemoryProxies>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            now: AtomicU64::new(0),
            seq: AtomicU64::new(0),
            clock: Arc::new(ManualClock::new(DateTime::<Utc>::default())),
            timers: Mutex::new(Vec::new()),
            sync_queue: Mutex::new(VecDeque::new()),
            physics: Mutex::new(None),
        }
    }

    /// Clock advanced in lockstep with the scheduler.
    pub fn clock(&self) -> Arc<ManualClock> {
        self.clock.clone()
    }

    /// Integrate `proxies` once per tick.
    pub fn attach_physics(&self, proxies: Arc<InMemoryProxies>) {
        *lock(&self.physics) = Some(proxies);
    }

    pub fn now(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }

    /// Timers still waiting to fire, cancelled ones excluded.
    pub fn pending(&self) -> usize {
        lock(&self.timers)
            .iter()
            .filter(|timer| !timer.handle.is_cancelled())
            .count()
    }

    pub fn advance(&self, ticks: u64) {
        for _ in 0..ticks {
            let now = self.now.fetch_add(1, Ordering::SeqCst) + 1;
            self.clock.advance_ticks(1);
            let physics = lock(&self.physics).clone();
            if let Some(proxies) = physics {
                proxies.physics_tick();
            }
            self.run_due(now);
            self.drain_sync_queue();
        }
    }

    /// Advance until nothing is pending, up to `max_ticks`. Returns the
    /// ticks advanced.
    pub fn run_until_idle(&self, max_ticks: u64) -> u64 {
        self.drain_sync_queue();
        let mut advanced = 0;
        while advanced < max_ticks && self.pending() > 0 {
            self.advance(1);
            advanced += 1;
        }
        advanced
    }

    fn push(&self, due: u64, handle: TaskHandle, job: Job) {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        lock(&self.timers).push(Timer {
            due,
            seq,
            handle,
            job,
        });
    }

    fn run_due(&self, now: u64) {
        loop {
            let mut due: Vec<Timer> = {
                let mut timers = lock(&self.timers);
                let (ready, waiting) = std::mem::take(&mut *timers)
                    .into_iter()
                    .partition(|timer| timer.due <= now);
                *timers = waiting;
                ready
            };
            if due.is_empty() {
                return;
            }
            due.sort_by_key(|timer| (timer.due, timer.seq));

            for timer in due {
                if timer.handle.is_cancelled() {
                    continue;
                }
                match timer.job {
                    Job::Once(task) => task(),
                    Job::Repeating { mut task, period } => {
                        if task() == Repeat::Continue && !timer.handle.is_cancelled() {
                            self.push(
                                now + period,
                                timer.handle,
                                Job::Repeating { task, period },
                            );
                        }
                    }
                }
            }
        }
    }

    fn drain_sync_queue(&self) {
        loop {
            let next = lock(&self.sync_queue).pop_front();
            match next {
                Some(task) => task(),
                None => return,
            }
        }
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerPort for ManualScheduler {
    fn run_repeating(
        &self,
        task: RepeatingTask,
        initial_delay_ticks: u64,
        period_ticks: u64,
    ) -> TaskHandle {
        let handle = TaskHandle::new();
        self.push(
            self.now() + initial_delay_ticks.max(1),
            handle.clone(),
            Job::Repeating {
                task,
                period: period_ticks.max(1),
            },
        );
        handle
    }

    fn run_delayed(&self, task: SyncTask, delay_ticks: u64) -> TaskHandle {
        let handle = TaskHandle::new();
        self.push(self.now() + delay_ticks.max(1), handle.clone(), Job::Once(task));
        handle
    }

    fn run_on_sync_thread(&self, task: SyncTask) {
        lock(&self.sync_queue).push_back(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::elapsed_millis;
    use crate::infrastructure::ports::ClockPort;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn repeating_task_runs_every_period_until_stopped() {
        let scheduler = ManualScheduler::new();
        let runs = Arc::new(AtomicU32::new(0));
        let counted = runs.clone();
        scheduler.run_repeating(
            Box::new(move || {
                if counted.fetch_add(1, Ordering::SeqCst) + 1 == 3 {
                    Repeat::Stop
                } else {
                    Repeat::Continue
                }
            }),
            2,
            2,
        );
        scheduler.advance(1);
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        scheduler.advance(20);
        assert_eq!(runs.load(Ordering::SeqCst), 3);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn clock_follows_ticks() {
        let scheduler = ManualScheduler::new();
        let clock = scheduler.clock();
        let start = clock.now();
        scheduler.advance(4);
        assert_eq!(elapsed_millis(clock.as_ref(), start), 200);
    }

    #[test]
    fn tasks_may_schedule_tasks() {
        let scheduler = Arc::new(ManualScheduler::new());
        let ran = Arc::new(AtomicU32::new(0));
        let inner_ran = ran.clone();
        let inner_scheduler = scheduler.clone();
        scheduler.run_delayed(
            Box::new(move || {
                inner_scheduler.run_on_sync_thread(Box::new(move || {
                    inner_ran.fetch_add(1, Ordering::SeqCst);
                }));
            }),
            3,
        );
        scheduler.advance(3);
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancelled_tasks_are_skipped() {
        let scheduler = ManualScheduler::new();
        let ran = Arc::new(AtomicU32::new(0));
        let counted = ran.clone();
        let handle = scheduler.run_delayed(
            Box::new(move || {
                counted.fetch_add(1, Ordering::SeqCst);
            }),
            5,
        );
        handle.cancel();
        assert_eq!(scheduler.run_until_idle(100), 0);
        scheduler.advance(10);
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }
}
