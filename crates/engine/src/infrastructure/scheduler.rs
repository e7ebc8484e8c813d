//! Tokio-backed scheduler.
//!
//! A single worker task plays the role of the host's synchronous world
//! thread: every [`SyncTask`] is funnelled through one channel and executed
//! in order. Repeating tasks run on their own tokio tasks, off the world
//! context, and must marshal world work back through
//! [`SchedulerPort::run_on_sync_thread`].

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::infrastructure::ports::{Repeat, RepeatingTask, SchedulerPort, SyncTask, TaskHandle};
use structmover_domain::kinematics::TICK_MILLIS;

fn ticks(count: u64) -> Duration {
    Duration::from_millis(count.saturating_mul(TICK_MILLIS as u64))
}

pub struct TokioScheduler {
    runtime: Handle,
    sync_tx: mpsc::UnboundedSender<SyncTask>,
}

impl TokioScheduler {
    /// Start the world worker on `runtime`.
    ///
    /// The worker stops once the scheduler and every task holding a sender
    /// are dropped.
    pub fn start(runtime: Handle) -> (Self, JoinHandle<()>) {
        let (sync_tx, mut sync_rx) = mpsc::unbounded_channel::<SyncTask>();
        let worker = runtime.spawn(async move {
            while let Some(task) = sync_rx.recv().await {
                task();
            }
            tracing::debug!("World worker stopped");
        });
        (Self { runtime, sync_tx }, worker)
    }

    fn submit(sync_tx: &mpsc::UnboundedSender<SyncTask>, task: SyncTask) {
        if sync_tx.send(task).is_err() {
            tracing::warn!("World worker is gone, dropping synchronous task");
        }
    }
}

impl SchedulerPort for TokioScheduler {
    fn run_repeating(
        &self,
        mut task: RepeatingTask,
        initial_delay_ticks: u64,
        period_ticks: u64,
    ) -> TaskHandle {
        let handle = TaskHandle::new();
        let cancel = handle.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(ticks(initial_delay_ticks)).await;
            let mut interval = tokio::time::interval(ticks(period_ticks.max(1)));
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if cancel.is_cancelled() || task() == Repeat::Stop {
                    break;
                }
            }
        });
        handle
    }

    fn run_delayed(&self, task: SyncTask, delay_ticks: u64) -> TaskHandle {
        let handle = TaskHandle::new();
        let cancel = handle.clone();
        let sync_tx = self.sync_tx.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(ticks(delay_ticks)).await;
            if cancel.is_cancelled() {
                return;
            }
            // Cancellation may still land while the task waits in the queue.
            Self::submit(
                &sync_tx,
                Box::new(move || {
                    if !cancel.is_cancelled() {
                        task();
                    }
                }),
            );
        });
        handle
    }

    fn run_on_sync_thread(&self, task: SyncTask) {
        Self::submit(&self.sync_tx, task);
    }
}
