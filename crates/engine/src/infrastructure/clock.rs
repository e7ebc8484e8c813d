//! Clock implementations.
//!
//! Movers measure elapsed animation time from the clock rather than from the
//! number of tick callbacks, so tests drive time explicitly.

use chrono::{DateTime, Utc};

use crate::infrastructure::ports::ClockPort;

/// System clock - uses real time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for testing.
#[cfg(test)]
pub struct ManualClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Mutex::new(start),
        }
    }

    pub fn advance_ticks(&self, ticks: u64) {
        let mut now = self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *now += chrono::Duration::milliseconds(
            structmover_domain::kinematics::TICK_MILLIS * ticks as i64,
        );
    }
}

#[cfg(test)]
impl ClockPort for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Milliseconds elapsed on `clock` since `since`, never negative.
pub fn elapsed_millis(clock: &dyn ClockPort, since: DateTime<Utc>) -> i64 {
    (clock.now() - since).num_milliseconds().max(0)
}
