//! Speed, tick-rate and interpolation-budget computation.
//!
//! Motion is parameterized by a `step_sum` running from 0 to `end_value`
//! (blocks for translations, radians for rotations). The budget is expressed
//! in animation steps of `tick_rate` host ticks each.

/// Host ticks per second.
pub const TICKS_PER_SECOND: u32 = 20;

/// Wall-clock length of one host tick.
pub const TICK_MILLIS: i64 = 50;

/// Allowed speed range, in blocks per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedLimits {
    pub min: f64,
    pub max: f64,
}

impl SpeedLimits {
    pub fn clamp(&self, speed: f64) -> f64 {
        speed.clamp(self.min, self.max.max(self.min))
    }
}

impl Default for SpeedLimits {
    fn default() -> Self {
        Self { min: 0.5, max: 12.0 }
    }
}

/// Host ticks between two animation steps for a given speed.
///
/// Faster structures update more often so proxies don't visibly jump.
pub fn tick_rate_from_speed(speed: f64) -> u32 {
    if speed > 9.0 {
        1
    } else if speed > 7.0 {
        2
    } else if speed > 6.0 {
        3
    } else {
        4
    }
}

/// Precomputed interpolation budget of one animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionTiming {
    /// Speed of the fastest-moving voxel, blocks per second
    pub speed: f64,
    pub duration_secs: f64,
    /// Host ticks per animation step
    pub tick_rate: u32,
    /// Number of animation steps in the whole motion
    pub end_count: u32,
    /// `step_sum` at the end of the motion
    pub end_value: f64,
    /// `step_sum` increment per animation step
    pub step: f64,
}

impl MotionTiming {
    /// Budget for a motion whose fastest voxel travels `path_length` blocks.
    ///
    /// A positive `requested_secs` picks the speed; otherwise
    /// `default_speed` is used. Either way the speed is clamped to `limits`.
    pub fn for_path(
        path_length: f64,
        end_value: f64,
        requested_secs: f64,
        default_speed: f64,
        limits: SpeedLimits,
    ) -> Self {
        let path_length = path_length.abs().max(f64::EPSILON);
        let wanted = if requested_secs > 0.0 {
            path_length / requested_secs
        } else {
            default_speed
        };
        let speed = limits.clamp(wanted);
        Self::build(speed, path_length / speed, end_value)
    }

    /// Budget for a motion of fixed duration (continuous archetypes).
    pub fn for_duration(
        path_length: f64,
        end_value: f64,
        duration_secs: f64,
        limits: SpeedLimits,
    ) -> Self {
        let duration_secs = duration_secs.max(1.0 / f64::from(TICKS_PER_SECOND));
        let speed = limits.clamp(path_length.abs() / duration_secs);
        Self::build(speed, duration_secs, end_value)
    }

    fn build(speed: f64, duration_secs: f64, end_value: f64) -> Self {
        let tick_rate = tick_rate_from_speed(speed);
        let steps = f64::from(TICKS_PER_SECOND) / f64::from(tick_rate) * duration_secs;
        let end_count = (steps as u32).max(1);
        Self {
            speed,
            duration_secs,
            tick_rate,
            end_count,
            end_value,
            step: end_value / f64::from(end_count),
        }
    }

    /// Animation steps elapsed after `elapsed_ms` of wall-clock time.
    ///
    /// Derived from wall-clock time rather than callback count so that a
    /// lagging host does not slow the animation down.
    pub fn steps_elapsed(&self, elapsed_ms: i64) -> u32 {
        let per_step = TICK_MILLIS * i64::from(self.tick_rate);
        (elapsed_ms.max(0) / per_step).min(i64::from(u32::MAX)) as u32
    }

    /// Interpolation parameter after `steps` steps, clamped to the end.
    pub fn step_sum(&self, steps: u32) -> f64 {
        if steps >= self.end_count {
            self.end_value
        } else {
            self.step * f64::from(steps)
        }
    }

    /// Host ticks the whole animation takes.
    pub fn total_ticks(&self) -> u64 {
        u64::from(self.end_count) * u64::from(self.tick_rate)
    }
}
