//! One animation step, free of scheduler and proxy handles.
//!
//! The mover feeds the wall-clock time since the animation started and the
//! current proxy positions; [`step`] answers with the interpolation
//! parameter, the velocity of every proxy and whether the run is over.

use glam::DVec3;

use super::Kinematics;
use structmover_domain::kinematics::MotionTiming;
use structmover_domain::BlockPos;

/// Fraction of the gap to the target position covered per host tick.
pub const DAMPING: f64 = 0.1;

/// Loop-local state carried between steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickState {
    /// Animation steps elapsed at the previous invocation
    pub steps: u32,
    /// Whether oriented payloads were already swapped
    pub replaced: bool,
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// Wall-clock milliseconds since the animation started
    pub elapsed_ms: i64,
    /// False once the engine shuts down or the run is cancelled
    pub may_continue: bool,
}

/// What the step function needs to know about one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementView {
    pub origin: BlockPos,
    pub radius: f64,
    /// Current proxy position
    pub position: DVec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickOutput {
    pub step_sum: f64,
    /// One velocity per element, in input order
    pub velocities: Vec<DVec3>,
    /// Swap rotatable proxies for their rotated payload now
    pub replace: bool,
    pub finish: bool,
    /// The run was cut short rather than completed
    pub aborted: bool,
}

/// Advance the animation to `input.elapsed_ms`.
pub fn step<K: Kinematics + ?Sized>(
    state: TickState,
    timing: &MotionTiming,
    kinematics: &K,
    elements: &[ElementView],
    input: TickInput,
) -> (TickState, TickOutput) {
    let raw_steps = timing.steps_elapsed(input.elapsed_ms);
    let steps = raw_steps.min(timing.end_count);
    let step_sum = timing.step_sum(steps);

    let aborted = !input.may_continue;
    let finish = state.finished || aborted || raw_steps > timing.end_count;

    let velocities = if finish {
        vec![DVec3::ZERO; elements.len()]
    } else {
        elements
            .iter()
            .map(|element| {
                let target = kinematics.position(element.origin, element.radius, step_sum);
                (target - element.position) * DAMPING
            })
            .collect()
    };

    let replace = !finish && !state.replaced && step_sum >= timing.end_value / 2.0;

    let next = TickState {
        steps,
        replaced: state.replaced || replace,
        finished: finish,
    };
    (
        next,
        TickOutput {
            step_sum,
            velocities,
            replace,
            finish,
            aborted: aborted && !state.finished,
        },
    )
}
