//! Busy flags, cancellation, shutdown and auto-close.

use structmover_domain::{MotionResult, StructureId};

use super::TestEngine;
use crate::test_fixtures::structures;

#[test]
fn concurrent_toggles_admit_exactly_one_mover() {
    let engine = TestEngine::new();
    let gate = structures::sliding_gate();
    engine.place(&gate);

    let results: Vec<MotionResult> = std::thread::scope(|scope| {
        let attempts: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| engine.toggle(gate.id())))
            .collect();
        attempts
            .into_iter()
            .map(|attempt| attempt.join().unwrap())
            .collect()
    });

    let successes = results.iter().filter(|r| **r == MotionResult::Success).count();
    let busy = results.iter().filter(|r| **r == MotionResult::Busy).count();
    assert_eq!(successes, 1);
    assert_eq!(busy, 7);
    assert_eq!(engine.stored(gate.id()).cuboid(), gate.cuboid());

    engine.settle();
    assert!(engine.stored(gate.id()).is_open());
}

#[test]
fn toggling_a_moving_structure_is_busy() {
    let engine = TestEngine::new();
    let gate = structures::sliding_gate();
    engine.place(&gate);

    assert_eq!(engine.toggle(gate.id()), MotionResult::Success);
    engine.scheduler.advance(5);
    assert_eq!(engine.toggle(gate.id()), MotionResult::Busy);
    assert_eq!(engine.stored(gate.id()).cuboid(), gate.cuboid());
}

#[test]
fn stopping_finalizes_once_without_leaks() {
    let engine = TestEngine::new();
    let gate = structures::sliding_gate().with_auto_close(5);
    engine.place(&gate);
    let elements = gate.cuboid().volume() as usize;

    assert_eq!(engine.toggle(gate.id()), MotionResult::Success);
    engine.scheduler.advance(8);
    assert_eq!(engine.proxies.live_count(), elements);

    assert!(engine.app.use_cases.structure.stop.execute(gate.id()));
    // the mover notices on its next tick
    engine.scheduler.advance(4);
    assert_eq!(engine.proxies.live_count(), 0);
    assert!(!engine.is_busy(gate.id()));
    assert_eq!(engine.world.refresh_count(), elements);
    assert!(!engine.app.stores.auto_close.is_scheduled(gate.id()));

    engine.settle();
    assert_eq!(engine.world.refresh_count(), elements);
    let stopped = engine.stored(gate.id());
    assert!(stopped.is_open());
    assert_eq!(stopped.open_distance(), Some(5));
}

#[test]
fn shutdown_finalizes_every_mover() {
    let engine = TestEngine::new();
    let gate = structures::sliding_gate();
    let door = structures::door();
    engine.place(&gate);
    engine.place(&door);

    assert_eq!(engine.toggle(gate.id()), MotionResult::Success);
    assert_eq!(engine.toggle(door.id()), MotionResult::Success);
    engine.scheduler.advance(6);

    assert_eq!(engine.app.shutdown(), 2);
    assert_eq!(engine.proxies.live_count(), 0);
    assert_eq!(engine.app.stores.activity.active_count(), 0);
    assert!(engine.stored(gate.id()).is_open());
    assert!(engine.stored(door.id()).is_open());

    // no new moves once the gate is closed
    assert_eq!(engine.toggle(gate.id()), MotionResult::Error);
    engine.settle();
    assert_eq!(engine.proxies.live_count(), 0);
}

#[test]
fn proxy_spawn_failure_leaves_a_consistent_structure() {
    let engine = TestEngine::new();
    let gate = structures::sliding_gate();
    engine.place(&gate);
    engine.proxies.fail_after(3);

    assert_eq!(engine.toggle(gate.id()), MotionResult::Error);
    assert_eq!(engine.proxies.live_count(), 0);
    assert!(!engine.is_busy(gate.id()));

    let stored = engine.stored(gate.id());
    let layout = engine.layout(&gate, 10);
    assert_eq!(layout.len(), gate.cuboid().volume() as usize);
    assert!(layout.iter().all(|(pos, _)| stored.cuboid().contains(*pos)));
}

#[test]
fn open_structure_closes_itself() {
    let engine = TestEngine::new();
    let gate = structures::sliding_gate().with_auto_close(1);
    engine.place(&gate);
    let before = engine.layout(&gate, 10);

    assert_eq!(engine.toggle(gate.id()), MotionResult::Success);
    engine.settle();

    let closed = engine.stored(gate.id());
    assert!(!closed.is_open());
    assert_eq!(closed.cuboid(), gate.cuboid());
    assert_eq!(engine.layout(&gate, 10), before);
    assert!(!engine.app.stores.auto_close.is_scheduled(gate.id()));
}

#[test]
fn unknown_structure_is_an_error() {
    let engine = TestEngine::new();
    assert_eq!(engine.toggle(StructureId::new()), MotionResult::Error);
}
