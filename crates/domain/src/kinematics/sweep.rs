//! Swept-volume and free-run queries used by openers.
//!
//! These are pure: the caller supplies the passability test.

use crate::value_objects::{Axis, BlockFace, BlockPos, Cuboid};

/// Voxels swept by a quarter turn of a straight arm of `length` voxels.
///
/// The arm starts at `pivot`, extends towards `from` and ends up extending
/// towards `to`. The pivot column itself and the arm's current voxels are
/// excluded; the destination arm is included. `span` is the inclusive range
/// along the rotation axis (the door height, the bridge width, ...).
pub fn quarter_sweep(
    pivot: BlockPos,
    from: BlockFace,
    to: BlockFace,
    length: i32,
    axis: Axis,
    span: (i32, i32),
) -> Vec<BlockPos> {
    let reach = (f64::from(length) + 0.5).powi(2);
    let mut swept = Vec::new();
    for a in 0..=length {
        for b in 1..=length {
            if f64::from(a * a + b * b) > reach {
                continue;
            }
            let base = pivot.relative(from, a).relative(to, b);
            for along in span.0..=span.1 {
                swept.push(base.with_component(axis, along));
            }
        }
    }
    swept
}

/// Number of whole steps `layer` can be pushed through `face` before a voxel
/// fails `is_free`, capped at `max_steps`.
///
/// `layer` is the structure's outermost slice on `face`; each step tests the
/// slice shifted one further voxel out.
pub fn free_run(
    layer: Cuboid,
    face: BlockFace,
    max_steps: u32,
    is_free: impl Fn(BlockPos) -> bool,
) -> u32 {
    let step = face.offset();
    let mut run = 0;
    while run < max_steps {
        let probe = layer.translate(step * (run as i32 + 1));
        if !probe.positions().all(&is_free) {
            break;
        }
        run += 1;
    }
    run
}
