use std::collections::HashSet;

use bevy::prelude::*;
use bevy::tasks::{ComputeTaskPool, TaskPool};

use super::snapshot::{CachedTransform, Observation};

/// One tracked entity as handed to [`scan_snapshots`].
#[derive(Debug, Clone, Copy)]
pub struct TrackedSlot {
    pub entity: Entity,
    pub live: Transform,
    pub snapshot: Option<CachedTransform>,
}

/// Entities whose snapshot was created or refreshed by a scan, in slot order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScanOutcome {
    /// First observation: snapshot seeded, no change emitted.
    pub created: Vec<Entity>,
    /// Snapshot overwritten; one change per entity.
    pub changed: Vec<Entity>,
}

/// Fork-join scan over plain storage.
///
/// `slots` is split into fixed chunks, each processed on the compute task
/// pool with its own output buffers. Buffers are merged in chunk order once
/// every task has finished, so the result does not depend on scheduling.
pub fn scan_snapshots(slots: &mut [TrackedSlot], chunk_size: usize) -> ScanOutcome {
    debug_assert!(
        has_unique_entities(slots),
        "scan_snapshots: an entity appears in more than one slot"
    );

    let chunk_size = chunk_size.max(1);
    let pool = ComputeTaskPool::get_or_init(TaskPool::default);
    let partials = pool.scope(|scope| {
        for chunk in slots.chunks_mut(chunk_size) {
            scope.spawn(async move { scan_chunk(chunk) });
        }
    });

    let mut outcome = ScanOutcome::default();
    for partial in partials {
        outcome.created.extend(partial.created);
        outcome.changed.extend(partial.changed);
    }
    outcome
}

fn scan_chunk(chunk: &mut [TrackedSlot]) -> ScanOutcome {
    let mut local = ScanOutcome::default();
    for slot in chunk {
        match slot.snapshot.as_mut() {
            None => {
                slot.snapshot = Some(CachedTransform::from_transform(&slot.live));
                local.created.push(slot.entity);
            }
            Some(snapshot) => {
                if snapshot.observe(&slot.live) == Observation::Changed {
                    local.changed.push(slot.entity);
                }
            }
        }
    }
    local
}

fn has_unique_entities(slots: &[TrackedSlot]) -> bool {
    let mut seen = HashSet::with_capacity(slots.len());
    slots.iter().all(|slot| seen.insert(slot.entity))
}
