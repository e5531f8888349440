use bevy::prelude::*;

use super::snapshot::CachedTransform;
use super::{Deleted, Hidden, TransformChanged, Watched};

/// Entities the change detector looks at every tick.
pub type TrackedFilter = (With<Watched>, Without<Deleted>, Without<Hidden>);

/// Compare every tracked entity's snapshot with its live transform.
///
/// Runs as a parallel iteration; each entity belongs to exactly one batch,
/// so its snapshot has a single writer. Snapshot creation and the
/// `TransformChanged` marker are structural, so they go through
/// `ParallelCommands` and land at the next sync point, after the scan.
pub fn detect_transform_changes(
    par_commands: ParallelCommands,
    mut tracked: Query<(Entity, &Transform, Option<&mut CachedTransform>), TrackedFilter>,
) {
    tracked
        .par_iter_mut()
        .for_each(|(entity, transform, cached)| match cached {
            // First observation seeds the snapshot and is not a change.
            None => par_commands.command_scope(|mut commands| {
                commands
                    .entity(entity)
                    .try_insert(CachedTransform::from_transform(transform));
            }),
            Some(mut cached) => {
                if !cached.matches(transform) {
                    *cached = CachedTransform::from_transform(transform);
                    par_commands.command_scope(|mut commands| {
                        commands.entity(entity).try_insert(TransformChanged);
                    });
                }
            }
        });
}

/// Drop the snapshot of anything that stopped qualifying for tracking, so a
/// later re-qualification starts again from a fresh first observation.
#[allow(clippy::type_complexity)]
pub fn release_untracked_snapshots(
    mut commands: Commands,
    stale: Query<
        Entity,
        (
            With<CachedTransform>,
            Or<(Without<Watched>, With<Deleted>, With<Hidden>)>,
        ),
    >,
) {
    for entity in &stale {
        commands
            .entity(entity)
            .remove::<(CachedTransform, TransformChanged)>();
    }
}

/// Markers live for exactly one tick.
pub fn clear_transform_markers(
    mut commands: Commands,
    changed: Query<Entity, With<TransformChanged>>,
) {
    for entity in &changed {
        commands.entity(entity).remove::<TransformChanged>();
    }
}
