//! Transform change detection.
//!
//! Per entity: `Unwatched → Watched (no snapshot) → Watched (clean) ⇄
//! Watched (changed this tick)`, back to `Unwatched` once the entity is
//! deleted, hidden or no longer watched.

mod scan;
mod snapshot;
mod systems;


pub use scan::{scan_snapshots, ScanOutcome, TrackedSlot};
pub use snapshot::{approx_eq, CachedTransform, Observation};
pub use systems::{
    clear_transform_markers, detect_transform_changes, release_untracked_snapshots,
    TrackedFilter,
};

use bevy::prelude::*;

/// Opt-in marker for change detection.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Watched;

/// Entity is pending deletion and no longer tracked.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Deleted;

/// Entity is hidden and no longer tracked.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Hidden;

/// One-tick marker raised when a tracked transform moved.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct TransformChanged;
