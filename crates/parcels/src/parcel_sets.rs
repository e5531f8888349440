//! Ordering of the per-tick parcel systems.
//!
//! ```text
//! Detect  →  React  →  Cleanup
//! ```
//!
//! * **Detect** – release snapshots of entities that stopped qualifying, then
//!   compare every tracked transform against its snapshot. Snapshot inserts
//!   and `TransformChanged` markers are deferred and applied at the sync
//!   point that follows this set.
//! * **React** – dependent subsystems observe `TransformChanged`. Host
//!   reactors belong here so they see each change exactly once.
//! * **Cleanup** – markers are removed so they never survive a tick.

use bevy::prelude::*;

/// Ordered phases for the parcel systems in `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParcelSet {
    Detect,
    React,
    Cleanup,
}
