use bevy::prelude::*;

pub mod config;
pub mod geometry;
pub mod grid;
pub mod lot;
pub mod params;
pub mod parcel_sets;
pub mod tracking;
pub mod variants;
pub mod zoning;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

use params::ParcelParams;
use parcel_sets::ParcelSet;
use variants::VariantContext;

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Wires the parcel core into an `App`: parameters, the variant context and
/// its one-shot generation, and the per-tick change detection pipeline.
///
/// Hosts insert their own `ParcelParams` and `BlockTemplates` before adding
/// the plugin; missing ones fall back to defaults.
pub struct ParcelsPlugin;

impl Plugin for ParcelsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ParcelParams>()
            .init_resource::<variants::BlockTemplates>()
            .init_resource::<VariantContext>()
            .configure_sets(
                FixedUpdate,
                (ParcelSet::Detect, ParcelSet::React, ParcelSet::Cleanup).chain(),
            )
            .add_systems(Startup, variants::generate_parcel_variants)
            .add_systems(
                FixedUpdate,
                (
                    (
                        tracking::release_untracked_snapshots,
                        tracking::detect_transform_changes,
                    )
                        .chain()
                        .in_set(ParcelSet::Detect),
                    zoning::reclassify_changed_parcels.in_set(ParcelSet::React),
                    tracking::clear_transform_markers.in_set(ParcelSet::Cleanup),
                ),
            )
            .add_systems(Last, variants::teardown_variants_on_exit);
    }
}
