use bevy::prelude::*;

use crate::geometry::{world_corners, ParcelFootprint};
use crate::grid::BlockCells;
use crate::lot::{Parcel, ParcelRecord};
use crate::params::ParcelParams;
use crate::tracking::TransformChanged;

use super::classify::{apply_zoning, classify};

/// Refresh zoning and the world footprint of lots that moved this tick or
/// whose block cells were just attached or edited. A change to
/// `ParcelParams` reclassifies every lot, since the unzoned value feeds the
/// classification.
#[allow(clippy::type_complexity)]
pub fn reclassify_changed_parcels(
    params: Res<ParcelParams>,
    mut commands: Commands,
    mut lots: Query<(
        Entity,
        &Parcel,
        &Transform,
        Ref<BlockCells>,
        &mut ParcelRecord,
        Option<&TransformChanged>,
    )>,
) {
    let params_changed = params.is_changed();
    for (entity, parcel, transform, cells, mut record, moved) in &mut lots {
        if !(params_changed || moved.is_some() || cells.is_changed()) {
            continue;
        }

        if !cells.covers(parcel.size) {
            warn!(
                "Parcel {:?}: block grid {}x{} is smaller than lot {}",
                entity, cells.width, cells.depth, parcel.size
            );
        }

        let outcome = classify(&cells, parcel.size, params.unzoned);
        if record.zone != outcome.zone || record.is_uniformly_zoned() != outcome.uniform {
            apply_zoning(&mut record, outcome);
        }

        if moved.is_some() || cells.is_added() {
            commands
                .entity(entity)
                .try_insert(ParcelFootprint(world_corners(transform, parcel.size)));
        }
    }
}
