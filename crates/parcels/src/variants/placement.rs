use bevy::prelude::*;

use crate::grid::BlockCells;
use crate::lot::{Parcel, ParcelFlags, ParcelRecord};
use crate::tracking::Watched;

use super::cache::VariantCache;
use super::descriptor::{ManagedParcel, SourceVariant, VariantKind};
use super::error::CacheError;

/// Spawn a live, watched lot from a registered variant.
///
/// Returns `None` if `variant` is not in the cache.
pub fn place_parcel(
    commands: &mut Commands,
    cache: &VariantCache,
    variant: Entity,
    transform: Transform,
) -> Option<Entity> {
    let descriptor = cache.lookup_descriptor(variant)?;

    let mut flags = ParcelFlags::default();
    flags.set(ParcelFlags::MANAGED, true);
    flags.set(
        ParcelFlags::PLACEHOLDER,
        descriptor.kind == VariantKind::Placeholder,
    );

    let entity = commands
        .spawn((
            Parcel {
                size: descriptor.size,
            },
            ParcelRecord {
                flags,
                ..Default::default()
            },
            BlockCells::for_lot(descriptor.size),
            SourceVariant(variant),
            ManagedParcel,
            Watched,
            transform,
        ))
        .id();
    Some(entity)
}

/// Swap a placed placeholder over to its real twin.
///
/// Returns the real variant now backing the lot. Lots already backed by a
/// real variant are left as they are.
pub fn commit_placeholder(
    cache: &VariantCache,
    source: &mut SourceVariant,
    record: &mut ParcelRecord,
) -> Result<Entity, CacheError> {
    let real = cache
        .resolve_real(source.0)
        .ok_or(CacheError::UnknownHandle(source.0))?;
    source.0 = real;
    record.flags.set(ParcelFlags::PLACEHOLDER, false);
    Ok(real)
}
