use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::lot::LotSize;

use super::hash::identity_hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VariantKind {
    /// The committed lot.
    Real,
    /// Lightweight stand-in shown while the player is still placing.
    Placeholder,
}

impl VariantKind {
    pub fn label(self) -> &'static str {
        match self {
            VariantKind::Real => "Parcel",
            VariantKind::Placeholder => "Parcel Placeholder",
        }
    }

    /// Identity string of the variant of this kind for `size`,
    /// e.g. `"Parcel 3x4"`.
    pub fn identity(self, size: LotSize) -> String {
        format!("{} {}", self.label(), size)
    }
}

/// Registered metadata of one generated variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDescriptor {
    pub kind: VariantKind,
    pub size: LotSize,
    pub identity: String,
    pub hash: u64,
    pub entity: Entity,
}

impl VariantDescriptor {
    pub fn new(kind: VariantKind, size: LotSize, entity: Entity) -> Self {
        let identity = kind.identity(size);
        let hash = identity_hash(&identity);
        Self {
            kind,
            size,
            identity,
            hash,
            entity,
        }
    }
}

/// Tags a generated variant entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParcelVariant {
    pub kind: VariantKind,
    pub size: LotSize,
}

/// Shared footprint template a variant was generated against.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FootprintTemplate(pub Entity);

/// Marks lots owned by this crate so the host's default lot initializer
/// leaves them alone.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ManagedParcel;

/// Variant a live lot was placed from.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceVariant(pub Entity);

/// Query filter hosts add to their own lot initializer so it skips anything
/// this crate generated or placed.
pub type HostInitFilter = (Without<ParcelVariant>, Without<ManagedParcel>);

/// Whether `entity` belongs to this crate (a generated variant or a placed
/// lot) and must be skipped by the host's default lot initializer. The
/// per-entity form of [`HostInitFilter`].
pub fn is_host_managed(entity: Entity, world: &World) -> bool {
    world.get::<ParcelVariant>(entity).is_some() || world.get::<ManagedParcel>(entity).is_some()
}
