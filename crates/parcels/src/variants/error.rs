use std::fmt;

use bevy::prelude::*;

use crate::lot::LotSize;

use super::descriptor::VariantKind;

/// The host could not instantiate a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstantiateError {
    /// No footprint template is registered for the block width.
    MissingTemplate { block_width: u8 },
    /// The host refused the request for its own reasons.
    Rejected(String),
}

impl fmt::Display for InstantiateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstantiateError::MissingTemplate { block_width } => {
                write!(f, "no footprint template for block width {block_width}")
            }
            InstantiateError::Rejected(msg) => write!(f, "instantiation rejected: {msg}"),
        }
    }
}

impl std::error::Error for InstantiateError {}

/// A registration or pairing would break a cache invariant. The first
/// mapping always wins; the offending request is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Two different handles claim the same identity hash.
    HashCollision {
        hash: u64,
        identity: String,
        existing: Entity,
        rejected: Entity,
    },
    /// The handle is already registered under another identity.
    HandleReused { entity: Entity, identity: String },
    /// One side of a pairing already has a different twin.
    PairConflict {
        entity: Entity,
        existing_twin: Entity,
        requested_twin: Entity,
    },
    /// A variant cannot be its own twin.
    SelfPair(Entity),
    /// A pairing side is not of the kind its position requires: the first
    /// side must be real, the second a placeholder.
    KindMismatch {
        entity: Entity,
        expected: VariantKind,
        found: VariantKind,
    },
    /// The handle was never registered.
    UnknownHandle(Entity),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::HashCollision {
                hash,
                identity,
                existing,
                rejected,
            } => write!(
                f,
                "hash collision for '{identity}' ({hash:#018x}): {existing:?} already registered, rejected {rejected:?}"
            ),
            CacheError::HandleReused { entity, identity } => {
                write!(f, "{entity:?} is already registered as '{identity}'")
            }
            CacheError::PairConflict {
                entity,
                existing_twin,
                requested_twin,
            } => write!(
                f,
                "{entity:?} is already paired with {existing_twin:?}, cannot pair with {requested_twin:?}"
            ),
            CacheError::SelfPair(entity) => write!(f, "{entity:?} cannot be paired with itself"),
            CacheError::KindMismatch {
                entity,
                expected,
                found,
            } => write!(
                f,
                "{entity:?} is a {found:?} variant, expected {expected:?} in this pairing slot"
            ),
            CacheError::UnknownHandle(entity) => write!(f, "{entity:?} is not a registered variant"),
        }
    }
}

impl std::error::Error for CacheError {}

/// Why one (real, placeholder) pair was skipped during generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    Instantiate { size: LotSize, source: InstantiateError },
    Cache { size: LotSize, source: CacheError },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Instantiate { size, source } => {
                write!(f, "parcel variant pair {size} skipped: {source}")
            }
            GenerationError::Cache { size, source } => {
                write!(f, "parcel variant pair {size} rejected by cache: {source}")
            }
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerationError::Instantiate { source, .. } => Some(source),
            GenerationError::Cache { source, .. } => Some(source),
        }
    }
}
