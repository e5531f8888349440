//! Generated lot variants and their bidirectional cache.
//!
//! Every lot size in range gets a real variant and a placeholder twin. Both
//! are keyed by a stable hash of their identity string and paired with each
//! other, so any of handle, hash or identity resolves to the rest.

mod cache;
mod context;
mod descriptor;
mod error;
mod factory;
mod generator;
mod hash;
mod placement;


pub use cache::VariantCache;
pub use context::{generate_parcel_variants, teardown_variants_on_exit, VariantContext};
pub use descriptor::{
    is_host_managed, FootprintTemplate, HostInitFilter, ManagedParcel, ParcelVariant,
    SourceVariant, VariantDescriptor, VariantKind,
};
pub use error::{CacheError, GenerationError, InstantiateError};
pub use factory::{BlockTemplates, VariantFactory, VariantRequest, WorldVariantFactory};
pub use generator::{generate_variants, GenerationReport};
pub use hash::{identity_hash, IDENTITY_HASH_VERSION};
pub use placement::{commit_placeholder, place_parcel};
