//! Persisted payload layout for the parcel core.
//!
//! Container-agnostic: this crate turns placed lots and their cached
//! transforms into versioned bitcode bytes and back. Framing those bytes
//! into a save file is left to the caller; [`payload_checksum`] is provided
//! for callers that want to detect corruption.

mod codec;
mod payload;
mod restore;
mod save_error;

pub use codec::{decode_payload, encode_payload, payload_checksum, PAYLOAD_VERSION};
pub use payload::{ParcelRecordPayload, ParcelSavePayload, TransformPayload};
pub use restore::{capture_parcels, restore_parcels};
pub use save_error::SaveError;
