// ---------------------------------------------------------------------------
// codec – versioned bitcode encoding of the parcel payload
// ---------------------------------------------------------------------------
//
// Byte layout:
//   [0]     Payload version (u8)
//   [1..]   bitcode-encoded ParcelSavePayload
//
// The leading byte is checked before bitcode sees the rest, so a payload
// from a newer build fails with VersionMismatch instead of a decode error.

use xxhash_rust::xxh32::xxh32;

use crate::payload::ParcelSavePayload;
use crate::save_error::SaveError;

/// Current payload version.
/// v1 = lot records + optional cached transform per lot
pub const PAYLOAD_VERSION: u8 = 1;

/// Seed for the xxHash32 payload checksum.
const XXHASH_SEED: u32 = 0;

/// Encode a payload behind its version byte.
///
/// # Errors
///
/// Returns [`SaveError::Encode`] if the payload claims a version this build
/// cannot write.
pub fn encode_payload(payload: &ParcelSavePayload) -> Result<Vec<u8>, SaveError> {
    if payload.version == 0 || payload.version > PAYLOAD_VERSION {
        return Err(SaveError::Encode(format!(
            "cannot write payload version {} (current is {})",
            payload.version, PAYLOAD_VERSION
        )));
    }

    let body = bitcode::encode(payload);
    let mut out = Vec::with_capacity(1 + body.len());
    out.push(payload.version);
    out.extend_from_slice(&body);
    Ok(out)
}

/// Decode bytes produced by [`encode_payload`].
///
/// # Errors
///
/// - [`SaveError::Decode`] for empty, truncated or corrupt bytes, or when the
///   version byte and the encoded version disagree.
/// - [`SaveError::VersionMismatch`] for a payload from a newer build.
pub fn decode_payload(bytes: &[u8]) -> Result<ParcelSavePayload, SaveError> {
    let (&version, body) = bytes
        .split_first()
        .ok_or_else(|| SaveError::Decode("empty payload".to_string()))?;

    if version > PAYLOAD_VERSION {
        return Err(SaveError::VersionMismatch {
            expected_max: PAYLOAD_VERSION,
            found: version,
        });
    }

    let payload: ParcelSavePayload = bitcode::decode(body)?;
    if payload.version != version {
        return Err(SaveError::Decode(format!(
            "version byte {version} does not match encoded version {}",
            payload.version
        )));
    }
    Ok(payload)
}

/// xxHash32 of encoded payload bytes, for callers that frame the payload.
pub fn payload_checksum(bytes: &[u8]) -> u32 {
    xxh32(bytes, XXHASH_SEED)
}
