// ---------------------------------------------------------------------------
// SaveError: error types for payload encode/decode
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while encoding or decoding a parcel payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    /// The payload could not be written (unsupported version field).
    Encode(String),
    /// Bitcode decoding failed (corrupt, truncated or empty bytes).
    Decode(String),
    /// Payload version is newer than this build supports.
    VersionMismatch { expected_max: u8, found: u8 },
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Encode(msg) => write!(f, "Encoding error: {msg}"),
            SaveError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            SaveError::VersionMismatch {
                expected_max,
                found,
            } => write!(
                f,
                "Version mismatch: payload is v{found}, but this build only supports up to v{expected_max}"
            ),
        }
    }
}

impl std::error::Error for SaveError {}

impl From<bitcode::Error> for SaveError {
    fn from(e: bitcode::Error) -> Self {
        SaveError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_error_display_decode() {
        let err = SaveError::Decode("invalid data".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("Decoding error"), "got: {msg}");
        assert!(msg.contains("invalid data"), "got: {msg}");
    }

    #[test]
    fn test_save_error_display_version_mismatch() {
        let err = SaveError::VersionMismatch {
            expected_max: 1,
            found: 9,
        };
        let msg = format!("{err}");
        assert!(msg.contains("v9"), "got: {msg}");
        assert!(msg.contains("v1"), "got: {msg}");
    }

    #[test]
    fn test_save_error_from_bitcode() {
        let err: SaveError = bitcode::decode::<u64>(&[])
            .map_err(SaveError::from)
            .expect_err("empty input is not a u64");
        assert!(matches!(err, SaveError::Decode(_)));
    }

    #[test]
    fn test_save_error_is_error_trait() {
        let err = SaveError::Encode("v0".to_string());
        assert!(std::error::Error::source(&err).is_none());
    }
}
