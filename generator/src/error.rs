//! Error types for generator construction, restore, and configuration
//!
//! The transition function itself never returns an error: a bad bit count
//! there is a contract violation and panics. Everything here comes from the
//! fallible edges (seeding, snapshots, config, checked helpers).

use thiserror::Error;

/// Errors raised at the fallible edges of the generator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RngError {
    /// All four state words were zero
    #[error("Generator state must not be all zero")]
    ZeroState,

    /// Requested bit count outside [1, 32]
    #[error("Bit count {0} outside [1, 32]")]
    InvalidBitCount(u32),

    /// Empty half-open range
    #[error("Invalid range: min {min} must be less than max {max}")]
    InvalidRange { min: i64, max: i64 },

    /// Configuration could not be parsed or is inconsistent
    #[error("Invalid config: {0}")]
    Config(String),

    /// JSON encoding/decoding failure
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Snapshot was written by a different engine or scrambler
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Snapshot checksum did not match its contents
    #[error("Snapshot checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, RngError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RngError::ZeroState.to_string(),
            "Generator state must not be all zero"
        );
        assert_eq!(
            RngError::InvalidBitCount(33).to_string(),
            "Bit count 33 outside [1, 32]"
        );
        assert_eq!(
            RngError::InvalidRange { min: 5, max: 5 }.to_string(),
            "Invalid range: min 5 must be less than max 5"
        );
    }
}
