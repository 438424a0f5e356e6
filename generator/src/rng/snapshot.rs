//! Snapshot - Save/Load generator state
//!
//! Enables pause/resume of a stream by persisting the four state words
//! verbatim, alongside an algorithm tag and a SHA-256 checksum.
//!
//! # Critical Invariants
//!
//! - **Determinism**: a restored generator continues the exact stream
//! - **Integrity**: a snapshot only restores if its checksum matches
//! - **Validity**: an all-zero state is rejected on restore

use crate::error::{Result, RngError};
use crate::rng::xoshiro::Xoshiro128;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Tag identifying the engine and scrambler a snapshot belongs to
pub const ALGORITHM: &str = "xoshiro128-rotl5x5";

/// Persisted generator state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngSnapshot {
    /// Engine/scrambler tag, must equal [`ALGORITHM`]
    pub algorithm: String,

    /// State words `[s0, s1, s2, s3]`
    pub state: [u32; 4],

    /// SHA-256 hex digest of `algorithm` + `state`
    pub checksum: String,
}

/// Fields covered by the checksum, in fixed serialization order
#[derive(Serialize)]
struct ChecksumInput<'a> {
    algorithm: &'a str,
    state: [u32; 4],
}

impl RngSnapshot {
    /// Compute deterministic SHA-256 digest of a snapshot's contents
    ///
    /// Hashes the JSON encoding of `algorithm` and `state` in that order.
    pub fn compute_checksum(algorithm: &str, state: [u32; 4]) -> Result<String> {
        let json = serde_json::to_string(&ChecksumInput { algorithm, state }).map_err(|e| {
            RngError::Serialization(format!("Checksum input serialization failed: {}", e))
        })?;

        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Capture the current state of a generator
    pub fn capture(rng: &Xoshiro128) -> Result<Self> {
        let state = rng.state();
        let checksum = Self::compute_checksum(ALGORITHM, state)?;
        Ok(Self {
            algorithm: ALGORITHM.to_string(),
            state,
            checksum,
        })
    }

    /// Encode as a single-line JSON object
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| RngError::Serialization(format!("Snapshot serialization failed: {}", e)))
    }

    /// Decode without validating; call [`restore`](Self::restore) to check it
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            RngError::Serialization(format!("Snapshot deserialization failed: {}", e))
        })
    }

    /// Validate and rebuild the generator
    ///
    /// # Errors
    /// - [`RngError::UnsupportedAlgorithm`] if the tag is foreign
    /// - [`RngError::ChecksumMismatch`] if contents were altered
    /// - [`RngError::ZeroState`] if the words are all zero
    pub fn restore(&self) -> Result<Xoshiro128> {
        if self.algorithm != ALGORITHM {
            return Err(RngError::UnsupportedAlgorithm(self.algorithm.clone()));
        }

        let actual = Self::compute_checksum(&self.algorithm, self.state)?;
        if actual != self.checksum {
            return Err(RngError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual,
            });
        }

        let rng = Xoshiro128::from_state(self.state)?;
        log::debug!("restored generator from snapshot {}", &self.checksum[..12]);
        Ok(rng)
    }
}

impl TryFrom<&Xoshiro128> for RngSnapshot {
    type Error = RngError;

    fn try_from(rng: &Xoshiro128) -> Result<Self> {
        Self::capture(rng)
    }
}
