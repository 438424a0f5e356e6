//! Generator configuration
//!
//! A generator is configured from exactly one of a 64-bit `seed` or an
//! explicit 4-word `state`, optionally split into several jump-separated
//! streams.
//!
//! ```
//! use xoshiro_rng_core::GeneratorConfig;
//!
//! let config = GeneratorConfig::from_json(r#"{ "seed": 42, "streams": 2 }"#).unwrap();
//! let streams = config.build_streams().unwrap();
//! assert_eq!(streams.len(), 2);
//! ```

use crate::error::{Result, RngError};
use crate::rng::{split_streams, Xoshiro128};
use serde::{Deserialize, Serialize};

fn default_streams() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Seed expanded through SplitMix64
    #[serde(default)]
    pub seed: Option<u64>,

    /// Explicit state words, used verbatim
    #[serde(default)]
    pub state: Option<[u32; 4]>,

    /// Number of jump-separated streams to build
    #[serde(default = "default_streams")]
    pub streams: usize,
}

impl GeneratorConfig {
    /// Single-stream config seeded through SplitMix64
    ///
    /// ```
    /// use xoshiro_rng_core::{GeneratorConfig, Xoshiro128};
    ///
    /// let config = GeneratorConfig::from_seed(42);
    /// assert_eq!(config.build().unwrap(), Xoshiro128::from_seed(42));
    /// ```
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            state: None,
            streams: default_streams(),
        }
    }

    /// Single-stream config with an explicit state, checked on build
    ///
    /// ```
    /// use xoshiro_rng_core::{GeneratorConfig, RngError};
    ///
    /// let config = GeneratorConfig::from_state([0; 4]);
    /// assert_eq!(config.build(), Err(RngError::ZeroState));
    /// ```
    pub fn from_state(state: [u32; 4]) -> Self {
        Self {
            seed: None,
            state: Some(state),
            streams: default_streams(),
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RngError::Config(format!("Config parse failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that exactly one source is set and the state is usable
    pub fn validate(&self) -> Result<()> {
        match (self.seed, self.state) {
            (Some(_), Some(_)) => {
                return Err(RngError::Config(
                    "seed and state are mutually exclusive".to_string(),
                ))
            }
            (None, None) => {
                return Err(RngError::Config(
                    "one of seed or state is required".to_string(),
                ))
            }
            (None, Some(state)) if state == [0; 4] => return Err(RngError::ZeroState),
            _ => {}
        }

        if self.streams == 0 {
            return Err(RngError::Config("streams must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Build the first (or only) generator
    pub fn build(&self) -> Result<Xoshiro128> {
        self.validate()?;
        match (self.seed, self.state) {
            (Some(seed), _) => Ok(Xoshiro128::from_seed(seed)),
            (None, Some(state)) => Xoshiro128::from_state(state),
            (None, None) => Err(RngError::Config(
                "one of seed or state is required".to_string(),
            )),
        }
    }

    /// Build `streams` generators, each one `jump()` ahead of the previous
    pub fn build_streams(&self) -> Result<Vec<Xoshiro128>> {
        self.validate()?;
        if let Some(seed) = self.seed {
            return Ok(split_streams(seed, self.streams));
        }

        let mut current = self.build()?;
        let mut streams = Vec::with_capacity(self.streams);
        for _ in 0..self.streams {
            streams.push(current.clone());
            current.jump();
        }
        Ok(streams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streams_default_to_one() {
        let config = GeneratorConfig::from_json(r#"{ "seed": 1 }"#).unwrap();
        assert_eq!(config.streams, 1);
    }

    #[test]
    fn test_both_sources_rejected() {
        let config = GeneratorConfig {
            seed: Some(1),
            state: Some([1, 2, 3, 4]),
            streams: 1,
        };
        assert!(matches!(config.validate(), Err(RngError::Config(_))));
    }

    #[test]
    fn test_zero_streams_rejected() {
        let mut config = GeneratorConfig::from_seed(1);
        config.streams = 0;
        assert!(matches!(config.validate(), Err(RngError::Config(_))));
    }
}
