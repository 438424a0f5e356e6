//! Xoshiro RNG Core - Rust Engine
//!
//! Fast, deterministic, non-cryptographic pseudo-random number generation
//! built on the xoshiro128 linear engine with a `**`-style scrambler.
//!
//! # Architecture
//!
//! - **rng**: Generator core, seeding, convenience adapter, snapshots
//! - **config**: Serializable generator configuration
//! - **error**: Error taxonomy shared by every fallible API
//!
//! # Critical Invariants
//!
//! 1. The 128-bit state is never all-zero (seeding guarantees it)
//! 2. All arithmetic is exact 32-bit unsigned wraparound
//! 3. Same state → same stream, on every platform

// Module declarations
pub mod config;
pub mod error;
pub mod rng;

// Re-exports for convenience
pub use config::GeneratorConfig;
pub use error::{Result, RngError};
pub use rng::{
    expand_seed, split_streams, BitSource, RngSnapshot, Sampler, SplitMix64, Xoshiro128,
};
