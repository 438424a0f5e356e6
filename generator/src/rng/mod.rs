//! Deterministic random number generation
//!
//! Uses the xoshiro128 linear engine with a multiply-rotate-multiply
//! scrambler for fast, deterministic 32-bit output.
//! CRITICAL: every consumer draws bits through [`BitSource::next_bits`].

mod sampler;
mod seed;
mod snapshot;
mod source;
mod xoshiro;

pub use sampler::Sampler;
pub use seed::{expand_seed, SplitMix64};
pub use snapshot::{RngSnapshot, ALGORITHM};
pub use source::BitSource;
pub use xoshiro::{split_streams, Xoshiro128};
