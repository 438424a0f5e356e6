//! xoshiro128 generator with a multiply-rotate-multiply scrambler
//!
//! This is a fast, high-quality PRNG that is deterministic and suitable
//! for simulation purposes. It is NOT cryptographically secure: observing
//! outputs is enough to reconstruct the state.
//!
//! # Algorithm
//!
//! The state is four 32-bit words updated by the xoshiro128 linear engine
//! (Blackman & Vigna, `xoshiro128starstar.c`). The output word is taken from
//! `s0` before the update and scrambled as `rotl(s0 * 0x9E3779BB, 5) * 5`
//! (the scrambler of `xoroshiro64starstar.c`). Period is 2^128 - 1.
//!
//! # Determinism
//!
//! Same state → same sequence of words. This is CRITICAL for:
//! - Debugging (reproduce exact simulation)
//! - Testing (golden vectors)
//! - Research (validate results)
//!
//! # Precondition
//!
//! The state must never be all zero: zero is a fixed point of the update and
//! yields zero output forever. [`Xoshiro128::from_state`] and
//! [`Xoshiro128::from_seed`] establish this; [`Xoshiro128::next_bits`] does
//! not re-check it.

use crate::error::{Result, RngError};
use crate::rng::seed::expand_seed;
use crate::rng::source::BitSource;
use serde::{Deserialize, Serialize};

/// First scrambler multiplier
const MULTIPLIER: u32 = 0x9E37_79BB;

/// Scrambler rotation
const ROTATION: u32 = 5;

/// Second scrambler multiplier
const SCRAMBLE: u32 = 5;

/// Shift applied to `s1` for the `t` term
const SHIFT: u32 = 9;

/// Rotation applied to `s3` at the end of each step
const STATE_ROTATION: u32 = 11;

/// Jump polynomial: advances the engine by 2^64 steps
const JUMP: [u32; 4] = [0x8764_000b, 0xf542_d2d3, 0x6fa0_35c3, 0x77f2_db5b];

/// Long-jump polynomial: advances the engine by 2^96 steps
const LONG_JUMP: [u32; 4] = [0xb523_952e, 0x0b6f_099f, 0xccf5_a0ef, 0x1c58_0662];

/// Deterministic 32-bit generator over a 128-bit state
///
/// # Example
/// ```
/// use xoshiro_rng_core::Xoshiro128;
///
/// let mut rng = Xoshiro128::from_state([1, 2, 3, 4]).unwrap();
/// assert_eq!(rng.next_bits(32), 0xe2ac153f);
/// assert_eq!(rng.state(), [0x7, 0x0, 0x402, 0x3000]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawState")]
pub struct Xoshiro128 {
    /// Internal state `[s0, s1, s2, s3]`, never all zero
    state: [u32; 4],
}

/// Unvalidated wire form; converted through `TryFrom` on deserialize
#[derive(Deserialize)]
struct RawState {
    state: [u32; 4],
}

impl TryFrom<RawState> for Xoshiro128 {
    type Error = RngError;

    fn try_from(raw: RawState) -> Result<Self> {
        Self::from_state(raw.state)
    }
}

impl Xoshiro128 {
    /// Create a generator from four state words
    ///
    /// # Errors
    /// Returns [`RngError::ZeroState`] if every word is zero.
    ///
    /// # Example
    /// ```
    /// use xoshiro_rng_core::{RngError, Xoshiro128};
    ///
    /// assert!(Xoshiro128::from_state([0, 0, 0, 1]).is_ok());
    /// assert_eq!(Xoshiro128::from_state([0; 4]), Err(RngError::ZeroState));
    /// ```
    pub fn from_state(state: [u32; 4]) -> Result<Self> {
        if state == [0; 4] {
            return Err(RngError::ZeroState);
        }
        Ok(Self { state })
    }

    /// Create a generator from a 64-bit seed expanded with SplitMix64
    ///
    /// Every seed, including 0, yields a valid non-zero state.
    pub fn from_seed(seed: u64) -> Self {
        let state = expand_seed(seed);
        log::debug!("seeded xoshiro128 from {:#x}: {:08x?}", seed, state);
        Self { state }
    }

    /// Get current state words (for checkpointing/replay)
    ///
    /// ```
    /// use xoshiro_rng_core::Xoshiro128;
    ///
    /// let rng = Xoshiro128::from_seed(12345);
    /// let saved = rng.state();
    /// let rng2 = Xoshiro128::from_state(saved).unwrap();
    /// assert_eq!(rng, rng2);
    /// ```
    pub fn state(&self) -> [u32; 4] {
        self.state
    }

    /// Return the `num_bits` high-order bits of the next scrambled word
    ///
    /// The word is derived from the state before it advances, so
    /// `next_bits(n)` equals `next_bits(32) >> (32 - n)` from the same
    /// starting state.
    ///
    /// # Panics
    /// Panics if `num_bits` is outside [1, 32], in every build profile.
    #[inline]
    pub fn next_bits(&mut self, num_bits: u32) -> u32 {
        assert!(
            (1..=32).contains(&num_bits),
            "num_bits must be in [1, 32], got {}",
            num_bits
        );

        let result = self.state[0]
            .wrapping_mul(MULTIPLIER)
            .rotate_left(ROTATION)
            .wrapping_mul(SCRAMBLE);
        self.step();
        result >> (32 - num_bits)
    }

    /// Advance the linear engine by one step
    #[inline(always)]
    fn step(&mut self) {
        let [mut s0, mut s1, mut s2, mut s3] = self.state;
        let t = s1 << SHIFT;

        s2 ^= s0;
        s3 ^= s1;
        s1 ^= s2;
        s0 ^= s3;
        s2 ^= t;
        s3 = s3.rotate_left(STATE_ROTATION);

        self.state = [s0, s1, s2, s3];
    }

    /// Advance the state by 2^64 steps
    ///
    /// Generates 2^64 non-overlapping subsequences for parallel use.
    pub fn jump(&mut self) {
        self.apply_polynomial(&JUMP);
    }

    /// Advance the state by 2^96 steps
    pub fn long_jump(&mut self) {
        self.apply_polynomial(&LONG_JUMP);
    }

    fn apply_polynomial(&mut self, polynomial: &[u32; 4]) {
        let mut acc = [0u32; 4];
        for &word in polynomial {
            for bit in 0..32 {
                if word & (1u32 << bit) != 0 {
                    for (a, s) in acc.iter_mut().zip(self.state.iter()) {
                        *a ^= *s;
                    }
                }
                self.step();
            }
        }
        self.state = acc;
    }
}

impl BitSource for Xoshiro128 {
    #[inline]
    fn next_bits(&mut self, num_bits: u32) -> u32 {
        Xoshiro128::next_bits(self, num_bits)
    }
}

/// Build `count` generators from one seed, each a `jump()` apart
///
/// Stream `i` starts `i * 2^64` words into the sequence seeded by `seed`,
/// so streams never overlap in practice.
///
/// ```
/// use xoshiro_rng_core::split_streams;
///
/// let streams = split_streams(7, 4);
/// assert_eq!(streams.len(), 4);
/// assert_ne!(streams[0], streams[1]);
/// ```
pub fn split_streams(seed: u64, count: usize) -> Vec<Xoshiro128> {
    let mut streams = Vec::with_capacity(count);
    let mut current = Xoshiro128::from_seed(seed);
    for _ in 0..count {
        streams.push(current.clone());
        current.jump();
    }
    log::debug!("split seed {:#x} into {} jump-separated streams", seed, count);
    streams
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> Xoshiro128 {
        Xoshiro128::from_state([1, 2, 3, 4]).unwrap()
    }

    #[test]
    fn test_first_step_by_hand() {
        // s0 = 1: 1 * 0x9E3779BB = 0x9E3779BB, rotl 5 = 0xC6EF3773,
        // * 5 = 0x3_E2AC_153F -> 0xE2AC153F
        let mut rng = reference();
        assert_eq!(rng.next_bits(32), 0xE2AC_153F);
        // t = 2 << 9 = 0x400; s2 = 3^1 = 2; s3 = 4^2 = 6; s1 = 2^2 = 0;
        // s0 = 1^6 = 7; s2 = 2^0x400 = 0x402; s3 = rotl(6, 11) = 0x3000
        assert_eq!(rng.state(), [0x7, 0x0, 0x402, 0x3000]);
    }

    #[test]
    fn test_zero_state_rejected() {
        assert_eq!(Xoshiro128::from_state([0; 4]), Err(RngError::ZeroState));
    }

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let rng = Xoshiro128::from_seed(0);
        assert_ne!(rng.state(), [0; 4], "Zero seed should expand to a non-zero state");
    }

    #[test]
    fn test_thirty_two_bits_is_unshifted() {
        let mut a = reference();
        let mut b = reference();
        assert_eq!(a.next_bits(32), b.next_u32());
    }

    #[test]
    fn test_truncated_matches_full_width() {
        for bits in 1..=32 {
            let mut full = reference();
            let mut truncated = reference();
            let word = full.next_bits(32);
            assert_eq!(truncated.next_bits(bits), word >> (32 - bits));
            assert_eq!(full.state(), truncated.state());
        }
    }

    #[test]
    #[should_panic(expected = "num_bits must be in [1, 32], got 0")]
    fn test_zero_bits_panics() {
        reference().next_bits(0);
    }

    #[test]
    #[should_panic(expected = "num_bits must be in [1, 32], got 33")]
    fn test_thirty_three_bits_panics() {
        reference().next_bits(33);
    }

    #[test]
    fn test_jump_reference_state() {
        let mut rng = reference();
        rng.jump();
        assert_eq!(rng.state(), [0xa976_5206, 0x797a_a168, 0x5b62_e331, 0x02ab_d971]);
    }

    #[test]
    fn test_long_jump_reference_state() {
        let mut rng = reference();
        rng.long_jump();
        assert_eq!(rng.state(), [0x6014_af26, 0x7eb5_a852, 0x399f_bba1, 0xbe5e_bfce]);
    }

    #[test]
    fn test_jump_commutes_with_step() {
        let mut step_then_jump = reference();
        step_then_jump.next_u32();
        step_then_jump.jump();

        let mut jump_then_step = reference();
        jump_then_step.jump();
        jump_then_step.next_u32();

        assert_eq!(step_then_jump.state(), jump_then_step.state());
    }

    #[test]
    fn test_split_streams_are_jump_separated() {
        let streams = split_streams(99, 3);
        let mut expected = Xoshiro128::from_seed(99);
        for stream in &streams {
            assert_eq!(stream, &expected);
            expected.jump();
        }
    }

    #[test]
    fn test_split_streams_empty() {
        assert!(split_streams(1, 0).is_empty());
    }

    #[test]
    fn test_serde_round_trip_preserves_stream() {
        let mut rng = Xoshiro128::from_seed(2024);
        rng.next_u32();
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xoshiro128 = serde_json::from_str(&json).unwrap();
        assert_eq!(rng.next_u32(), restored.next_u32());
    }

    #[test]
    fn test_deserialize_rejects_zero_state() {
        let err = serde_json::from_str::<Xoshiro128>(r#"{"state":[0,0,0,0]}"#).unwrap_err();
        assert!(err.to_string().contains("must not be all zero"));
    }
}
