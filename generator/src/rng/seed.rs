//! Seed expansion with SplitMix64
//!
//! SplitMix64 turns any 64-bit seed, including 0, into well-mixed state
//! words. Its output function is a bijection of a counter that never repeats
//! within two steps, so two consecutive outputs are never both zero and the
//! expanded 128-bit state is never all zero.

/// Golden-ratio increment of the SplitMix64 counter
const GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 generator, used only to expand seeds
///
/// # Example
/// ```
/// use xoshiro_rng_core::SplitMix64;
///
/// let mut sm = SplitMix64::new(0);
/// assert_eq!(sm.next_u64(), 0xe220_a839_7b1d_cdaf);
/// ```
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Create an expander whose counter starts at `seed`
    ///
    /// ```
    /// use xoshiro_rng_core::SplitMix64;
    ///
    /// let mut a = SplitMix64::new(7);
    /// let mut b = SplitMix64::new(7);
    /// assert_eq!(a.next_u64(), b.next_u64());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Advance the counter by the golden-ratio increment and mix it
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

/// Expand a 64-bit seed into four state words, never all zero
///
/// Two SplitMix64 outputs are split low word first:
/// `[lo(a), hi(a), lo(b), hi(b)]`.
pub fn expand_seed(seed: u64) -> [u32; 4] {
    let mut sm = SplitMix64::new(seed);
    let a = sm.next_u64();
    let b = sm.next_u64();
    let state = [a as u32, (a >> 32) as u32, b as u32, (b >> 32) as u32];
    debug_assert_ne!(state, [0; 4], "SplitMix64 produced an all-zero state");
    state
}
