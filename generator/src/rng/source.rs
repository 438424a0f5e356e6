//! Bit-stream capability and the convenience layer built on it
//!
//! A generator only has to provide [`BitSource::next_bits`]. Every other
//! method here is derived from repeated calls to it, so any implementor gets
//! bounded integers, floats, booleans and byte filling for free.

use crate::error::{Result, RngError};

/// 2^-53, the spacing of 53-bit mantissa floats in [0, 1)
const F64_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// 2^-24, the spacing of 24-bit mantissa floats in [0, 1)
const F32_UNIT: f32 = 1.0 / (1u32 << 24) as f32;

/// A source of uniformly distributed pseudo-random bits
///
/// # Example
/// ```
/// use xoshiro_rng_core::{BitSource, Xoshiro128};
///
/// let mut rng = Xoshiro128::from_seed(12345);
/// let byte = rng.next_bits(8);
/// assert!(byte < 256);
/// let die = rng.next_bounded(6) + 1;
/// assert!((1..=6).contains(&die));
/// ```
pub trait BitSource {
    /// Return the `num_bits` high-order bits of the next output word
    ///
    /// # Panics
    /// Implementations panic if `num_bits` is outside [1, 32].
    fn next_bits(&mut self, num_bits: u32) -> u32;

    /// Fallible variant of [`next_bits`](Self::next_bits)
    fn try_next_bits(&mut self, num_bits: u32) -> Result<u32> {
        if !(1..=32).contains(&num_bits) {
            return Err(RngError::InvalidBitCount(num_bits));
        }
        Ok(self.next_bits(num_bits))
    }

    /// Next full 32-bit word
    fn next_u32(&mut self) -> u32 {
        self.next_bits(32)
    }

    /// Next 64-bit value, high word drawn first
    fn next_u64(&mut self) -> u64 {
        let high = self.next_u32() as u64;
        let low = self.next_u32() as u64;
        (high << 32) | low
    }

    /// Fair coin flip from the top output bit
    fn next_bool(&mut self) -> bool {
        self.next_bits(1) == 1
    }

    /// Generate random f64 in range [0.0, 1.0)
    ///
    /// Uses 53 bits drawn as 26 + 27 from two consecutive words.
    fn next_f64(&mut self) -> f64 {
        let high = self.next_bits(26) as u64;
        let low = self.next_bits(27) as u64;
        ((high << 27) | low) as f64 * F64_UNIT
    }

    /// Generate random f32 in range [0.0, 1.0)
    fn next_f32(&mut self) -> f32 {
        self.next_bits(24) as f32 * F32_UNIT
    }

    /// Unbiased integer in [0, bound)
    ///
    /// Multiply-shift with rejection of the short low interval.
    ///
    /// # Panics
    /// Panics if `bound == 0`.
    fn next_bounded(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "bound must be non-zero");

        let mut m = self.next_u32() as u64 * bound as u64;
        let mut low = m as u32;
        if low < bound {
            let threshold = bound.wrapping_neg() % bound;
            while low < threshold {
                m = self.next_u32() as u64 * bound as u64;
                low = m as u32;
            }
        }
        (m >> 32) as u32
    }

    /// Generate random value in range [min, max)
    ///
    /// # Panics
    /// Panics if min >= max
    fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let span = max.wrapping_sub(min) as u64;
        // 2^64 mod span; values below it would bias the low residues
        let threshold = span.wrapping_neg() % span;
        loop {
            let value = self.next_u64();
            if value >= threshold {
                return min.wrapping_add((value % span) as i64);
            }
        }
    }

    /// Fallible variant of [`range`](Self::range)
    fn try_range(&mut self, min: i64, max: i64) -> Result<i64> {
        if min >= max {
            return Err(RngError::InvalidRange { min, max });
        }
        Ok(self.range(min, max))
    }

    /// Fill `dest` with little-endian bytes of successive words
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl<G: BitSource + ?Sized> BitSource for &mut G {
    fn next_bits(&mut self, num_bits: u32) -> u32 {
        (**self).next_bits(num_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of words, for exact adapter checks
    struct Scripted {
        words: Vec<u32>,
        pos: usize,
    }

    impl Scripted {
        fn new(words: &[u32]) -> Self {
            Self {
                words: words.to_vec(),
                pos: 0,
            }
        }
    }

    impl BitSource for Scripted {
        fn next_bits(&mut self, num_bits: u32) -> u32 {
            assert!((1..=32).contains(&num_bits));
            let word = self.words[self.pos % self.words.len()];
            self.pos += 1;
            word >> (32 - num_bits)
        }
    }

    #[test]
    fn test_next_u64_high_word_first() {
        let mut src = Scripted::new(&[0xDEAD_BEEF, 0x0123_4567]);
        assert_eq!(src.next_u64(), 0xDEAD_BEEF_0123_4567);
    }

    #[test]
    fn test_next_bool_uses_top_bit() {
        let mut src = Scripted::new(&[0x8000_0000, 0x7FFF_FFFF]);
        assert!(src.next_bool());
        assert!(!src.next_bool());
    }

    #[test]
    fn test_next_f64_extremes() {
        let mut zeros = Scripted::new(&[0]);
        assert_eq!(zeros.next_f64(), 0.0);

        let mut ones = Scripted::new(&[u32::MAX]);
        let max = ones.next_f64();
        assert!(max < 1.0);
        assert_eq!(max, 1.0 - F64_UNIT);
    }

    #[test]
    fn test_next_f32_extremes() {
        let mut ones = Scripted::new(&[u32::MAX]);
        let max = ones.next_f32();
        assert!(max < 1.0);
        assert_eq!(max, 1.0 - F32_UNIT);
    }

    #[test]
    fn test_try_next_bits_rejects_out_of_range() {
        let mut src = Scripted::new(&[1]);
        assert_eq!(src.try_next_bits(0), Err(RngError::InvalidBitCount(0)));
        assert_eq!(src.try_next_bits(33), Err(RngError::InvalidBitCount(33)));
        assert_eq!(src.try_next_bits(32), Ok(1));
    }

    #[test]
    fn test_next_bounded_rejects_biased_low_interval() {
        // bound = 3: threshold = 2^32 mod 3 = 1, so a word whose product has
        // low half 0 is rejected and the next word is used
        let mut src = Scripted::new(&[0, 0xFFFF_FFFF]);
        assert_eq!(src.next_bounded(3), 2);
        assert_eq!(src.pos, 2);
    }

    #[test]
    #[should_panic(expected = "bound must be non-zero")]
    fn test_next_bounded_zero_panics() {
        let mut src = Scripted::new(&[1]);
        src.next_bounded(0);
    }

    #[test]
    #[should_panic(expected = "min must be less than max")]
    fn test_range_invalid_bounds() {
        let mut src = Scripted::new(&[1]);
        src.range(100, 50);
    }

    #[test]
    fn test_try_range_invalid_bounds() {
        let mut src = Scripted::new(&[1]);
        assert_eq!(
            src.try_range(7, 7),
            Err(RngError::InvalidRange { min: 7, max: 7 })
        );
    }

    #[test]
    fn test_range_full_i64_span() {
        let mut src = Scripted::new(&[0x8000_0000, 0]);
        // span wraps to 2^64 - 1; value 2^63 maps to min + 2^63 = 0
        assert_eq!(src.range(i64::MIN, i64::MAX), 0);
    }

    #[test]
    fn test_fill_bytes_partial_tail() {
        let mut src = Scripted::new(&[0x0403_0201, 0x0807_0605]);
        let mut buf = [0u8; 6];
        src.fill_bytes(&mut buf);
        assert_eq!(buf, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn draw<G: BitSource>(mut source: G) -> u32 {
            source.next_u32()
        }

        let mut src = Scripted::new(&[42]);
        assert_eq!(draw(&mut src), 42);
        assert_eq!(src.pos, 1);
    }
}
