//! Generic sampling adapter over any [`BitSource`]
//!
//! Holds a generator by value (or by `&mut`, since `&mut G` is itself a
//! `BitSource`) and adds slice operations on top of the bit stream.

use crate::rng::source::BitSource;

/// Owning adapter adding slice helpers to a bit source
///
/// # Example
/// ```
/// use xoshiro_rng_core::{Sampler, Xoshiro128};
///
/// let mut sampler = Sampler::new(Xoshiro128::from_seed(42));
/// let mut deck: Vec<u32> = (0..52).collect();
/// sampler.shuffle(&mut deck);
/// let card = sampler.choose(&deck);
/// assert!(card.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Sampler<G> {
    source: G,
}

impl<G: BitSource> Sampler<G> {
    /// Wrap a generator, or a `&mut` borrow of one
    ///
    /// ```
    /// use xoshiro_rng_core::{Sampler, Xoshiro128};
    ///
    /// let mut rng = Xoshiro128::from_seed(1);
    /// let mut sampler = Sampler::new(&mut rng);
    /// assert!(sampler.index(10) < 10);
    /// ```
    pub fn new(source: G) -> Self {
        Self { source }
    }

    /// Borrow the wrapped generator
    pub fn inner(&self) -> &G {
        &self.source
    }

    /// Mutably borrow the wrapped generator
    pub fn inner_mut(&mut self) -> &mut G {
        &mut self.source
    }

    /// Unwrap the generator at its current position
    pub fn into_inner(self) -> G {
        self.source
    }

    /// Uniform index in [0, len)
    ///
    /// # Panics
    /// Panics if `len == 0` or `len > u32::MAX`.
    pub fn index(&mut self, len: usize) -> usize {
        assert!(
            len > 0 && len <= u32::MAX as usize,
            "len must be in [1, u32::MAX], got {}",
            len
        );
        self.source.next_bounded(len as u32) as usize
    }

    /// In-place Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }

    /// Uniformly chosen element, or `None` for an empty slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.index(items.len());
        items.get(idx)
    }
}

impl<G: BitSource> BitSource for Sampler<G> {
    fn next_bits(&mut self, num_bits: u32) -> u32 {
        self.source.next_bits(num_bits)
    }
}
