/// Pseudo-RNG using Sebastiano Vigna's [`SplitMix64`] algorithm.
///
/// [`SplitMix64`]: http://xoroshiro.di.unimi.it/splitmix64.c
///
/// Written in 2015 by Sebastiano Vigna (vigna@acm.org)
///
/// To the extent possible under law, the author has dedicated all copyright and related and
/// neighboring rights to this software to the public domain worldwide. This software is
/// distributed without any warranty.
///
/// See <http://creativecommons.org/publicdomain/zero/1.0/>.
pub fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// A deterministic [`SeedSource`](crate::SeedSource) stepping a [`splitmix64`] state.
///
/// Two `SplitMix64`s created from the same state hand out the same seeds in the same order, so
/// filters built from them hash every element to the same bits.
///
/// ```
/// use seedbloom::{BloomFilter, SplitMix64};
///
/// let a = BloomFilter::with_seed_source(1000, 3, &mut SplitMix64::new(7)).unwrap();
/// let b = BloomFilter::with_seed_source(1000, 3, &mut SplitMix64::new(7)).unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Creates a generator starting from `state`.
    pub const fn new(state: u64) -> Self {
        Self { state }
    }

    /// Advances the generator and returns the next output.
    pub fn next_u64(&mut self) -> u64 {
        splitmix64(&mut self.state)
    }
}
