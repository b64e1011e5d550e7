//! Entropy sources for per-hasher seeds.

use crate::splitmix64::SplitMix64;

/// A supplier of hasher seeds.
///
/// Filters draw one seed per hash function from a `SeedSource` at construction and never again.
/// Passing a deterministic source such as [`SplitMix64`] makes a filter's bit layout
/// reproducible. `RngSeeds`, behind the `uniform-random` feature, adapts any `rand` generator
/// for unpredictable seeds.
pub trait SeedSource {
    /// Returns the next seed.
    fn next_seed(&mut self) -> u64;
}

impl<S: SeedSource + ?Sized> SeedSource for &mut S {
    #[inline]
    fn next_seed(&mut self) -> u64 {
        (**self).next_seed()
    }
}

impl SeedSource for SplitMix64 {
    #[inline]
    fn next_seed(&mut self) -> u64 {
        self.next_u64()
    }
}

/// Adapts a [`rand::RngCore`] into a [`SeedSource`].
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use seedbloom::{BloomFilter, RngSeeds};
///
/// let mut seeds = RngSeeds(StdRng::seed_from_u64(3));
/// let filter = BloomFilter::with_seed_source(512, 4, &mut seeds).unwrap();
/// assert_eq!(filter.num_hashes(), 4);
/// ```
#[cfg(feature = "uniform-random")]
#[derive(Debug, Clone)]
pub struct RngSeeds<R>(pub R);

#[cfg(feature = "uniform-random")]
impl RngSeeds<rand::rngs::ThreadRng> {
    /// Seeds drawn from the thread-local, OS-seeded generator.
    pub fn thread() -> Self {
        Self(rand::thread_rng())
    }
}

#[cfg(feature = "uniform-random")]
impl<R: rand::RngCore> SeedSource for RngSeeds<R> {
    #[inline]
    fn next_seed(&mut self) -> u64 {
        self.0.next_u64()
    }
}
