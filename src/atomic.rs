//! Implements a Bloom filter that can be shared between threads without locking.

use crate::{
    prelude::{draw_hashers, hashers_from_seeds, locate, num_words},
    BloomFilter, Error, Filter, IndexHasher, SeedSource,
};
use alloc::{boxed::Box, vec::Vec};
use core::sync::atomic::{AtomicU64, Ordering};

/// A [`BloomFilter`] whose bits are atomic words, so `insert` takes `&self`.
///
/// Bits only ever go from clear to set and no operation needs more than one bit to change
/// together, so each bit is set with a single relaxed `fetch_or`. A `contains` racing an
/// `insert` of the same element may miss it; once `insert` returns, the element is visible to
/// every later `contains` on any thread that synchronized with the inserter.
///
/// ```
/// use seedbloom::{AtomicBloomFilter, Filter, SplitMix64};
///
/// let filter = AtomicBloomFilter::with_seed_source(65_537, 4, &mut SplitMix64::new(2)).unwrap();
/// std::thread::scope(|s| {
///     for t in 0..4u32 {
///         let filter = &filter;
///         s.spawn(move || {
///             for i in 0..1_000u32 {
///                 filter.insert(&(t * 1_000 + i).to_le_bytes());
///             }
///         });
///     }
/// });
/// assert!((0..4_000u32).all(|i| filter.contains(&i.to_le_bytes())));
/// ```
#[derive(Debug)]
pub struct AtomicBloomFilter {
    num_bits: usize,
    hashers: Box<[IndexHasher]>,
    words: Box<[AtomicU64]>,
}

impl AtomicBloomFilter {
    /// Creates an empty filter seeded from the thread-local random generator.
    ///
    /// As with [`BloomFilter`], prefer odd sizes; see
    /// [choosing `num_bits`](BloomFilter#choosing-num_bits).
    #[cfg(feature = "uniform-random")]
    pub fn new(num_bits: usize, num_hashes: usize) -> Result<Self, Error> {
        Self::with_seed_source(num_bits, num_hashes, &mut crate::RngSeeds::thread())
    }

    /// Creates an empty filter drawing one distinct seed per hasher from `source`.
    pub fn with_seed_source<S>(
        num_bits: usize,
        num_hashes: usize,
        source: &mut S,
    ) -> Result<Self, Error>
    where
        S: SeedSource + ?Sized,
    {
        let hashers = draw_hashers(num_bits, num_hashes, source)?;
        Ok(Self::from_hashers(num_bits, hashers))
    }

    /// Creates an empty filter with one hasher per seed, in order.
    pub fn from_seeds(num_bits: usize, seeds: &[u64]) -> Result<Self, Error> {
        let hashers = hashers_from_seeds(num_bits, seeds)?;
        Ok(Self::from_hashers(num_bits, hashers))
    }

    fn from_hashers(num_bits: usize, hashers: Box<[IndexHasher]>) -> Self {
        tracing::debug!(
            num_bits,
            num_hashes = hashers.len(),
            "created atomic bloom filter"
        );
        let words = (0..num_words(num_bits)).map(|_| AtomicU64::new(0)).collect();
        Self {
            num_bits,
            hashers,
            words,
        }
    }

    /// Records `element` as a member.
    pub fn insert(&self, element: &[u8]) {
        tracing::trace!(len = element.len(), "inserting element");
        for hasher in self.hashers.iter() {
            let (word, mask) = locate(hasher.index(element));
            self.words[word].fetch_or(mask, Ordering::Relaxed);
        }
    }

    /// Number of hash functions probed per element.
    pub fn num_hashes(&self) -> usize {
        self.hashers.len()
    }

    /// The filter's hashers, in probe order.
    pub fn hashers(&self) -> &[IndexHasher] {
        &self.hashers
    }

    /// Number of bits currently set.
    pub fn bits_set(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Relaxed).count_ones() as usize)
            .sum()
    }

    /// Copies the current bits into a plain [`BloomFilter`] with the same hashers.
    pub fn snapshot(&self) -> BloomFilter {
        let words: Vec<u64> = self
            .words
            .iter()
            .map(|w| w.load(Ordering::Relaxed))
            .collect();
        BloomFilter::from_parts(self.num_bits, self.hashers.clone(), words.into_boxed_slice())
    }
}

impl Filter for AtomicBloomFilter {
    fn contains(&self, key: &[u8]) -> bool {
        self.hashers.iter().all(|hasher| {
            let (word, mask) = locate(hasher.index(key));
            self.words[word].load(Ordering::Relaxed) & mask != 0
        })
    }

    fn len(&self) -> usize {
        self.num_bits
    }
}

impl From<BloomFilter> for AtomicBloomFilter {
    fn from(filter: BloomFilter) -> Self {
        let words = filter.words().iter().copied().map(AtomicU64::new).collect();
        Self {
            num_bits: filter.len(),
            hashers: filter.hashers().into(),
            words,
        }
    }
}
