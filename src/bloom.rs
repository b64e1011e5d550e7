//! Implements a seeded Bloom filter over packed 64-bit words.

use crate::{
    prelude::{draw_hashers, hashers_from_seeds, locate, num_words},
    Error, Filter, IndexHasher, SeedSource,
};
use alloc::{boxed::Box, vec};

/// A Bloom filter: `len()` bits probed by `num_hashes()` independently seeded hashers.
///
/// Inserting an element sets the bit each hasher selects for it; an element is reported present
/// only if all of its bits are set. Bits are never cleared, so there are no false negatives. A
/// small share of elements never inserted will still be reported present.
///
/// ```
/// use seedbloom::{BloomFilter, Filter, SplitMix64};
///
/// let mut filter = BloomFilter::with_seed_source(1000, 3, &mut SplitMix64::new(1)).unwrap();
/// filter.insert(b"apple");
/// filter.insert(b"banana");
/// filter.insert(b"cherry");
///
/// // no false negatives
/// assert!(filter.contains(b"apple"));
/// assert!(filter.contains(b"banana"));
/// assert!(filter.contains(b"cherry"));
///
/// // "grape" was never inserted, but may still be reported as a false positive
/// let _maybe = filter.contains(b"grape");
/// ```
///
/// Filters built from the same seeds hash identically, which makes bit layouts reproducible:
///
/// ```
/// use seedbloom::{BloomFilter, SplitMix64};
///
/// let mut a = BloomFilter::with_seed_source(257, 4, &mut SplitMix64::new(11)).unwrap();
/// let mut b = BloomFilter::from_seeds(257, &a.seeds().collect::<Vec<_>>()).unwrap();
/// a.insert(b"key");
/// b.insert(b"key");
/// assert_eq!(a, b);
/// ```
///
/// # Choosing `num_bits`
///
/// Prefer an odd, ideally prime, number of bits. FNV-1a only carries upward, so with a
/// power-of-two size every hasher reads the same low bits of the element's hash. Elements that
/// agree on those bits then collide under all hashers at once, and adding hashers stops lowering
/// the false positive rate: at 10 bits per element and 7 hashers, `1 << 20` bits give roughly a
/// 10% false positive rate where `1_000_003` bits give under 1%.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomFilter {
    num_bits: usize,
    hashers: Box<[IndexHasher]>,
    words: Box<[u64]>,
}

impl BloomFilter {
    /// Creates an empty filter of `num_bits` bits and `num_hashes` hashers seeded from the
    /// thread-local random generator.
    ///
    /// Fails if either parameter is zero. Power-of-two sizes degrade the false positive rate;
    /// see [choosing `num_bits`](BloomFilter#choosing-num_bits).
    #[cfg(feature = "uniform-random")]
    pub fn new(num_bits: usize, num_hashes: usize) -> Result<Self, Error> {
        Self::with_seed_source(num_bits, num_hashes, &mut crate::RngSeeds::thread())
    }

    /// Creates an empty filter drawing one distinct seed per hasher from `source`.
    ///
    /// Fails if either parameter is zero, or if `source` keeps repeating seeds it already gave.
    /// Power-of-two sizes degrade the false positive rate; see
    /// [choosing `num_bits`](BloomFilter#choosing-num_bits).
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
    ///
    /// Fails if `num_bits` is zero, `seeds` is empty, or `seeds` repeats a value.
    ///
    /// ```
    /// use seedbloom::{BloomFilter, Error};
    ///
    /// assert_eq!(BloomFilter::from_seeds(64, &[]), Err(Error::ZeroHashes));
    /// assert_eq!(BloomFilter::from_seeds(64, &[3, 3]), Err(Error::DuplicateSeed(3)));
    /// assert_eq!(BloomFilter::from_seeds(64, &[1, 2, 3]).unwrap().num_hashes(), 3);
    /// ```
    pub fn from_seeds(num_bits: usize, seeds: &[u64]) -> Result<Self, Error> {
        let hashers = hashers_from_seeds(num_bits, seeds)?;
        Ok(Self::from_hashers(num_bits, hashers))
    }

    fn from_hashers(num_bits: usize, hashers: Box<[IndexHasher]>) -> Self {
        tracing::debug!(num_bits, num_hashes = hashers.len(), "created bloom filter");
        Self {
            num_bits,
            hashers,
            words: vec![0u64; num_words(num_bits)].into_boxed_slice(),
        }
    }

    /// Records `element` as a member. Inserting the same element again changes nothing.
    pub fn insert(&mut self, element: &[u8]) {
        tracing::trace!(len = element.len(), "inserting element");
        for hasher in self.hashers.iter() {
            let (word, mask) = locate(hasher.index(element));
            self.words[word] |= mask;
        }
    }

    /// Returns the bit at `index`, or `None` past the end of the filter.
    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.num_bits {
            return None;
        }
        let (word, mask) = locate(index);
        Some(self.words[word] & mask != 0)
    }

    /// Number of hash functions probed per element.
    pub fn num_hashes(&self) -> usize {
        self.hashers.len()
    }

    /// The filter's hashers, in probe order.
    pub fn hashers(&self) -> &[IndexHasher] {
        &self.hashers
    }

    /// The seed of each hasher, in probe order.
    pub fn seeds(&self) -> impl ExactSizeIterator<Item = u64> + '_ {
        self.hashers.iter().map(IndexHasher::seed)
    }

    /// Number of bits currently set.
    pub fn bits_set(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if no bit is set, i.e. nothing was ever inserted.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Fraction of bits set.
    pub fn load_factor(&self) -> f64 {
        self.bits_set() as f64 / self.num_bits as f64
    }

    /// Estimates the current false positive probability as `load_factor ^ num_hashes`.
    ///
    /// The estimate assumes the hashers pick bits independently. That does not hold when
    /// `len()` is a power of two, and the real rate can then be an order of magnitude higher;
    /// see [choosing `num_bits`](BloomFilter#choosing-num_bits).
    pub fn estimated_fpp(&self) -> f64 {
        libm::pow(self.load_factor(), self.num_hashes() as f64)
    }

    pub(crate) fn words(&self) -> &[u64] {
        &self.words
    }

    pub(crate) fn from_parts(
        num_bits: usize,
        hashers: Box<[IndexHasher]>,
        words: Box<[u64]>,
    ) -> Self {
        Self {
            num_bits,
            hashers,
            words,
        }
    }
}

impl Filter for BloomFilter {
    /// Returns `true` if `key` may have been inserted, `false` if it definitely was not.
    fn contains(&self, key: &[u8]) -> bool {
        self.hashers.iter().all(|hasher| {
            let (word, mask) = locate(hasher.index(key));
            self.words[word] & mask != 0
        })
    }

    /// Returns the number of bits in the filter.
    fn len(&self) -> usize {
        self.num_bits
    }
}

#[cfg(test)]
mod test {
    use crate::{fnv1a::fnv1a32, BloomFilter, Error, Filter, IndexHasher, SplitMix64};

    use alloc::collections::BTreeMap;
    use alloc::vec::Vec;
    use rand::Rng;

    fn random_keys(n: usize) -> Vec<[u8; 16]> {
        let mut rng = rand::thread_rng();
        (0..n).map(|_| rng.gen()).collect()
    }

    /// A filter with freshly randomized seeds.
    fn seeded_filter(num_bits: usize, num_hashes: usize) -> BloomFilter {
        let mut source = SplitMix64::new(rand::thread_rng().gen());
        BloomFilter::with_seed_source(num_bits, num_hashes, &mut source).unwrap()
    }

    #[test]
    fn test_fruit_basket() {
        let mut filter = seeded_filter(1000, 3);
        filter.insert(b"apple");
        filter.insert(b"banana");
        filter.insert(b"cherry");

        assert!(filter.contains(b"apple"));
        assert!(filter.contains(b"banana"));
        assert!(filter.contains(b"cherry"));
        // "grape" and "mango" may go either way.
        let _ = filter.contains(b"grape");
        let _ = filter.contains(b"mango");
    }

    #[test]
    fn test_construction_guard() {
        let mut source = SplitMix64::new(1);
        assert_eq!(
            BloomFilter::with_seed_source(0, 3, &mut source),
            Err(Error::ZeroBits)
        );
        assert_eq!(
            BloomFilter::with_seed_source(1000, 0, &mut source),
            Err(Error::ZeroHashes)
        );
        assert_eq!(
            BloomFilter::with_seed_source(0, 0, &mut source),
            Err(Error::ZeroBits)
        );
        assert_eq!(BloomFilter::from_seeds(0, &[1]), Err(Error::ZeroBits));
        assert_eq!(BloomFilter::from_seeds(8, &[]), Err(Error::ZeroHashes));
    }

    #[cfg(feature = "uniform-random")]
    #[test]
    fn test_new_draws_random_seeds() {
        assert_eq!(BloomFilter::new(0, 3), Err(Error::ZeroBits));
        assert_eq!(BloomFilter::new(1000, 0), Err(Error::ZeroHashes));

        let mut filter = BloomFilter::new(1000, 3).unwrap();
        assert_eq!(filter.num_hashes(), 3);
        filter.insert(b"apple");
        assert!(filter.contains(b"apple"));
        assert_ne!(filter, BloomFilter::new(1000, 3).unwrap());
    }

    #[test]
    fn test_starts_empty() {
        let filter = BloomFilter::with_seed_source(100, 5, &mut SplitMix64::new(3)).unwrap();
        assert_eq!(filter.len(), 100);
        assert_eq!(filter.num_hashes(), 5);
        assert!(filter.is_empty());
        assert_eq!(filter.bits_set(), 0);
        assert!((0..100).all(|i| filter.bit(i) == Some(false)));
        assert_eq!(filter.bit(100), None);
        assert!(!filter.contains(b""));
        assert_eq!(filter.estimated_fpp(), 0.0);
    }

    #[test]
    fn test_distinct_seeds() {
        let filter = seeded_filter(4099, 16);
        let mut seeds: Vec<u64> = filter.seeds().collect();
        seeds.sort_unstable();
        seeds.dedup();
        assert_eq!(seeds.len(), 16);
        assert!(filter.hashers().iter().all(|h| h.modulus() == 4099));
    }

    #[test]
    fn test_sets_exactly_the_hashed_bits() {
        let seeds = [7, 1_000_003, u64::MAX];
        let mut filter = BloomFilter::from_seeds(1000, &seeds).unwrap();
        filter.insert(b"apple");

        let expected: Vec<usize> = seeds
            .iter()
            .map(|&s| IndexHasher::new(s, 1000).unwrap().index(b"apple"))
            .collect();
        for i in 0..1000 {
            assert_eq!(filter.bit(i), Some(expected.contains(&i)), "bit {}", i);
        }
        assert!(filter.bits_set() <= seeds.len());
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut filter = BloomFilter::with_seed_source(512, 4, &mut SplitMix64::new(5)).unwrap();
        filter.insert(b"seen");
        let once = filter.clone();
        filter.insert(b"seen");
        assert_eq!(filter, once);
    }

    #[test]
    fn test_empty_element() {
        let mut filter = seeded_filter(64, 2);
        filter.insert(b"");
        assert!(filter.contains(b""));
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_single_bit_filter() {
        let mut filter = seeded_filter(1, 3);
        assert!(!filter.contains(b"x"));
        filter.insert(b"x");
        // Every element maps to the lone bit.
        assert!(filter.contains(b"x"));
        assert!(filter.contains(b"y"));
        assert_eq!(filter.bits_set(), 1);
        assert_eq!(filter.load_factor(), 1.0);
        assert_eq!(filter.estimated_fpp(), 1.0);
    }

    #[test]
    fn test_bits_only_grow() {
        let mut filter = seeded_filter(2048, 3);
        let mut previous = filter.clone();
        for key in random_keys(500) {
            filter.insert(&key);
            for i in 0..filter.len() {
                if previous.bit(i) == Some(true) {
                    assert_eq!(filter.bit(i), Some(true));
                }
            }
            assert!(filter.bits_set() >= previous.bits_set());
            previous = filter.clone();
        }
    }

    #[test]
    fn test_queries_do_not_mutate() {
        let mut filter = seeded_filter(1000, 3);
        filter.insert(b"apple");
        let before = filter.clone();
        let first = filter.contains(b"grape");
        for _ in 0..10 {
            assert_eq!(filter.contains(b"grape"), first);
            assert!(filter.contains(b"apple"));
        }
        assert_eq!(filter, before);
    }

    #[test]
    fn test_initialization() {
        const SAMPLE_SIZE: usize = 100_000;
        const NUM_BITS: usize = 1_000_003;
        let keys = random_keys(SAMPLE_SIZE);
        let mut filter = seeded_filter(NUM_BITS, 7);
        for key in keys.iter() {
            filter.insert(key);
        }

        // no false negatives
        for key in keys.iter() {
            assert!(filter.contains(key));
        }
    }

    #[test]
    fn test_false_positives() {
        const SAMPLE_SIZE: usize = 100_000;
        const NUM_BITS: usize = 1_000_003;
        let mut filter = seeded_filter(NUM_BITS, 7);
        for key in random_keys(SAMPLE_SIZE) {
            filter.insert(&key);
        }

        let false_positives = random_keys(SAMPLE_SIZE)
            .iter()
            .filter(|key| filter.contains(*key))
            .count();
        let fp_rate: f64 = (false_positives * 100) as f64 / SAMPLE_SIZE as f64;
        // Theory gives ~0.8% at 10 bits per key and 7 hashers over a prime size.
        assert!(fp_rate < 3.0, "False positive rate is {}", fp_rate);
        assert!(filter.estimated_fpp() < 0.03);
    }

    #[test]
    fn test_power_of_two_size_collides_across_hashers() {
        // Two keys whose unseeded hashes agree on the low 16 bits.
        let mut seen = BTreeMap::new();
        let (a, b) = (0u32..)
            .map(u32::to_le_bytes)
            .find_map(|key| seen.insert(fnv1a32(&key) & 0xffff, key).map(|twin| (twin, key)))
            .unwrap();

        let mut filter = seeded_filter(1 << 16, 7);
        filter.insert(&a);
        // Every hasher sends `b` to the bits `a` already set.
        assert!(filter.contains(&b));
    }
}
