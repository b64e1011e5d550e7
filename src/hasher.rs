//! Seeded hashers mapping byte strings to bit positions.

use crate::{fnv1a, Error};

/// One of a filter's hash functions: FNV-1a over the element followed by the seed, reduced
/// modulo the bit-array size.
///
/// An `IndexHasher` is a plain value. It holds no state beyond its seed and modulus, so the same
/// input always lands on the same index.
///
/// ```
/// use seedbloom::IndexHasher;
///
/// let hasher = IndexHasher::new(0xdead_beef, 1000).unwrap();
/// let index = hasher.index(b"apple");
/// assert!(index < 1000);
/// assert_eq!(index, hasher.index(b"apple"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexHasher {
    seed: u64,
    modulus: usize,
}

impl IndexHasher {
    /// Creates a hasher reducing into `[0, modulus)`.
    ///
    /// Fails with [`Error::ZeroBits`] if `modulus` is zero.
    ///
    /// ```
    /// use seedbloom::{Error, IndexHasher};
    ///
    /// assert_eq!(IndexHasher::new(1, 0), Err(Error::ZeroBits));
    /// ```
    #[inline]
    pub const fn new(seed: u64, modulus: usize) -> Result<Self, Error> {
        if modulus == 0 {
            return Err(Error::ZeroBits);
        }
        Ok(Self { seed, modulus })
    }

    /// The seed mixed into every hash.
    #[inline]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The exclusive upper bound of [`index`](Self::index).
    #[inline]
    pub const fn modulus(&self) -> usize {
        self.modulus
    }

    /// Returns the FNV-1a fingerprint of `data` followed by the little-endian seed bytes.
    #[inline]
    pub const fn fingerprint(&self, data: &[u8]) -> u32 {
        let hash = fnv1a::update(fnv1a::OFFSET_BASIS, data);
        fnv1a::update(hash, &self.seed.to_le_bytes())
    }

    /// Maps `data` to a bit position in `[0, modulus)`.
    ///
    /// Each multiply step of FNV-1a carries only upward, so the low `n` bits of the fingerprint
    /// depend only on the low `n` bits of the hash of `data`. With a power-of-two modulus every
    /// seed therefore picks its index from the same few bits, and elements colliding on those
    /// bits collide under every seed. Odd moduli, ideally prime, fold in the high bits as well.
    #[inline]
    pub const fn index(&self, data: &[u8]) -> usize {
        (self.fingerprint(data) as u64 % self.modulus as u64) as usize
    }
}
