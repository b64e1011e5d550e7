//! This library implements Bloom filters -- fixed-size bit arrays used to test whether an element
//! is possibly a member of a set. Probabilistic filters like Bloom filters are useful for
//! quickly ruling out the existence of an entity to avoid using an expensive resource.
//! For example, they can be used to [reduce disk writes] in a cache or [identify malicious URLs].
//!
//! A filter of `m` bits owns `k` hash functions, each the 32-bit [FNV-1a] hash of the element
//! followed by a per-function seed, reduced modulo `m`. Inserting an element sets the `k` bits it
//! hashes to; querying an element checks them. Bits are never cleared, so filters have no false
//! negatives, and their false positive rate grows with the share of bits set.
//!
//! Seeds are drawn once per filter from a [`SeedSource`]. `BloomFilter::new`, behind the default
//! `uniform-random` feature, uses the thread-local random generator; pass a [`SplitMix64`] or
//! explicit seeds for reproducible filters. Prefer odd, ideally prime, filter sizes: see
//! [choosing `num_bits`](BloomFilter#choosing-num_bits). [`AtomicBloomFilter`] accepts inserts
//! through a shared reference for use across threads. This library is `no_std` and
//! [`needs_allocator`].
//!
//! ```
//! use seedbloom::{BloomFilter, Filter, SplitMix64};
//!
//! let mut filter = BloomFilter::with_seed_source(1009, 3, &mut SplitMix64::new(1)).unwrap();
//! filter.insert(b"apple");
//! assert!(filter.contains(b"apple"));
//! ```
//!
//! [reduce disk writes]: https://en.wikipedia.org/wiki/Bloom_filter#Cache_filtering
//! [identify malicious URLs]: https://en.wikipedia.org/wiki/Bloom_filter#Examples
//! [FNV-1a]: http://www.isthe.com/chongo/tech/comp/fnv/index.html
//! [`needs_allocator`]: https://doc.rust-lang.org/1.9.0/book/custom-allocators.html

#![no_std]
// Configuration attributes
#![warn(missing_docs)]
#![deny(clippy::all)]
#![allow(clippy::len_without_is_empty)]

extern crate alloc;

mod atomic;
mod bloom;
mod error;
pub mod fnv1a;
mod hasher;
mod prelude;
mod seed;
mod splitmix64;

pub use atomic::AtomicBloomFilter;
pub use bloom::BloomFilter;
pub use error::Error;
pub use hasher::IndexHasher;
#[cfg(feature = "uniform-random")]
pub use seed::RngSeeds;
pub use seed::SeedSource;
pub use splitmix64::SplitMix64;

/// Methods common to Bloom filters.
pub trait Filter {
    /// Returns `true` if the filter probably contains the specified key.
    ///
    /// There can never be a false negative, but there is a small possibility of false positives.
    fn contains(&self, key: &[u8]) -> bool;

    /// Returns the number of bits in the filter.
    fn len(&self) -> usize;
}
