//! Errors raised while constructing filters.

/// Reasons a filter cannot be constructed.
///
/// Inserting and querying never fail; every failure mode is caught up front so a filter that
/// exists always has at least one bit and at least one hash function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The bit array was requested with zero bits.
    #[error("bloom filter needs at least one bit")]
    ZeroBits,
    /// No hash functions were requested.
    #[error("bloom filter needs at least one hash function")]
    ZeroHashes,
    /// Two hash functions were given the same seed, so they would always probe the same bit.
    #[error("hash seed {0:#018x} was given more than once")]
    DuplicateSeed(u64),
}
