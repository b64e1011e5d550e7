//! 32-bit [`FNV-1a`] hashing.
//!
//! [`FNV-1a`]: http://www.isthe.com/chongo/tech/comp/fnv/index.html

/// Initial accumulator value for 32-bit FNV.
pub const OFFSET_BASIS: u32 = 0x811c_9dc5;

/// 32-bit FNV prime.
pub const PRIME: u32 = 0x0100_0193;

/// Folds `bytes` into a running FNV-1a accumulator.
///
/// Feeding a message in pieces yields the same hash as feeding it whole, so
/// `update(update(OFFSET_BASIS, a), b)` hashes the concatenation of `a` and `b`.
#[inline]
pub const fn update(mut hash: u32, bytes: &[u8]) -> u32 {
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(PRIME);
        i += 1;
    }
    hash
}

/// Hashes `bytes` from the offset basis.
#[inline]
pub const fn fnv1a32(bytes: &[u8]) -> u32 {
    update(OFFSET_BASIS, bytes)
}
