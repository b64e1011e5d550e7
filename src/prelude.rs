//! Common methods for bloom filters.

use crate::{Error, IndexHasher, SeedSource};
use alloc::{boxed::Box, vec::Vec};

/// Bits per storage word.
pub const WORD_BITS: usize = u64::BITS as usize;

/// How many times a seed source may repeat an already-drawn seed before construction gives up.
pub const MAX_SEED_DRAWS: usize = 1_000;

/// Number of words backing `num_bits` bits.
#[inline]
pub const fn num_words(num_bits: usize) -> usize {
    num_bits.div_ceil(WORD_BITS)
}

/// Splits a bit index into its word offset and the mask selecting it within that word.
#[inline]
pub const fn locate(index: usize) -> (usize, u64) {
    (index / WORD_BITS, 1 << (index % WORD_BITS))
}

#[inline]
fn check_num_bits(num_bits: usize) -> Result<(), Error> {
    if num_bits == 0 {
        return Err(Error::ZeroBits);
    }
    Ok(())
}

/// Builds `num_hashes` hashers over `num_bits` with pairwise distinct seeds drawn from `source`.
pub fn draw_hashers<S>(
    num_bits: usize,
    num_hashes: usize,
    source: &mut S,
) -> Result<Box<[IndexHasher]>, Error>
where
    S: SeedSource + ?Sized,
{
    check_num_bits(num_bits)?;
    if num_hashes == 0 {
        return Err(Error::ZeroHashes);
    }

    let mut hashers: Vec<IndexHasher> = Vec::with_capacity(num_hashes);
    while hashers.len() < num_hashes {
        let mut seed = source.next_seed();
        let mut draws = 1;
        // Re-draw on collision; a source that keeps repeating itself is rejected.
        while hashers.iter().any(|h| h.seed() == seed) {
            if draws == MAX_SEED_DRAWS {
                return Err(Error::DuplicateSeed(seed));
            }
            seed = source.next_seed();
            draws += 1;
        }
        hashers.push(IndexHasher::new(seed, num_bits)?);
    }
    Ok(hashers.into_boxed_slice())
}

/// Builds one hasher per seed, in order, over `num_bits`.
pub fn hashers_from_seeds(num_bits: usize, seeds: &[u64]) -> Result<Box<[IndexHasher]>, Error> {
    check_num_bits(num_bits)?;
    if seeds.is_empty() {
        return Err(Error::ZeroHashes);
    }
    for (i, seed) in seeds.iter().enumerate() {
        if seeds[..i].contains(seed) {
            return Err(Error::DuplicateSeed(*seed));
        }
    }
    seeds
        .iter()
        .map(|&seed| IndexHasher::new(seed, num_bits))
        .collect()
}
