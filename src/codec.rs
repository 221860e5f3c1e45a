//! Digit-multiset codec.
//!
//! A number's nonzero-digit histogram is packed into a single machine
//! word, one fixed-width bucket per nonzero digit value. Concatenating
//! digits (i.e. forming a bigger number out of two smaller ones, or
//! multiplying two fang-length numbers to get a vamp-length one) turns
//! into plain integer addition of the packed words, as long as no
//! bucket overflows its width.
//!
//! Digit `0` has no bucket: a number ending in `0` would make a product
//! have more digits than its factors combined, which the kernel already
//! excludes (`notrailingzero`), so comparing zero-counts is useless.

use crate::types::Digits;

/// Radix the engine operates in. Fixed at compile time: every constant
/// derived below (and the kernel's congruence filters) is specialized
/// for base 10.
pub const BASE: u64 = 10;

/// Number of nonzero digit values, i.e. buckets in the packed codec.
pub const BUCKETS: u32 = (BASE - 1) as u32;

const WORD_BITS: u32 = 64;

/// Bits allotted to each bucket: `floor(WORD_BITS / BUCKETS)`.
pub const BUCKET_BITS: u32 = WORD_BITS / BUCKETS;

/// `2 ^ BUCKET_BITS`, the per-bucket overflow boundary.
pub const DIGBASE: u64 = 1 << BUCKET_BITS;

/// Encodes the nonzero-digit histogram of `n` (in base [`BASE`]).
pub fn encode(mut n: u64) -> Digits {
    let mut codec: Digits = 0;
    while n > 0 {
        let d = n % BASE;
        n /= BASE;
        if d != 0 {
            codec += bucket(d as u32);
        }
    }
    codec
}

/// The packed value of a single occurrence of digit `d` (`1..=9`).
#[inline]
pub fn bucket(d: u32) -> Digits {
    debug_assert!((1..BASE as u32).contains(&d));
    1u64 << ((d - 1) * BUCKET_BITS)
}

/// Combines two codecs under digit concatenation. Callers are
/// responsible for ensuring this cannot overflow a bucket; the
/// partitioner's window width is chosen so it never does for any
/// value the kernel produces.
#[inline]
pub fn combine(a: Digits, b: Digits) -> Digits {
    a + b
}
