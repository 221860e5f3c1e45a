//! Digit cache: a precomputed codec table covering one digit window.
//!
//! Filled by dynamic programming rather than by histogramming every
//! entry from scratch: `dig[x] = dig[x / BASE] + bucket(x % BASE)`, so
//! each of the `BASE.pow(width)` entries costs one division, one
//! modulo and one table lookup instead of `width` of each.

use crate::codec::{bucket, BASE};
use crate::partition::Partition;
use crate::types::Digits;

pub struct DigitCache {
    width: u32,
    modulus: u64,
    table: Vec<Digits>,
}

impl DigitCache {
    pub fn build(partition: Partition) -> Self {
        let size = partition.cache_size as usize;
        let mut table = vec![0 as Digits; size];
        for x in 1..size as u64 {
            let d = (x % BASE) as u32;
            let bump = if d == 0 { 0 } else { bucket(d) };
            table[x as usize] = table[(x / BASE) as usize] + bump;
        }
        DigitCache {
            width: partition.width,
            modulus: partition.cache_size,
            table,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Codec of one window's worth of digits (`window_value < cache_size`).
    #[inline]
    fn window_codec(&self, window_value: u64) -> Digits {
        self.table[window_value as usize]
    }

    /// Codec of the full number `n`, by summing the codec of each of
    /// its windows (least significant first).
    pub fn encode(&self, mut n: u64) -> Digits {
        let mut total: Digits = 0;
        while n > 0 {
            total += self.window_codec(n % self.modulus);
            n /= self.modulus;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::partition;

    #[test]
    fn matches_direct_encode() {
        let cache = DigitCache::build(partition::plan(6, 3));
        for n in [0u64, 7, 60, 21, 1260, 999999, 123456] {
            assert_eq!(cache.encode(n), codec::encode(n), "mismatch for {n}");
        }
    }

    #[test]
    fn window_narrower_than_number_still_sums_correctly() {
        let cache = DigitCache::build(partition::plan(2, 2));
        assert_eq!(cache.encode(123456), codec::encode(123456));
    }
}
