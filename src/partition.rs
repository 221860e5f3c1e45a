//! Partitioner: decides the digit-window width used by the [`crate::cache::DigitCache`].
//!
//! Splitting a number into fixed-width windows lets the cache stay a
//! fixed, small size (`BASE.pow(width)` entries) no matter how long the
//! numbers being scanned get; a number is encoded by summing the cached
//! codec of each of its windows. Several partitioning strategies exist
//! upstream (reserving asymmetric widths for the first/last window,
//! splitting left-to-right vs. right-to-left); this crate implements
//! only the semi-constant, semi-global strategy (method 0), which is
//! the default and the only one exercised by any scenario this engine
//! is required to handle.
//!
//! This planner returns a single window width shared by the
//! multiplicand and the product, rather than separate `M`/`P` part
//! counts with per-partition carry propagation; see `DESIGN.md` for why
//! that narrower scope was chosen over the fuller multi-partition
//! scheme.

use crate::codec::BASE;

/// A window width paired with the cache size it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// Digits per window. All windows but possibly the most significant
    /// one are exactly this wide.
    pub width: u32,
    /// `BASE.pow(width)`, the number of entries the digit cache needs.
    pub cache_size: u64,
}

/// Upper bound on cache entries, chosen so the table comfortably fits
/// in last-level cache on common hardware. `BASE.pow(7) == 10_000_000`
/// entries of one `u64` each is 80 MiB, which is on the generous side
/// of an L3 budget but still far cheaper than caching full-length
/// numbers directly.
pub const DEFAULT_CACHE_BUDGET: u32 = 7;

/// Plans a window width for numbers up to `max_length` digits long,
/// given a maximum window width `cache_budget`. Never exceeds
/// `max_length` itself, since a window wider than the longest number in
/// play would waste cache entries that are never looked up.
pub fn plan(max_length: u32, cache_budget: u32) -> Partition {
    let width = max_length.min(cache_budget).max(1);
    Partition {
        width,
        cache_size: BASE.pow(width),
    }
}
