//! Interval normalization and length-class bookkeeping (SPEC_FULL.md §3).

use fehler::{throw, throws};

use crate::codec::BASE;
use crate::error::IntervalError;
use crate::types::{Length, Vamp};

/// Number of base-`BASE` digits in `x` (`length(0) == 1`, matching the
/// convention that `0` occupies the first length class).
pub fn length(x: Vamp) -> Length {
    let mut n = x;
    let mut len = 1;
    while n >= BASE {
        n /= BASE;
        len += 1;
    }
    len
}

/// `BASE.pow(exponent)`.
pub fn pow(exponent: Length) -> Vamp {
    BASE.pow(exponent)
}

/// Raises `min` up to the start of the next even-length class if its
/// own length is odd (no vampire has an odd digit count). Mirrors
/// `get_min`: if there's no room for a larger even length below `max`,
/// collapses `min` onto `max` instead, which callers then observe as
/// an empty interval.
fn normalize_min(min: Vamp, max: Vamp) -> Vamp {
    let min_length = length(min);
    if min_length % 2 == 1 {
        if min_length < length(max) {
            pow(min_length)
        } else {
            max
        }
    } else {
        min
    }
}

/// Lowers `max` down to the end of the previous even-length class if
/// its own length is odd. Mirrors `get_max`.
fn normalize_max(min: Vamp, max: Vamp) -> Vamp {
    let max_length = length(max);
    if max_length % 2 == 1 {
        if max_length > length(min) {
            pow(max_length - 1) - 1
        } else {
            min
        }
    } else {
        max
    }
}

/// A validated, length-normalized scan interval with resume state.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    pub min: Vamp,
    pub max: Vamp,
    /// Inclusive upper end of the most recently finalized sub-interval.
    /// `complete < min` means nothing has been scanned yet.
    pub complete: i128,
}

impl Interval {
    #[throws(IntervalError)]
    pub fn new(min: Vamp, max: Vamp) -> Self {
        if min > max {
            throw!(IntervalError::Inverted { min, max });
        }
        let normalized_min = normalize_min(min, max);
        let normalized_max = normalize_max(min, max);
        let (min, max) = (normalized_min, normalized_max);

        // normalize_max can push max below min when the whole requested
        // range lies inside a single odd length class: the interval is
        // then empty, which callers treat the same as "nothing to scan".
        let complete = if max < min {
            max as i128
        } else {
            min as i128 - 1
        };

        Interval { min, max, complete }
    }

    pub fn is_empty(&self) -> bool {
        self.max < self.min
    }

    /// Validates and installs a `complete` value loaded from a checkpoint.
    #[throws(IntervalError)]
    pub fn set_complete(&mut self, complete: Vamp) {
        if complete < self.min.saturating_sub(1) || complete > self.max {
            throw!(IntervalError::Inverted {
                min: self.min,
                max: self.max,
            });
        }
        self.complete = complete as i128;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_basic() {
        assert_eq!(length(0), 1);
        assert_eq!(length(9), 1);
        assert_eq!(length(10), 2);
        assert_eq!(length(99), 2);
        assert_eq!(length(100), 3);
    }

    #[test]
    fn both_even_length_interval_is_unchanged() {
        // [16, 19]: length(16) == length(19) == 2, already an even length class.
        let iv = Interval::new(16, 19).unwrap();
        assert_eq!((iv.min, iv.max), (16, 19));
    }

    #[test]
    fn odd_upper_bound_drops_to_previous_even_class() {
        let iv = Interval::new(16, 200).unwrap();
        assert_eq!((iv.min, iv.max), (16, 99));
    }

    #[test]
    fn odd_lower_bound_rises_to_next_even_class() {
        let iv = Interval::new(5, 300).unwrap();
        assert_eq!((iv.min, iv.max), (10, 99));
    }

    #[test]
    fn rejects_inverted_bounds() {
        assert!(Interval::new(100, 10).is_err());
    }
}
