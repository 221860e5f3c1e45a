//! Fang search kernel.
//!
//! For one closed sub-interval `[lmin, lmax]` within a single length
//! class, enumerates `(multiplier, multiplicand)` candidates and
//! decides vampirehood by comparing digit-multiset codecs. See
//! `SPEC_FULL.md` §4.4 for the full derivation; this module follows its
//! seven steps in order.

use crate::cache::DigitCache;
use crate::codec::BASE;
use crate::types::Vamp;

/// `disqualify_mult`: residue classes that can never start a valid fang
/// pair. Specific to base 10: a multiplier congruent to 1 mod 3 cannot
/// satisfy the digit-sum congruence below for any multiplicand.
#[inline]
fn disqualify_mult(m: Vamp) -> bool {
    m % (BASE - 1) == 1
}

/// `x*y ≡ x+y (mod BASE-1)` is necessary for `x*y`'s digit sum to equal
/// the combined digit sum of `x` and `y`.
#[inline]
fn congruence_ok(x: Vamp, y: Vamp) -> bool {
    (x + y) % (BASE - 1) == (x * y) % (BASE - 1)
}

#[inline]
fn has_nonzero_last_digit(x: Vamp) -> bool {
    x % BASE != 0
}

/// Largest `r` with `r*r <= n`.
fn isqrt_floor(n: Vamp) -> Vamp {
    if n == 0 {
        return 0;
    }
    let mut x = (n as f64).sqrt() as Vamp;
    while x > 0 && x * x > n {
        x -= 1;
    }
    while (x + 1) * (x + 1) <= n {
        x += 1;
    }
    x
}

/// Smallest `r` with `r*r >= n`.
fn isqrt_ceil(n: Vamp) -> Vamp {
    let f = isqrt_floor(n);
    if f * f == n {
        f
    } else {
        f + 1
    }
}

fn div_ceil(x: Vamp, y: Vamp) -> Vamp {
    x / y + if x % y != 0 { 1 } else { 0 }
}

/// Scans `[min, max]` (one sub-interval within a single length class,
/// whose factors are bounded above by `fmax`) and appends every
/// discovered vampire product to `out`, once per fang pair found
/// (duplicates are expected and collapsed later by
/// [`crate::task::summarize`]).
pub fn search(min: Vamp, max: Vamp, fmax: Vamp, cache: &DigitCache, out: &mut Vec<Vamp>) {
    if min > max || fmax == 0 {
        return;
    }

    let min_sqrt = isqrt_ceil(min);
    let max_sqrt = isqrt_floor(max);

    let mut multiplier = fmax;
    loop {
        if multiplier < min_sqrt {
            break;
        }

        if disqualify_mult(multiplier) {
            if multiplier == 0 {
                break;
            }
            multiplier -= 1;
            continue;
        }

        let mut multiplicand = div_ceil(min, multiplier);
        while multiplicand <= multiplier && !congruence_ok(multiplier, multiplicand) {
            multiplicand += 1;
        }

        let multiplicand_max = if multiplier > max_sqrt {
            multiplier.min(max / multiplier)
        } else {
            multiplier
        };

        // `multiplier`'s codec and its per-step product increment are
        // loop-invariant across the multiplicand stride: compute them
        // once instead of re-deriving on every inner iteration.
        let multiplier_codec = cache.encode(multiplier);
        let product_step = multiplier * (BASE - 1);
        let mut product = multiplier * multiplicand;

        while multiplicand <= multiplicand_max {
            if product >= min
                && product <= max
                && (has_nonzero_last_digit(multiplier) || has_nonzero_last_digit(multiplicand))
            {
                let lhs = multiplier_codec + cache.encode(multiplicand);
                let rhs = cache.encode(product);
                if lhs == rhs {
                    out.push(product);
                }
            }
            multiplicand += BASE - 1;
            product += product_step;
        }

        if multiplier == 0 {
            break;
        }
        multiplier -= 1;
    }
}
