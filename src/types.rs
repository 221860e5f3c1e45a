//! Fixed-width type aliases shared across the engine.
//!
//! `Vamp` is the product/number type; factors (fangs) are represented
//! as `Vamp` too rather than a narrower type, since the kernel derives
//! them via ordinary `Vamp` arithmetic (`div_ceil`, multiplication) and
//! a separate type would only add conversions at every call site.

/// A candidate number being tested for vampirehood, a fang-pair factor
/// of one, or a product of two fangs — all the same width.
pub type Vamp = u64;

/// A digit-length (number of digits in some radix).
pub type Length = u32;

/// The packed digit-multiset codec word. See [`crate::codec`].
pub type Digits = u64;
