//! Integer base-two logarithms over `u32`.

use crate::clz::count_leading_zeroes;

/// Smallest `n` such that `2^n >= x`.
///
/// Computed as `32 - count_leading_zeroes(x - 1)`, so `log2_ceil(1) == 0`
/// falls out of the zero case of the leading-zero count.
///
/// `x` must be at least 1. Zero is not checked: `x - 1` wraps to
/// `u32::MAX` and the result is `32`, which callers must not rely on.
///
/// ```
/// use audioring_bits::log2_ceil;
///
/// assert_eq!(log2_ceil(1), 0);
/// assert_eq!(log2_ceil(5), 3);
/// assert_eq!(log2_ceil(8), 3);
/// ```
#[inline]
pub fn log2_ceil(x: u32) -> u32 {
    32 - count_leading_zeroes(x.wrapping_sub(1))
}

/// Largest `n` such that `2^n <= x`.
///
/// `x` must be at least 1. For zero the subtraction wraps and the result is
/// `u32::MAX`.
#[inline]
pub fn log2_floor(x: u32) -> u32 {
    31u32.wrapping_sub(count_leading_zeroes(x))
}
