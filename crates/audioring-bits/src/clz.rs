//! Leading and trailing zero counts with a well-defined result at zero.

use crate::raw;

/// Name of the leading-zero-count backend selected for this build.
///
/// `"x86-bsr"` for the inline-assembly path, `"intrinsic"` for the compiler
/// builtin.
pub const CLZ_BACKEND: &str = raw::NAME;

/// Count the consecutive zero bits above the highest set bit of `value`.
///
/// Returns a value in `0..=31` for nonzero input and exactly `32` for zero.
/// The zero case is handled here rather than in the backend, because the
/// native instruction on some targets leaves it undefined.
///
/// ```
/// use audioring_bits::count_leading_zeroes;
///
/// assert_eq!(count_leading_zeroes(1), 31);
/// assert_eq!(count_leading_zeroes(0xFFFF_FFFF), 0);
/// assert_eq!(count_leading_zeroes(0), 32);
/// ```
#[inline]
pub fn count_leading_zeroes(value: u32) -> u32 {
    if value == 0 {
        return 32;
    }
    raw::clz32_nonzero(value)
}

/// 64-bit leading-zero count built from two 32-bit counts.
///
/// Returns `64` for zero.
#[inline]
pub fn count_leading_zeroes_u64(value: u64) -> u32 {
    let high = (value >> 32) as u32;
    if high != 0 {
        count_leading_zeroes(high)
    } else {
        32 + count_leading_zeroes(value as u32)
    }
}

/// Count the consecutive zero bits below the lowest set bit of `value`.
///
/// Returns `32` for zero.
#[inline]
pub fn count_trailing_zeroes(value: u32) -> u32 {
    if value == 0 {
        return 32;
    }
    // Isolate the lowest set bit; its leading-zero count mirrors its index.
    let lowest = value & value.wrapping_neg();
    31 - raw::clz32_nonzero(lowest)
}
