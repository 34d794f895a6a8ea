//! Power-of-two rounding.
//!
//! [`next_power_of_two`] keeps the `u32` result type a ring buffer indexes
//! with. Inputs above [`MAX_POWER_OF_TWO`] have no `u32` answer; the
//! function returns `0` for them, [`checked_next_power_of_two`] returns
//! `None`, and [`next_power_of_two_u64`] widens the result instead.

use crate::log2::log2_ceil;

/// Largest power of two representable in a `u32` (`2^31`).
pub const MAX_POWER_OF_TWO: u32 = 1 << 31;

/// Smallest power of two greater than or equal to `x`.
///
/// Powers of two are returned unchanged. `x` must be in
/// `1..=MAX_POWER_OF_TWO`; for larger inputs (and for zero, which wraps
/// through [`log2_ceil`]) the shift overflows and the result is `0`.
///
/// ```
/// use audioring_bits::next_power_of_two;
///
/// assert_eq!(next_power_of_two(5), 8);
/// assert_eq!(next_power_of_two(8), 8);
/// assert_eq!(next_power_of_two(1), 1);
/// ```
#[inline]
pub fn next_power_of_two(x: u32) -> u32 {
    1u32.checked_shl(log2_ceil(x)).unwrap_or(0)
}

/// Like [`next_power_of_two`], but `None` outside `1..=MAX_POWER_OF_TWO`.
#[inline]
pub fn checked_next_power_of_two(x: u32) -> Option<u32> {
    if x == 0 {
        return None;
    }
    1u32.checked_shl(log2_ceil(x))
}

/// Smallest power of two `>= x`, widened so every `x >= 1` has an answer.
///
/// Inputs above `2^31` yield `2^32`. Zero yields `2^32` as well, since
/// [`log2_ceil`] wraps there.
#[inline]
pub fn next_power_of_two_u64(x: u32) -> u64 {
    1u64 << log2_ceil(x)
}

/// Whether `x` has exactly one bit set.
#[inline]
pub fn is_power_of_two(x: u32) -> bool {
    x != 0 && x & (x - 1) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn concrete_cases() {
        assert_eq!(next_power_of_two(1), 1);
        assert_eq!(next_power_of_two(2), 2);
        assert_eq!(next_power_of_two(3), 4);
        assert_eq!(next_power_of_two(5), 8);
        assert_eq!(next_power_of_two(8), 8);
        assert_eq!(next_power_of_two(1000), 1024);
        assert_eq!(next_power_of_two(MAX_POWER_OF_TWO), MAX_POWER_OF_TWO);
    }

    #[test]
    fn overflow_yields_zero() {
        assert_eq!(next_power_of_two(MAX_POWER_OF_TWO + 1), 0);
        assert_eq!(next_power_of_two(u32::MAX), 0);
        assert_eq!(next_power_of_two(0), 0);
    }

    #[test]
    fn checked_rejects_out_of_domain() {
        assert_eq!(checked_next_power_of_two(0), None);
        assert_eq!(checked_next_power_of_two(MAX_POWER_OF_TWO + 1), None);
        assert_eq!(checked_next_power_of_two(100), Some(128));
        assert_eq!(checked_next_power_of_two(MAX_POWER_OF_TWO), Some(MAX_POWER_OF_TWO));
    }

    #[test]
    fn widened_covers_top_range() {
        assert_eq!(next_power_of_two_u64(5), 8);
        assert_eq!(next_power_of_two_u64(MAX_POWER_OF_TWO), 1 << 31);
        assert_eq!(next_power_of_two_u64(MAX_POWER_OF_TWO + 1), 1 << 32);
        assert_eq!(next_power_of_two_u64(u32::MAX), 1 << 32);
    }

    #[test]
    fn power_of_two_predicate() {
        assert!(!is_power_of_two(0));
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(MAX_POWER_OF_TWO));
        assert!(!is_power_of_two(6));
        assert!(!is_power_of_two(u32::MAX));
    }

    proptest! {
        #[test]
        fn powers_are_fixed_points(bit in 0u32..32) {
            let x = 1u32 << bit;
            prop_assert_eq!(next_power_of_two(x), x);
        }

        #[test]
        fn result_is_smallest_power_above(x in 1u32..=MAX_POWER_OF_TWO) {
            let p = next_power_of_two(x);
            prop_assert!(is_power_of_two(p));
            prop_assert!(p >= x);
            prop_assert!(p / 2 < x);
        }

        #[test]
        fn monotonic(a in 1u32..=MAX_POWER_OF_TWO, b in 1u32..=MAX_POWER_OF_TWO) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(next_power_of_two(lo) <= next_power_of_two(hi));
        }

        #[test]
        fn agrees_with_core(x in 1u32..=MAX_POWER_OF_TWO) {
            prop_assert_eq!(next_power_of_two(x), x.next_power_of_two());
            prop_assert_eq!(checked_next_power_of_two(x), x.checked_next_power_of_two());
            prop_assert_eq!(next_power_of_two_u64(x), x.next_power_of_two() as u64);
        }
    }
}
