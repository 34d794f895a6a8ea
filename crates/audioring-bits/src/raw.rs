//! Per-target leading-zero-count backends.
//!
//! Each backend exposes `clz32_nonzero`, which is only meaningful for a
//! nonzero argument. Callers go through [`crate::clz`], which handles zero
//! before dispatching here.

#![allow(unsafe_code)]

#[cfg(not(any(
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "aarch64",
    target_arch = "arm",
    target_arch = "riscv32",
    target_arch = "riscv64",
    target_arch = "powerpc",
    target_arch = "powerpc64",
    target_arch = "wasm32",
    target_arch = "wasm64",
    target_arch = "loongarch64",
    target_arch = "mips",
    target_arch = "mips64",
    target_arch = "s390x",
)))]
compile_error!("audioring-bits: no leading-zero-count backend for this target architecture");

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    not(miri),
    not(feature = "intrinsic-clz")
))]
mod imp {
    pub(crate) const NAME: &str = "x86-bsr";

    /// `bsr` yields the index of the highest set bit; `31 - index` is the
    /// leading-zero count, and for an index in `0..32` that equals
    /// `index ^ 31`.
    #[inline]
    pub(crate) fn clz32_nonzero(value: u32) -> u32 {
        debug_assert_ne!(value, 0);
        let index: u32;
        // SAFETY: `bsr` reads one register and writes another. It touches
        // no memory and no stack. Its output is undefined only for a zero
        // source, which callers exclude.
        unsafe {
            core::arch::asm!(
                "bsr {index:e}, {value:e}",
                value = in(reg) value,
                index = lateout(reg) index,
                options(pure, nomem, nostack),
            );
        }
        index ^ 31
    }
}

#[cfg(not(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    not(miri),
    not(feature = "intrinsic-clz")
)))]
mod imp {
    pub(crate) const NAME: &str = "intrinsic";

    #[inline]
    pub(crate) fn clz32_nonzero(value: u32) -> u32 {
        debug_assert_ne!(value, 0);
        value.leading_zeros()
    }
}

pub(crate) use imp::{clz32_nonzero, NAME};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_bits_match_position() {
        for bit in 0..32 {
            assert_eq!(clz32_nonzero(1u32 << bit), 31 - bit, "bit {bit}");
        }
    }

    #[test]
    fn low_bits_do_not_change_result() {
        for bit in 1..32 {
            let top = 1u32 << bit;
            assert_eq!(clz32_nonzero(top | (top - 1)), 31 - bit, "bit {bit}");
        }
    }

    #[test]
    fn backend_name_is_known() {
        assert!(NAME == "x86-bsr" || NAME == "intrinsic");
    }
}
