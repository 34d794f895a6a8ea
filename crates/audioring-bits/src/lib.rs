//! Bit arithmetic primitives for the audioring workspace.
//!
//! This is the leaf crate with zero internal dependencies. It provides the
//! integer helpers a power-of-two ring buffer is sized with:
//!
//! - [`count_leading_zeroes`]: portable leading-zero count, `32` at zero.
//! - [`log2_ceil`]: smallest `n` with `2^n >= x`.
//! - [`next_power_of_two`]: smallest power of two `>= x`.
//!
//! # Backends
//!
//! The leading-zero count is routed to a per-target backend chosen at build
//! time:
//!
//! ```text
//! count_leading_zeroes (normalises zero to 32)
//! └── raw::clz32_nonzero
//!     ├── x86 / x86_64 ── inline `bsr` (undefined at zero)
//!     └── other known targets, Miri, or feature `intrinsic-clz`
//!                      ── u32::leading_zeros
//! ```
//!
//! Targets outside the known list fail to compile. [`CLZ_BACKEND`] names the
//! backend that was selected.
//!
//! # Preconditions
//!
//! [`log2_ceil`], [`log2_floor`] and [`next_power_of_two`] are defined for
//! `x >= 1`. Zero is not checked at runtime; the documented wrapping result
//! is returned instead of panicking.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod clz;
pub mod log2;
pub mod pow2;
mod raw;

pub use clz::{count_leading_zeroes, count_leading_zeroes_u64, count_trailing_zeroes, CLZ_BACKEND};
pub use log2::{log2_ceil, log2_floor};
pub use pow2::{
    checked_next_power_of_two, is_power_of_two, next_power_of_two, next_power_of_two_u64,
    MAX_POWER_OF_TWO,
};
