//! audioring: numeric and allocation primitives for lock-free audio ring buffers.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the audioring sub-crates. The ring buffer itself (indexing, reader/writer
//! synchronisation, timestamps) is built on top of these primitives
//! elsewhere.
//!
//! # Quick start
//!
//! ```rust
//! use audioring::prelude::*;
//!
//! // Size a stereo float ring for at least 1000 frames.
//! assert_eq!(next_power_of_two(1000), 1024);
//! assert_eq!(log2_ceil(1000), 10);
//!
//! let geometry = RingGeometry::new(2, 4, 1000).unwrap();
//! let mut storage = ChannelStorage::new(geometry).unwrap();
//! storage.channel_mut(0).unwrap()[0] = 1;
//! assert_eq!(storage.channel(1).unwrap()[0], 0);
//!
//! // Raw blocks convert allocator failure into an error, never a null.
//! let block = safe_allocate(256).unwrap();
//! assert_eq!(block.len(), 256);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`bits`] | `audioring-bits` | Leading-zero count, log2, powers of two |
//! | [`alloc`] | `audioring-alloc` | Checked allocator, blocks, geometry, storage |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Bit arithmetic (`audioring-bits`).
///
/// [`bits::count_leading_zeroes`] routes to a per-target backend
/// ([`bits::CLZ_BACKEND`]) and returns 32 for zero on every target.
pub use audioring_bits as bits;

/// Checked allocation and ring storage (`audioring-alloc`).
///
/// [`alloc::safe_allocate`] never hands out an invalid block for a nonzero
/// request; [`alloc::RingGeometry`] and [`alloc::ChannelStorage`] size and
/// hold a ring's channels.
pub use audioring_alloc as alloc;

/// Common imports for typical audioring usage.
///
/// ```rust
/// use audioring::prelude::*;
/// ```
pub mod prelude {
    // Bit arithmetic
    pub use audioring_bits::{
        checked_next_power_of_two, count_leading_zeroes, is_power_of_two, log2_ceil, log2_floor,
        next_power_of_two,
    };

    // Allocation
    pub use audioring_alloc::{
        safe_allocate, safe_allocate_in, AllocError, ChannelStorage, ConfigError, InitBlock,
        PlatformAllocator, RawAllocator, RawBlock, RingGeometry, StorageError,
    };
}
