//! Failure-checked allocation for the audioring workspace.
//!
//! Converts the null-return failure mode of the system allocator into a
//! structured [`AllocError`], and builds ring-buffer storage on top of it.
//! Every `unsafe` block in this crate lives in [`raw`].
//!
//! # Architecture
//!
//! ```text
//! safe_allocate / safe_allocate_in (checked.rs)
//! └── RawBlock<A: RawAllocator> (raw.rs, owned, uninitialised)
//!     └── InitBlock<A> (zero-filled, byte-slice access)
//!         └── ChannelStorage<A> (storage.rs)
//!             └── RingGeometry (config.rs, power-of-two capacity)
//! ```
//!
//! # Ownership
//!
//! A block is owned exclusively by its holder and released exactly once,
//! on drop, through the allocator that produced it.
//! [`RawBlock::into_raw_parts`] hands that responsibility to the caller
//! instead.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod checked;
pub mod config;
pub mod error;
pub mod raw;
pub mod storage;

// Public re-exports for the primary API surface.
pub use checked::{
    safe_allocate, safe_allocate_aligned, safe_allocate_aligned_in, safe_allocate_in,
    safe_allocate_or_abort, MIN_ALIGN,
};
pub use config::RingGeometry;
pub use error::{AllocError, ConfigError, StorageError};
pub use raw::{InitBlock, PlatformAllocator, RawAllocator, RawBlock};
pub use storage::ChannelStorage;
