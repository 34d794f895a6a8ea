//! Test utilities and allocator fixtures for audioring development.
//!
//! Two [`RawAllocator`] implementations that delegate to the platform heap:
//!
//! - [`FailingAllocator`]: refuses requests after N successes.
//! - [`CountingAllocator`]: records every allocation and release so tests
//!   can assert that each block is freed exactly once.
//!
//! Both use atomics for their counters so they satisfy `Send + Sync` and
//! can be shared across threads by reference.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::alloc::Layout;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};

use audioring_alloc::{PlatformAllocator, RawAllocator};

/// Fails deterministically after a configurable number of successful
/// allocations.
///
/// Useful for exercising the out-of-memory path without exhausting the
/// real heap.
pub struct FailingAllocator {
    pub succeed_count: usize,
    attempts: AtomicUsize,
}

impl FailingAllocator {
    /// Create an allocator that succeeds `succeed_count` times then fails.
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            attempts: AtomicUsize::new(0),
        }
    }

    /// An allocator that refuses every request.
    pub fn always() -> Self {
        Self::new(0)
    }

    /// How many times `allocate()` has been called.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Reset the attempt counter.
    pub fn reset(&self) {
        self.attempts.store(0, Ordering::Relaxed);
    }
}

#[allow(unsafe_code)]
// SAFETY: successes are forwarded to the platform allocator; failures
// return `None`.
unsafe impl RawAllocator for FailingAllocator {
    unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        let n = self.attempts.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return None;
        }
        // SAFETY: the caller guarantees a nonzero size.
        unsafe { PlatformAllocator.allocate(layout) }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: `ptr` came from the platform allocator in `allocate`.
        unsafe { PlatformAllocator.deallocate(ptr, layout) }
    }
}

/// Records allocations and releases while delegating to the platform heap.
#[derive(Default)]
pub struct CountingAllocator {
    allocations: AtomicUsize,
    releases: AtomicUsize,
    live: AtomicUsize,
    live_bytes: AtomicUsize,
}

impl CountingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Successful calls to `allocate()`.
    pub fn allocations(&self) -> usize {
        self.allocations.load(Ordering::SeqCst)
    }

    /// Calls to `deallocate()`.
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    /// Blocks allocated but not yet released.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Bytes allocated but not yet released.
    pub fn live_bytes(&self) -> usize {
        self.live_bytes.load(Ordering::SeqCst)
    }
}

#[allow(unsafe_code)]
// SAFETY: forwards to the platform allocator unchanged.
unsafe impl RawAllocator for CountingAllocator {
    unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        // SAFETY: the caller guarantees a nonzero size.
        let ptr = unsafe { PlatformAllocator.allocate(layout) }?;
        self.allocations.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_add(1, Ordering::SeqCst);
        self.live_bytes.fetch_add(layout.size(), Ordering::SeqCst);
        Some(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.live.fetch_sub(1, Ordering::SeqCst);
        self.releases.fetch_add(1, Ordering::SeqCst);
        self.live_bytes.fetch_sub(layout.size(), Ordering::SeqCst);
        // SAFETY: `ptr` came from the platform allocator in `allocate`.
        unsafe { PlatformAllocator.deallocate(ptr, layout) }
    }
}

// Compile-time assertion: fixtures can be shared across threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<FailingAllocator>();
    assert::<CountingAllocator>();
};
