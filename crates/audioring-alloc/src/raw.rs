//! Owned raw memory blocks and the allocator seam beneath them.
//!
//! Every `unsafe` operation in this crate lives here, each with a
//! `// SAFETY:` comment. The rest of the crate builds on [`RawBlock`] and
//! [`InitBlock`] through safe methods only.

#![allow(unsafe_code)]

use std::alloc::{GlobalAlloc, Layout, System};
use std::fmt;
use std::mem::{ManuallyDrop, MaybeUninit};
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

use crate::error::AllocError;

/// The underlying allocator a [`RawBlock`] obtains memory from.
///
/// Requests always have a nonzero size; zero-size blocks never reach the
/// allocator.
///
/// # Safety
///
/// Implementors must return either `None` or a pointer to a fresh region of
/// at least `layout.size()` bytes aligned to `layout.align()`, valid until
/// it is passed back to [`deallocate`](RawAllocator::deallocate).
pub unsafe trait RawAllocator {
    /// Obtain a block for `layout`, or `None` on failure.
    ///
    /// # Safety
    ///
    /// `layout.size()` must be nonzero.
    unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Release a block previously returned by [`allocate`](RawAllocator::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must come from `self.allocate(layout)` with the same `layout`
    /// and must not have been released already.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

// SAFETY: forwards to `A`, which upholds the contract.
unsafe impl<A: RawAllocator + ?Sized> RawAllocator for &A {
    unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        // SAFETY: the caller's guarantees are passed through unchanged.
        unsafe { (**self).allocate(layout) }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: the caller's guarantees are passed through unchanged.
        unsafe { (**self).deallocate(ptr, layout) }
    }
}

/// The system allocator (`malloc`/`free` on Unix, `HeapAlloc` on Windows).
///
/// Bypasses any `#[global_allocator]` so blocks come from the platform
/// heap directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlatformAllocator;

// SAFETY: `System` upholds the `GlobalAlloc` contract, which is stricter
// than ours; a null return is mapped to `None`.
unsafe impl RawAllocator for PlatformAllocator {
    unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        // SAFETY: the caller guarantees a nonzero size.
        NonNull::new(unsafe { System.alloc(layout) })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: the caller guarantees `ptr` came from `System.alloc(layout)`.
        unsafe { System.dealloc(ptr.as_ptr(), layout) }
    }
}

/// An exclusively owned, uninitialised, aligned block of memory.
///
/// Released exactly once on drop through the allocator that produced it.
/// A zero-length block holds a dangling, well-aligned pointer and never
/// touches the allocator.
pub struct RawBlock<A: RawAllocator = PlatformAllocator> {
    ptr: NonNull<u8>,
    layout: Layout,
    alloc: A,
}

// SAFETY: the block is uniquely owned; moving it to another thread moves
// the only handle to the memory. Releasing it there needs `A: Send`.
unsafe impl<A: RawAllocator + Send> Send for RawBlock<A> {}
// SAFETY: shared access only hands out `&[MaybeUninit<u8>]` and `&A`.
unsafe impl<A: RawAllocator + Sync> Sync for RawBlock<A> {}

impl<A: RawAllocator> RawBlock<A> {
    /// Allocate a block for `layout` from `alloc`.
    ///
    /// Use [`safe_allocate_in`](crate::safe_allocate_in) and friends
    /// instead; they also report failures to the log.
    pub(crate) fn allocate_in(layout: Layout, alloc: A) -> Result<Self, AllocError> {
        if layout.size() == 0 {
            let dangling = ptr::without_provenance_mut::<u8>(layout.align());
            // SAFETY: alignments are nonzero, so the address is non-null.
            let ptr = unsafe { NonNull::new_unchecked(dangling) };
            return Ok(Self { ptr, layout, alloc });
        }
        // SAFETY: the size is nonzero.
        match unsafe { alloc.allocate(layout) } {
            Some(ptr) => Ok(Self { ptr, layout, alloc }),
            None => Err(AllocError::OutOfMemory {
                size: layout.size(),
                align: layout.align(),
            }),
        }
    }

    /// Rebuild a block from parts returned by [`into_raw_parts`](Self::into_raw_parts).
    ///
    /// # Safety
    ///
    /// The parts must come from a single `into_raw_parts` call, and the
    /// block must not have been released since.
    pub unsafe fn from_raw_parts(ptr: NonNull<u8>, layout: Layout, alloc: A) -> Self {
        Self { ptr, layout, alloc }
    }

    /// Give up ownership without releasing the memory.
    ///
    /// The caller becomes responsible for passing the pointer back to
    /// `alloc.deallocate(ptr, layout)` exactly once (skip this when
    /// `layout.size()` is zero), or for rebuilding the block with
    /// [`from_raw_parts`](Self::from_raw_parts).
    pub fn into_raw_parts(self) -> (NonNull<u8>, Layout, A) {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so `alloc` is moved out exactly once.
        let alloc = unsafe { ptr::read(&this.alloc) };
        (this.ptr, this.layout, alloc)
    }

    /// Size of the block in bytes.
    pub fn len(&self) -> usize {
        self.layout.size()
    }

    /// Whether this is a zero-length block.
    pub fn is_empty(&self) -> bool {
        self.layout.size() == 0
    }

    /// Alignment of the block's start address.
    pub fn align(&self) -> usize {
        self.layout.align()
    }

    /// The layout the block was allocated with.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The allocator that will release the block.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Start address of the block.
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// Mutable start address of the block.
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// The block's bytes, which may be uninitialised.
    pub fn as_uninit_slice(&self) -> &[MaybeUninit<u8>] {
        // SAFETY: `ptr` is valid for `len` bytes (or dangling and aligned
        // with `len == 0`), and `MaybeUninit<u8>` has no validity invariant.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr().cast(), self.len()) }
    }

    /// The block's bytes, mutably, which may be uninitialised.
    pub fn as_uninit_slice_mut(&mut self) -> &mut [MaybeUninit<u8>] {
        // SAFETY: as above, and `&mut self` guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr().cast(), self.len()) }
    }

    /// Zero every byte, turning the block into an [`InitBlock`].
    pub fn zeroed(mut self) -> InitBlock<A> {
        self.as_uninit_slice_mut().fill(MaybeUninit::new(0));
        InitBlock { block: self }
    }
}

impl<A: RawAllocator> Drop for RawBlock<A> {
    fn drop(&mut self) {
        if self.layout.size() == 0 {
            return;
        }
        // SAFETY: a nonzero-size block always came from `alloc.allocate(layout)`
        // and is released only here.
        unsafe { self.alloc.deallocate(self.ptr, self.layout) }
    }
}

impl<A: RawAllocator> fmt::Debug for RawBlock<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBlock")
            .field("ptr", &self.ptr)
            .field("len", &self.len())
            .field("align", &self.align())
            .finish()
    }
}

/// A [`RawBlock`] whose every byte is initialised.
///
/// Dereferences to `[u8]`.
pub struct InitBlock<A: RawAllocator = PlatformAllocator> {
    block: RawBlock<A>,
}

impl<A: RawAllocator> InitBlock<A> {
    /// The block's bytes.
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: every byte was written by `RawBlock::zeroed`, and only
        // initialised `u8`s can be written through `as_mut_slice`.
        unsafe { slice::from_raw_parts(self.block.as_ptr(), self.block.len()) }
    }

    /// The block's bytes, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as above, and `&mut self` guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.block.as_mut_ptr(), self.block.len()) }
    }

    /// The layout the block was allocated with.
    pub fn layout(&self) -> Layout {
        self.block.layout()
    }

    /// Forget the initialisation guarantee.
    pub fn into_raw_block(self) -> RawBlock<A> {
        self.block
    }
}

impl<A: RawAllocator> Deref for InitBlock<A> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl<A: RawAllocator> DerefMut for InitBlock<A> {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl<A: RawAllocator> fmt::Debug for InitBlock<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitBlock")
            .field("ptr", &self.block.ptr)
            .field("len", &self.block.len())
            .field("align", &self.block.align())
            .finish()
    }
}
