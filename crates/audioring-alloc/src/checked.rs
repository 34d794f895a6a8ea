//! The checked allocation entry points.
//!
//! A null return from the underlying allocator for a nonzero request is
//! turned into [`AllocError::OutOfMemory`] and logged; callers can treat
//! any `Ok` block as valid. A zero-size request always succeeds.

use std::alloc::Layout;

use crate::error::AllocError;
use crate::raw::{PlatformAllocator, RawAllocator, RawBlock};

/// Alignment of blocks from [`safe_allocate`], matching what `malloc`
/// guarantees on the target.
pub const MIN_ALIGN: usize = if cfg!(target_pointer_width = "64") {
    16
} else {
    8
};

/// Allocate `size` uninitialised bytes from the platform allocator.
///
/// ```
/// use audioring_alloc::safe_allocate;
///
/// let block = safe_allocate(1024).unwrap();
/// assert_eq!(block.len(), 1024);
///
/// let empty = safe_allocate(0).unwrap();
/// assert!(empty.is_empty());
/// ```
pub fn safe_allocate(size: usize) -> Result<RawBlock, AllocError> {
    safe_allocate_aligned_in(size, MIN_ALIGN, PlatformAllocator)
}

/// Allocate `size` bytes aligned to `align` from the platform allocator.
///
/// `align` must be a power of two.
pub fn safe_allocate_aligned(size: usize, align: usize) -> Result<RawBlock, AllocError> {
    safe_allocate_aligned_in(size, align, PlatformAllocator)
}

/// Allocate `size` bytes from `alloc` at [`MIN_ALIGN`].
pub fn safe_allocate_in<A: RawAllocator>(
    size: usize,
    alloc: A,
) -> Result<RawBlock<A>, AllocError> {
    safe_allocate_aligned_in(size, MIN_ALIGN, alloc)
}

/// Allocate `size` bytes aligned to `align` from `alloc`.
///
/// All other entry points funnel through here. A non-power-of-two `align`
/// is the only [`AllocError::InvalidLayout`]; a size too large for any
/// allocator to satisfy is [`AllocError::OutOfMemory`] like a null return.
pub fn safe_allocate_aligned_in<A: RawAllocator>(
    size: usize,
    align: usize,
    alloc: A,
) -> Result<RawBlock<A>, AllocError> {
    if !align.is_power_of_two() {
        log::warn!("rejected allocation: {size} bytes with invalid align {align}");
        return Err(AllocError::InvalidLayout { size, align });
    }
    let result = match Layout::from_size_align(size, align) {
        Ok(layout) => RawBlock::allocate_in(layout, alloc),
        // With a valid alignment only an oversized request is rejected.
        Err(_) => Err(AllocError::OutOfMemory { size, align }),
    };
    result.inspect_err(|_| {
        log::warn!("allocation of {size} bytes (align {align}) failed: out of memory");
    })
}

/// Allocate `size` bytes, diverging instead of returning an error.
///
/// On out-of-memory this calls [`std::alloc::handle_alloc_error`], which
/// aborts the process by default.
///
/// # Panics
///
/// Panics with the out-of-memory message if `size` exceeds `isize::MAX`
/// once rounded up to [`MIN_ALIGN`], since no [`Layout`] exists to hand to
/// the handler.
pub fn safe_allocate_or_abort(size: usize) -> RawBlock {
    match safe_allocate(size) {
        Ok(block) => block,
        Err(err) => match err.layout() {
            Some(layout) => std::alloc::handle_alloc_error(layout),
            None => panic!("{err}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr::NonNull;

    struct Refuse;

    #[allow(unsafe_code)]
    unsafe impl RawAllocator for Refuse {
        unsafe fn allocate(&self, _layout: Layout) -> Option<NonNull<u8>> {
            None
        }

        unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {
            unreachable!("nothing was ever allocated");
        }
    }

    #[test]
    fn default_alignment_matches_malloc() {
        let block = safe_allocate(100).unwrap();
        assert_eq!(block.align(), MIN_ALIGN);
        assert_eq!(block.as_ptr() as usize % MIN_ALIGN, 0);
        assert!(block.len() >= 100);
    }

    #[test]
    fn zero_size_never_fails() {
        assert!(safe_allocate(0).unwrap().is_empty());
        assert!(safe_allocate_in(0, Refuse).unwrap().is_empty());
    }

    #[test]
    fn refused_request_is_out_of_memory() {
        let err = safe_allocate_in(8, Refuse).unwrap_err();
        assert_eq!(
            err,
            AllocError::OutOfMemory {
                size: 8,
                align: MIN_ALIGN
            }
        );
    }

    #[test]
    fn bad_alignment_is_invalid_layout() {
        let err = safe_allocate_aligned(64, 3).unwrap_err();
        assert_eq!(err, AllocError::InvalidLayout { size: 64, align: 3 });
    }

    #[test]
    fn oversized_request_is_out_of_memory() {
        for size in [usize::MAX, isize::MAX as usize, isize::MAX as usize - 1] {
            let err = safe_allocate(size).unwrap_err();
            assert_eq!(
                err,
                AllocError::OutOfMemory {
                    size,
                    align: MIN_ALIGN
                }
            );
        }
    }

    #[test]
    fn oversized_request_with_custom_align_is_out_of_memory() {
        let err = safe_allocate_aligned(usize::MAX, 64).unwrap_err();
        assert_eq!(
            err,
            AllocError::OutOfMemory {
                size: usize::MAX,
                align: 64
            }
        );
    }

    #[test]
    fn zero_alignment_is_invalid_layout() {
        let err = safe_allocate_aligned(0, 0).unwrap_err();
        assert_eq!(err, AllocError::InvalidLayout { size: 0, align: 0 });
    }

    #[test]
    fn large_alignment_is_honoured() {
        let block = safe_allocate_aligned(10, 4096).unwrap();
        assert_eq!(block.as_ptr() as usize % 4096, 0);
    }

    #[test]
    fn abort_variant_returns_usable_block() {
        let mut block = safe_allocate_or_abort(16);
        block.as_uninit_slice_mut()[15].write(7);
        assert_eq!(block.len(), 16);
    }

    #[test]
    #[should_panic(expected = "out of memory")]
    fn abort_variant_reports_oversized_request_as_out_of_memory() {
        let _ = safe_allocate_or_abort(usize::MAX);
    }
}
