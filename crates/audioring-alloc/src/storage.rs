//! Per-channel backing storage for a ring buffer.
//!
//! One checked allocation holds every channel back to back:
//!
//! ```text
//! | channel 0 (bytes_per_channel) | channel 1 | ... | channel n-1 |
//! ```
//!
//! Storage is zero-filled at creation, so every channel reads as silence
//! before the first write.

use crate::checked::{safe_allocate_in, MIN_ALIGN};
use crate::config::RingGeometry;
use crate::error::{AllocError, StorageError};
use crate::raw::{InitBlock, PlatformAllocator, RawAllocator};

/// Zero-initialised storage for every channel of a ring.
pub struct ChannelStorage<A: RawAllocator = PlatformAllocator> {
    geometry: RingGeometry,
    block: InitBlock<A>,
}

impl ChannelStorage {
    /// Allocate storage for `geometry` from the platform allocator.
    pub fn new(geometry: RingGeometry) -> Result<Self, AllocError> {
        Self::new_in(geometry, PlatformAllocator)
    }

    /// Validate a geometry and allocate storage for it in one step.
    ///
    /// ```
    /// use audioring_alloc::ChannelStorage;
    ///
    /// let storage = ChannelStorage::with_frames(2, 4, 100).unwrap();
    /// assert_eq!(storage.channel(1).map(|c| c.len()), Some(512));
    /// ```
    pub fn with_frames(
        channels: u32,
        bytes_per_frame: u32,
        requested_frames: u32,
    ) -> Result<Self, StorageError> {
        let geometry = RingGeometry::new(channels, bytes_per_frame, requested_frames)?;
        Ok(Self::new(geometry)?)
    }
}

impl<A: RawAllocator> ChannelStorage<A> {
    /// Allocate storage for `geometry` from `alloc`.
    pub fn new_in(geometry: RingGeometry, alloc: A) -> Result<Self, AllocError> {
        let block = safe_allocate_in(geometry.total_bytes(), alloc)?.zeroed();
        debug_assert_eq!(block.layout().align(), MIN_ALIGN);
        Ok(Self { geometry, block })
    }

    /// The geometry this storage was sized for.
    pub fn geometry(&self) -> &RingGeometry {
        &self.geometry
    }

    /// Bytes of channel `index`, or `None` if out of range.
    pub fn channel(&self, index: u32) -> Option<&[u8]> {
        if index >= self.geometry.channels() {
            return None;
        }
        let len = self.geometry.bytes_per_channel();
        let start = index as usize * len;
        self.block.get(start..start + len)
    }

    /// Mutable bytes of channel `index`, or `None` if out of range.
    pub fn channel_mut(&mut self, index: u32) -> Option<&mut [u8]> {
        if index >= self.geometry.channels() {
            return None;
        }
        let len = self.geometry.bytes_per_channel();
        let start = index as usize * len;
        self.block.get_mut(start..start + len)
    }

    /// Every channel's bytes, mutably and disjointly, in channel order.
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [u8]> + '_ {
        let len = self.geometry.bytes_per_channel();
        self.block.chunks_exact_mut(len)
    }

    /// The whole buffer, all channels back to back.
    pub fn as_bytes(&self) -> &[u8] {
        self.block.as_slice()
    }

    /// Zero every channel again.
    pub fn clear(&mut self) {
        self.block.fill(0);
    }
}

impl<A: RawAllocator> std::fmt::Debug for ChannelStorage<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelStorage")
            .field("geometry", &self.geometry)
            .field("block", &self.block)
            .finish()
    }
}
