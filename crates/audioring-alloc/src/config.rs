//! Ring buffer geometry.

use audioring_bits::{log2_ceil, next_power_of_two, MAX_POWER_OF_TWO};

use crate::checked::MIN_ALIGN;
use crate::error::ConfigError;

/// Channel and frame layout of a ring buffer's backing storage.
///
/// Capacity is always a power of two, so a ring can wrap a frame position
/// with [`frame_mask`](Self::frame_mask) instead of a division. Validated at
/// construction; all values are immutable after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingGeometry {
    channels: u32,
    bytes_per_frame: u32,
    capacity_frames: u32,
}

impl RingGeometry {
    /// Largest accepted capacity request, in frames (`2^31`).
    pub const MAX_CAPACITY_FRAMES: u32 = MAX_POWER_OF_TWO;

    /// Largest accepted total size in bytes: the biggest size that stays
    /// within `isize::MAX` once rounded up to [`MIN_ALIGN`].
    pub const MAX_TOTAL_BYTES: usize = isize::MAX as usize - (MIN_ALIGN - 1);

    /// Validate a geometry, rounding `requested_frames` up to a power of two.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any argument is zero, if `requested_frames` exceeds
    /// [`MAX_CAPACITY_FRAMES`](Self::MAX_CAPACITY_FRAMES), or if the total
    /// byte size exceeds [`MAX_TOTAL_BYTES`](Self::MAX_TOTAL_BYTES).
    ///
    /// ```
    /// use audioring_alloc::RingGeometry;
    ///
    /// let g = RingGeometry::new(2, 4, 100).unwrap();
    /// assert_eq!(g.capacity_frames(), 128);
    /// assert_eq!(g.frame_mask(), 127);
    /// assert_eq!(g.total_bytes(), 2 * 4 * 128);
    /// ```
    pub fn new(
        channels: u32,
        bytes_per_frame: u32,
        requested_frames: u32,
    ) -> Result<Self, ConfigError> {
        if channels == 0 {
            return Err(ConfigError::ZeroChannels);
        }
        if bytes_per_frame == 0 {
            return Err(ConfigError::ZeroBytesPerFrame);
        }
        if requested_frames == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if requested_frames > Self::MAX_CAPACITY_FRAMES {
            return Err(ConfigError::CapacityTooLarge {
                requested: requested_frames,
                max: Self::MAX_CAPACITY_FRAMES,
            });
        }

        let capacity_frames = next_power_of_two(requested_frames);
        let total = (bytes_per_frame as usize)
            .checked_mul(capacity_frames as usize)
            .and_then(|per_channel| per_channel.checked_mul(channels as usize));
        if total.is_none_or(|bytes| bytes > Self::MAX_TOTAL_BYTES) {
            return Err(ConfigError::SizeOverflow {
                channels,
                bytes_per_frame,
                capacity_frames,
            });
        }

        log::debug!(
            "ring geometry: {channels} channels x {capacity_frames} frames \
             x {bytes_per_frame} bytes (requested {requested_frames} frames)"
        );
        Ok(Self {
            channels,
            bytes_per_frame,
            capacity_frames,
        })
    }

    /// Number of channels.
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Bytes in one frame of one channel.
    pub fn bytes_per_frame(&self) -> u32 {
        self.bytes_per_frame
    }

    /// Capacity in frames; always a power of two.
    pub fn capacity_frames(&self) -> u32 {
        self.capacity_frames
    }

    /// `capacity_frames - 1`.
    pub fn frame_mask(&self) -> u32 {
        self.capacity_frames - 1
    }

    /// `log2(capacity_frames)`.
    pub fn log2_capacity(&self) -> u32 {
        log2_ceil(self.capacity_frames)
    }

    /// Bytes of storage for one channel.
    pub fn bytes_per_channel(&self) -> usize {
        self.bytes_per_frame as usize * self.capacity_frames as usize
    }

    /// Bytes of storage for all channels.
    pub fn total_bytes(&self) -> usize {
        self.bytes_per_channel() * self.channels as usize
    }
}
