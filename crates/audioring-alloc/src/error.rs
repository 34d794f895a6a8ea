//! Allocation and configuration error types.

use std::alloc::Layout;
use std::error::Error;
use std::fmt;

/// Errors from the checked allocator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// A nonzero request could not be satisfied: the underlying allocator
    /// returned null, or the size exceeds `isize::MAX` once rounded up to
    /// the alignment.
    ///
    /// Never produced for a zero-size request.
    OutOfMemory {
        /// Number of bytes requested.
        size: usize,
        /// Alignment requested.
        align: usize,
    },
    /// The caller-supplied alignment is not a power of two.
    InvalidLayout {
        /// Number of bytes requested.
        size: usize,
        /// Alignment requested.
        align: usize,
    },
}

impl AllocError {
    /// Number of bytes the failed request asked for.
    pub fn requested(&self) -> usize {
        match self {
            Self::OutOfMemory { size, .. } | Self::InvalidLayout { size, .. } => *size,
        }
    }

    /// The layout of the failed request, if one exists for its size and
    /// alignment.
    pub fn layout(&self) -> Option<Layout> {
        match self {
            Self::OutOfMemory { size, align } => Layout::from_size_align(*size, *align).ok(),
            Self::InvalidLayout { .. } => None,
        }
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory { size, align } => write!(
                f,
                "out of memory: allocation of {size} bytes (align {align}) failed"
            ),
            Self::InvalidLayout { size, align } => {
                write!(f, "invalid layout: {size} bytes with align {align}")
            }
        }
    }
}

impl Error for AllocError {}

/// Errors from validating a [`RingGeometry`](crate::RingGeometry).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A ring needs at least one channel.
    ZeroChannels,
    /// A frame needs at least one byte.
    ZeroBytesPerFrame,
    /// A ring needs at least one frame of capacity.
    ZeroCapacity,
    /// The requested capacity has no power of two representable in a `u32`.
    CapacityTooLarge {
        /// Frames requested.
        requested: u32,
        /// Largest accepted request.
        max: u32,
    },
    /// `channels * bytes_per_frame * capacity_frames` exceeds
    /// [`RingGeometry::MAX_TOTAL_BYTES`](crate::RingGeometry::MAX_TOTAL_BYTES).
    SizeOverflow {
        /// Channel count.
        channels: u32,
        /// Bytes per frame.
        bytes_per_frame: u32,
        /// Rounded capacity in frames.
        capacity_frames: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroChannels => write!(f, "ring geometry needs at least one channel"),
            Self::ZeroBytesPerFrame => write!(f, "ring geometry needs at least one byte per frame"),
            Self::ZeroCapacity => write!(f, "ring geometry needs at least one frame of capacity"),
            Self::CapacityTooLarge { requested, max } => {
                write!(f, "capacity of {requested} frames exceeds maximum {max}")
            }
            Self::SizeOverflow {
                channels,
                bytes_per_frame,
                capacity_frames,
            } => write!(
                f,
                "ring size overflows: {channels} channels x {capacity_frames} frames \
                 x {bytes_per_frame} bytes"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Errors from building [`ChannelStorage`](crate::ChannelStorage) from raw
/// parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// The geometry was rejected.
    Config(ConfigError),
    /// The backing allocation failed.
    Alloc(AllocError),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "channel storage config: {e}"),
            Self::Alloc(e) => write!(f, "channel storage allocation: {e}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Alloc(e) => Some(e),
        }
    }
}

impl From<ConfigError> for StorageError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<AllocError> for StorageError {
    fn from(e: AllocError) -> Self {
        Self::Alloc(e)
    }
}
