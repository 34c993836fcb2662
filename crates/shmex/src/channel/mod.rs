// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Shared-memory frame channel.
//!
//! A channel is one POSIX shared memory segment holding a control block,
//! two futex-backed signal cells, and a byte ring buffer. One sender and
//! one receiver exchange self-describing frames through it with FIFO
//! order and blocking backpressure:
//!
//! ```text
//! +--------------------------------------+
//! | ChannelControl   (64 bytes, aligned) |
//! | data signal      (64 bytes, aligned) |
//! | space signal     (64 bytes, aligned) |
//! | ring bytes       (capacity)          |
//! +--------------------------------------+
//! ```
//!
//! The data signal tells the receiver that bytes were written; the space
//! signal tells the sender that bytes were consumed. Both sides use a
//! poll, snapshot, re-poll, wait sequence so a wake between the poll and
//! the sleep is never lost.

mod futex;
mod ring;
mod segment;
mod signal;

pub use ring::{
    ChannelControl, FrameReader, FrameSender, CHANNEL_HEADER_SIZE, CHANNEL_MAGIC, CHANNEL_VERSION,
};
pub use segment::{cleanup_all_segments, cleanup_instance_segments, ShmSegment, SEGMENT_PREFIX};
pub use signal::SignalCell;

use std::fmt;
use std::io;

/// Default ring capacity in bytes.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64 * 1024;

/// Channel and segment errors.
#[derive(Debug)]
pub enum ChannelError {
    /// Segment name violates POSIX shm naming rules.
    InvalidName(String),

    /// Creating a segment that already exists.
    AlreadyExists(String),

    /// Opening a segment that does not exist.
    NotFound(String),

    /// shm_open / ftruncate failure on create.
    SegmentCreate(io::Error),

    /// shm_open failure on open.
    SegmentOpen(io::Error),

    /// mmap failure.
    Mmap(io::Error),

    /// Segment smaller than its own header claims, bad magic, or
    /// version mismatch.
    Corruption(String),

    /// Frame larger than the ring can ever hold.
    FrameTooLarge { frame: usize, capacity: usize },

    /// Blocking send or receive exceeded its timeout.
    Timeout,
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName(name) => write!(f, "Invalid segment name: {name}"),
            Self::AlreadyExists(name) => write!(f, "Segment already exists: {name}"),
            Self::NotFound(name) => write!(f, "Segment not found: {name}"),
            Self::SegmentCreate(e) => write!(f, "Segment create failed: {e}"),
            Self::SegmentOpen(e) => write!(f, "Segment open failed: {e}"),
            Self::Mmap(e) => write!(f, "mmap failed: {e}"),
            Self::Corruption(what) => write!(f, "Channel corruption: {what}"),
            Self::FrameTooLarge { frame, capacity } => write!(
                f,
                "Frame of {frame} bytes cannot fit ring of {capacity} bytes"
            ),
            Self::Timeout => write!(f, "Channel operation timed out"),
        }
    }
}

impl std::error::Error for ChannelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SegmentCreate(e) | Self::SegmentOpen(e) | Self::Mmap(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for channel operations.
pub type Result<T> = std::result::Result<T, ChannelError>;
