// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Frame wire format.
//!
//! Every message on a channel is one self-describing frame:
//!
//! ```text
//! u64 type_hash (LE) | u32 payload_len (LE) | payload bytes
//! ```
//!
//! The payload is the type's fixed region followed by a packed
//! variable-data region. Variable-length fields hold a 16-byte inline
//! `(u64 offset, u64 length)` slot; offsets are relative to the start of
//! the variable region, and slots must cover it exactly in field order
//! with no gaps and no trailing bytes. That exactness is what lets a
//! reader verify a payload once and then hand out zero-copy views.
//!
//! A `type_hash` of zero is the shutdown sentinel; no generated type may
//! hash to it.

use std::fmt;

/// Frame header: type hash + payload length.
pub const FRAME_HEADER_SIZE: usize = 12;
/// Inline slot of one variable-length field: u64 offset + u64 length.
pub const VAR_SLOT_SIZE: usize = 16;
/// Reserved hash of the shutdown sentinel frame.
pub const SHUTDOWN_TYPE_HASH: u64 = 0;

/// Payload-level corruption and bounds errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Buffer shorter than the region being decoded.
    TooShort { need: usize, have: usize },

    /// Destination buffer cannot hold the serialized frame.
    BufferTooSmall { need: usize, have: usize },

    /// A variable slot points outside the variable region.
    VarSlotOutOfBounds { field: &'static str },

    /// A variable slot does not start where the previous one ended.
    VarSlotGap { field: &'static str },

    /// Bytes remain in the variable region after the last slot.
    VarRegionTrailing { unclaimed: usize },

    /// An enum field holds a discriminant outside its declared range.
    InvalidEnumValue { field: &'static str, value: u32 },

    /// A string field's bytes are not valid UTF-8.
    InvalidUtf8 { field: &'static str },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { need, have } => {
                write!(f, "Payload too short: need {need} bytes, have {have}")
            }
            Self::BufferTooSmall { need, have } => {
                write!(f, "Buffer too small: need {need} bytes, have {have}")
            }
            Self::VarSlotOutOfBounds { field } => {
                write!(f, "Variable slot for field {field} is out of bounds")
            }
            Self::VarSlotGap { field } => {
                write!(f, "Variable slot for field {field} leaves a gap")
            }
            Self::VarRegionTrailing { unclaimed } => {
                write!(f, "Variable region has {unclaimed} unclaimed trailing bytes")
            }
            Self::InvalidEnumValue { field, value } => {
                write!(f, "Enum field {field} holds invalid discriminant {value}")
            }
            Self::InvalidUtf8 { field } => {
                write!(f, "String field {field} is not valid UTF-8")
            }
        }
    }
}

impl std::error::Error for FrameError {}

/// Result type for payload decoding.
pub type Result<T> = std::result::Result<T, FrameError>;

/// Decoded frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub type_hash: u64,
    pub payload_len: u32,
}

impl FrameHeader {
    /// Encode into the first [`FRAME_HEADER_SIZE`] bytes of `buf`.
    pub fn encode(&self, buf: &mut [u8]) -> Result<()> {
        if buf.len() < FRAME_HEADER_SIZE {
            return Err(FrameError::BufferTooSmall {
                need: FRAME_HEADER_SIZE,
                have: buf.len(),
            });
        }
        buf[0..8].copy_from_slice(&self.type_hash.to_le_bytes());
        buf[8..12].copy_from_slice(&self.payload_len.to_le_bytes());
        Ok(())
    }

    /// Decode from the first [`FRAME_HEADER_SIZE`] bytes of `buf`.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < FRAME_HEADER_SIZE {
            return Err(FrameError::TooShort {
                need: FRAME_HEADER_SIZE,
                have: buf.len(),
            });
        }
        let mut hash = [0u8; 8];
        hash.copy_from_slice(&buf[0..8]);
        let mut len = [0u8; 4];
        len.copy_from_slice(&buf[8..12]);
        Ok(Self {
            type_hash: u64::from_le_bytes(hash),
            payload_len: u32::from_le_bytes(len),
        })
    }
}

/// An owned received frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub type_hash: u64,
    pub payload: Vec<u8>,
}

impl Frame {
    #[must_use]
    pub fn new(type_hash: u64, payload: Vec<u8>) -> Self {
        Self { type_hash, payload }
    }

    /// The zero-payload shutdown sentinel.
    #[must_use]
    pub fn shutdown() -> Self {
        Self {
            type_hash: SHUTDOWN_TYPE_HASH,
            payload: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        self.type_hash == SHUTDOWN_TYPE_HASH
    }

    /// Total wire size: header plus payload.
    #[must_use]
    pub fn wire_size(&self) -> usize {
        FRAME_HEADER_SIZE + self.payload.len()
    }
}

/// Append-side cursor over a payload's variable-data region.
///
/// Generated serializers call [`VarRegion::append`] once per
/// variable-length field, in field order, which yields the packed
/// `(offset, length)` pair for that field's inline slot.
#[derive(Debug)]
pub struct VarRegion {
    start: usize,
}

impl VarRegion {
    /// Begin the variable region at the current end of `buf` (the end of
    /// the fixed region).
    #[must_use]
    pub fn new(buf: &Vec<u8>) -> Self {
        Self { start: buf.len() }
    }

    /// Append one field's bytes and return its `(offset, length)` slot
    /// values, offset relative to the variable region start.
    pub fn append(&self, buf: &mut Vec<u8>, data: &[u8]) -> (u64, u64) {
        let offset = (buf.len() - self.start) as u64;
        buf.extend_from_slice(data);
        (offset, data.len() as u64)
    }
}

/// Verify-side cursor over a payload's variable-data region.
///
/// Generated verifiers call [`VarCheck::slot`] once per variable-length
/// field in field order and [`VarCheck::finish`] at the end; together
/// these enforce the contiguity invariant: slots cover the region
/// exactly, in order, without gaps or trailing bytes.
#[derive(Debug)]
pub struct VarCheck {
    region_len: usize,
    cursor: u64,
}

impl VarCheck {
    #[must_use]
    pub fn new(region_len: usize) -> Self {
        Self {
            region_len,
            cursor: 0,
        }
    }

    /// Check one slot against the running cursor.
    pub fn slot(&mut self, field: &'static str, offset: u64, length: u64) -> Result<()> {
        if offset != self.cursor {
            return Err(FrameError::VarSlotGap { field });
        }
        let end = offset
            .checked_add(length)
            .ok_or(FrameError::VarSlotOutOfBounds { field })?;
        if end > self.region_len as u64 {
            return Err(FrameError::VarSlotOutOfBounds { field });
        }
        self.cursor = end;
        Ok(())
    }

    /// Check that the slots consumed the whole region.
    pub fn finish(&self) -> Result<()> {
        let unclaimed = self.region_len as u64 - self.cursor;
        if unclaimed != 0 {
            return Err(FrameError::VarRegionTrailing {
                unclaimed: unclaimed as usize,
            });
        }
        Ok(())
    }
}
