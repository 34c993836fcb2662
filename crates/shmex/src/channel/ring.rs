// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Single-producer single-consumer byte ring over shared memory.
//!
//! Positions are monotonic u64 byte counts; the occupied span is
//! `write_pos - read_pos` and physical offsets are `pos % capacity`, so
//! full and empty are never ambiguous and wraparound needs no special
//! slot states. The sender is the only writer of `write_pos`, the
//! receiver the only writer of `read_pos`; each publishes with Release
//! and reads the peer's position with Acquire, which is what makes the
//! copied frame bytes visible before the position that covers them.

use super::segment::ShmSegment;
use super::signal::SignalCell;
use super::{ChannelError, Result};
use crate::frame::{Frame, FrameHeader, FRAME_HEADER_SIZE};
use crate::proxy::ShmType;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Magic "SHMC" marking an initialized channel control block.
pub const CHANNEL_MAGIC: u32 = 0x5348_4D43;
/// Wire-layout version; bumped on any incompatible header change.
pub const CHANNEL_VERSION: u32 = 1;

/// Bytes of header before the ring: control block + two signal cells.
pub const CHANNEL_HEADER_SIZE: usize = 192;

/// Channel control block (one cache line).
#[repr(C, align(64))]
pub struct ChannelControl {
    /// Layout marker, CHANNEL_MAGIC once initialized
    pub magic: AtomicU32,
    /// Layout version
    pub version: AtomicU32,
    /// Ring capacity in bytes
    pub capacity: AtomicU64,
    /// Monotonic count of bytes ever written (sender-owned)
    pub write_pos: AtomicU64,
    /// Monotonic count of bytes ever consumed (receiver-owned)
    pub read_pos: AtomicU64,
    _pad: [u8; 32],
}

/// Shared view over a mapped channel segment, used by both endpoints.
#[derive(Debug)]
struct ChannelMap {
    segment: ShmSegment,
    capacity: usize,
}

impl ChannelMap {
    fn create(name: &str, capacity: usize) -> Result<Self> {
        if !capacity.is_power_of_two() || capacity > u32::MAX as usize {
            return Err(ChannelError::Corruption(format!(
                "Ring capacity {capacity} must be a power of two"
            )));
        }
        let segment = ShmSegment::create(name, CHANNEL_HEADER_SIZE + capacity)?;
        let map = Self { segment, capacity };
        let control = map.control();
        control.capacity.store(capacity as u64, Ordering::Relaxed);
        control.version.store(CHANNEL_VERSION, Ordering::Relaxed);
        // Publish the magic last; an attacher that sees it sees the
        // rest of the control block too.
        control.magic.store(CHANNEL_MAGIC, Ordering::Release);
        Ok(map)
    }

    fn attach(name: &str) -> Result<Self> {
        // Map the header alone first to learn the ring capacity, then
        // remap at full size.
        let capacity = {
            let header = ShmSegment::open(name, CHANNEL_HEADER_SIZE)?;
            // SAFETY: The mapping is at least CHANNEL_HEADER_SIZE bytes
            // and mmap returns page-aligned memory, which satisfies the
            // control block's 64-byte alignment.
            let control = unsafe { &*(header.as_ptr() as *const ChannelControl) };
            if control.magic.load(Ordering::Acquire) != CHANNEL_MAGIC {
                return Err(ChannelError::Corruption(format!(
                    "Bad magic in segment {name}"
                )));
            }
            let version = control.version.load(Ordering::Relaxed);
            if version != CHANNEL_VERSION {
                return Err(ChannelError::Corruption(format!(
                    "Channel version {version} in segment {name}, expected {CHANNEL_VERSION}"
                )));
            }
            control.capacity.load(Ordering::Relaxed) as usize
        };
        if !capacity.is_power_of_two() || capacity > u32::MAX as usize {
            return Err(ChannelError::Corruption(format!(
                "Ring capacity {capacity} in segment {name} is not a power of two"
            )));
        }
        let segment = ShmSegment::open(name, CHANNEL_HEADER_SIZE + capacity)?;
        Ok(Self { segment, capacity })
    }

    #[inline]
    fn control(&self) -> &ChannelControl {
        // SAFETY: The segment is at least CHANNEL_HEADER_SIZE bytes,
        // the control block lives at offset 0, and mmap's page
        // alignment satisfies align(64). The block holds only atomics,
        // so shared references across processes are sound.
        unsafe { &*(self.segment.as_ptr() as *const ChannelControl) }
    }

    #[inline]
    fn data_signal(&self) -> &SignalCell {
        // SAFETY: Offset 64 is within the header region and 64-byte
        // aligned; the cell holds only an atomic plus padding.
        unsafe { &*(self.segment.as_ptr().add(64) as *const SignalCell) }
    }

    #[inline]
    fn space_signal(&self) -> &SignalCell {
        // SAFETY: Offset 128 is within the header region and 64-byte
        // aligned; the cell holds only an atomic plus padding.
        unsafe { &*(self.segment.as_ptr().add(128) as *const SignalCell) }
    }

    #[inline]
    fn ring_ptr(&self) -> *mut u8 {
        // SAFETY: The segment was sized CHANNEL_HEADER_SIZE + capacity,
        // so this offset is in bounds.
        unsafe { self.segment.as_ptr().add(CHANNEL_HEADER_SIZE) }
    }

    /// Copy `src` into the ring at logical position `pos`, splitting
    /// the copy at the physical wrap point if needed.
    ///
    /// Caller guarantees `src.len()` bytes of free space past `pos`.
    fn write_at(&self, pos: u64, src: &[u8]) {
        let offset = (pos % self.capacity as u64) as usize;
        let first = src.len().min(self.capacity - offset);
        // SAFETY: offset + first <= capacity and the remainder lands at
        // the ring start; both target ranges are inside the mapping.
        // The sender is the only writer of this span until write_pos is
        // published past it.
        unsafe {
            std::ptr::copy_nonoverlapping(src.as_ptr(), self.ring_ptr().add(offset), first);
            if first < src.len() {
                std::ptr::copy_nonoverlapping(
                    src.as_ptr().add(first),
                    self.ring_ptr(),
                    src.len() - first,
                );
            }
        }
    }

    /// Copy `dst.len()` bytes out of the ring at logical position
    /// `pos`, splitting at the wrap point if needed.
    ///
    /// Caller guarantees the span is occupied (covered by write_pos).
    fn read_at(&self, pos: u64, dst: &mut [u8]) {
        let offset = (pos % self.capacity as u64) as usize;
        let first = dst.len().min(self.capacity - offset);
        // SAFETY: Both source ranges are inside the mapping; the
        // Acquire load of write_pos that covered this span ordered the
        // sender's copies before this read.
        unsafe {
            std::ptr::copy_nonoverlapping(self.ring_ptr().add(offset), dst.as_mut_ptr(), first);
            if first < dst.len() {
                std::ptr::copy_nonoverlapping(
                    self.ring_ptr(),
                    dst.as_mut_ptr().add(first),
                    dst.len() - first,
                );
            }
        }
    }
}

/// Sending endpoint of a frame channel.
#[derive(Debug)]
pub struct FrameSender {
    map: ChannelMap,
}

impl FrameSender {
    /// Create the channel segment and take the sending side. `capacity`
    /// must be a power of two.
    pub fn create(name: &str, capacity: usize) -> Result<Self> {
        Ok(Self {
            map: ChannelMap::create(name, capacity)?,
        })
    }

    /// Attach to an existing channel as its sender.
    pub fn attach(name: &str) -> Result<Self> {
        Ok(Self {
            map: ChannelMap::attach(name)?,
        })
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.map.capacity
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.map.segment.name()
    }

    /// Attempt to enqueue one frame without blocking. Returns false
    /// when the ring lacks space.
    pub fn try_send(&mut self, frame: &Frame) -> Result<bool> {
        let need = frame.wire_size();
        if need > self.map.capacity {
            return Err(ChannelError::FrameTooLarge {
                frame: need,
                capacity: self.map.capacity,
            });
        }

        let control = self.map.control();
        let write = control.write_pos.load(Ordering::Relaxed);
        let read = control.read_pos.load(Ordering::Acquire);
        let used = (write - read) as usize;
        if self.map.capacity - used < need {
            return Ok(false);
        }

        let mut header = [0u8; FRAME_HEADER_SIZE];
        FrameHeader {
            type_hash: frame.type_hash,
            payload_len: frame.payload.len() as u32,
        }
        .encode(&mut header)
        .map_err(|e| ChannelError::Corruption(e.to_string()))?;

        self.map.write_at(write, &header);
        self.map
            .write_at(write + FRAME_HEADER_SIZE as u64, &frame.payload);

        // Publish the bytes, then wake the receiver.
        control
            .write_pos
            .store(write + need as u64, Ordering::Release);
        self.map.data_signal().post();
        Ok(true)
    }

    /// Enqueue one frame, blocking until space frees up or `timeout`
    /// elapses.
    pub fn send(&mut self, frame: &Frame, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.try_send(frame)? {
                return Ok(());
            }
            // Double-check against lost wakes: snapshot, re-poll, wait.
            let snapshot = self.map.space_signal().snapshot();
            if self.try_send(frame)? {
                return Ok(());
            }
            let Some(remaining) = deadline.checked_duration_since(Instant::now()).filter(|d| !d.is_zero())
            else {
                return Err(ChannelError::Timeout);
            };
            self.map.space_signal().wait(snapshot, Some(remaining));
        }
    }

    /// Serialize and send one typed value.
    pub fn send_value<T: ShmType>(&mut self, value: &T, timeout: Duration) -> Result<()> {
        let frame = Frame::new(T::TYPE_HASH, value.serialize());
        self.send(&frame, timeout)
    }

    /// Send the shutdown sentinel.
    pub fn send_shutdown(&mut self, timeout: Duration) -> Result<()> {
        self.send(&Frame::shutdown(), timeout)
    }

    /// Unlink the channel's segment name. Existing mappings stay valid.
    pub fn unlink(&self) -> Result<()> {
        ShmSegment::unlink(self.map.segment.name())
    }
}

/// Receiving endpoint of a frame channel.
#[derive(Debug)]
pub struct FrameReader {
    map: ChannelMap,
}

impl FrameReader {
    /// Create the channel segment and take the receiving side.
    /// `capacity` must be a power of two.
    pub fn create(name: &str, capacity: usize) -> Result<Self> {
        Ok(Self {
            map: ChannelMap::create(name, capacity)?,
        })
    }

    /// Attach to an existing channel as its receiver.
    pub fn attach(name: &str) -> Result<Self> {
        Ok(Self {
            map: ChannelMap::attach(name)?,
        })
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.map.capacity
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.map.segment.name()
    }

    /// Dequeue one frame without blocking. Returns `None` when the ring
    /// holds no complete frame.
    pub fn try_receive(&mut self) -> Result<Option<Frame>> {
        let control = self.map.control();
        let read = control.read_pos.load(Ordering::Relaxed);
        let write = control.write_pos.load(Ordering::Acquire);
        let used = (write - read) as usize;
        if used < FRAME_HEADER_SIZE {
            return Ok(None);
        }

        let mut header_bytes = [0u8; FRAME_HEADER_SIZE];
        self.map.read_at(read, &mut header_bytes);
        let header = FrameHeader::decode(&header_bytes)
            .map_err(|e| ChannelError::Corruption(e.to_string()))?;

        let payload_len = header.payload_len as usize;
        if FRAME_HEADER_SIZE + payload_len > self.map.capacity {
            return Err(ChannelError::Corruption(format!(
                "Frame length {payload_len} exceeds ring capacity {}",
                self.map.capacity
            )));
        }
        if used < FRAME_HEADER_SIZE + payload_len {
            // Sender publishes write_pos only after the whole frame is
            // copied, so a partial frame here means corruption.
            return Err(ChannelError::Corruption(format!(
                "Truncated frame: {used} of {} bytes present",
                FRAME_HEADER_SIZE + payload_len
            )));
        }

        let mut payload = vec![0u8; payload_len];
        self.map
            .read_at(read + FRAME_HEADER_SIZE as u64, &mut payload);

        // Release the bytes, then wake the sender.
        control.read_pos.store(
            read + (FRAME_HEADER_SIZE + payload_len) as u64,
            Ordering::Release,
        );
        self.map.space_signal().post();

        Ok(Some(Frame::new(header.type_hash, payload)))
    }

    /// Dequeue one frame, blocking until one arrives or `timeout`
    /// elapses.
    pub fn receive(&mut self, timeout: Duration) -> Result<Frame> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(frame) = self.try_receive()? {
                return Ok(frame);
            }
            // Double-check against lost wakes: snapshot, re-poll, wait.
            let snapshot = self.map.data_signal().snapshot();
            if let Some(frame) = self.try_receive()? {
                return Ok(frame);
            }
            let Some(remaining) = deadline.checked_duration_since(Instant::now()).filter(|d| !d.is_zero())
            else {
                return Err(ChannelError::Timeout);
            };
            self.map.data_signal().wait(snapshot, Some(remaining));
        }
    }

    /// Unlink the channel's segment name.
    pub fn unlink(&self) -> Result<()> {
        ShmSegment::unlink(self.map.segment.name())
    }
}
