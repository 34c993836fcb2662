// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! POSIX shared memory segment management.
//!
//! Safe wrappers around `shm_open`, `ftruncate`, and `mmap`. The host
//! process creates each segment; component processes open existing ones.
//! Creation is exclusive: finding a leftover segment from a crashed run
//! is reported as [`ChannelError::AlreadyExists`] rather than silently
//! replaced, and `cleanup_instance_segments` is the explicit recovery
//! path.
//!
//! Segment names must start with `/` and contain no other `/`, e.g.
//! `/shmex_bench0_control`.

use super::{ChannelError, Result};
use std::ffi::CString;
use std::io;
use std::ptr;

/// Prefix shared by every segment this crate creates (without the
/// leading `/`); cleanup scans key off it.
pub const SEGMENT_PREFIX: &str = "shmex_";

/// POSIX shared memory segment wrapper.
///
/// Automatically unmaps the region on drop. Does NOT automatically
/// unlink the name (creator's responsibility).
#[derive(Debug)]
pub struct ShmSegment {
    /// Pointer to mapped memory region
    ptr: *mut u8,
    /// Size of the mapping
    size: usize,
    /// Segment name (for unlink)
    name: String,
}

// SAFETY: The mapped region is shared memory accessed from multiple
// threads and processes; all cross-process state inside it is managed
// through atomic operations by the structures layered on top.
unsafe impl Send for ShmSegment {}
unsafe impl Sync for ShmSegment {}

impl ShmSegment {
    /// Create a new shared memory segment, zero-initialized.
    ///
    /// Fails with [`ChannelError::AlreadyExists`] if the name is taken.
    pub fn create(name: &str, size: usize) -> Result<Self> {
        Self::validate_name(name)?;

        let c_name = CString::new(name).map_err(|_| ChannelError::InvalidName(name.to_string()))?;

        // SAFETY:
        // - c_name is a valid null-terminated CString created above
        // - O_CREAT|O_RDWR|O_EXCL creates a new segment or fails with
        //   EEXIST if the name is taken; no unlink-first race
        // - Mode 0o600 restricts the segment to the owning user
        // - shm_open returns a valid fd on success or -1 (checked below)
        let fd = unsafe {
            libc::shm_open(
                c_name.as_ptr(),
                libc::O_CREAT | libc::O_RDWR | libc::O_EXCL,
                0o600,
            )
        };

        if fd < 0 {
            let err = io::Error::last_os_error();
            if err.raw_os_error() == Some(libc::EEXIST) {
                return Err(ChannelError::AlreadyExists(name.to_string()));
            }
            return Err(ChannelError::SegmentCreate(err));
        }

        // Set segment size
        // SAFETY:
        // - fd is a valid descriptor from the successful shm_open above
        // - ftruncate fails gracefully if size exceeds system limits
        let ret = unsafe { libc::ftruncate(fd, size as libc::off_t) };
        if ret < 0 {
            let err = io::Error::last_os_error();
            // SAFETY: fd is still valid and closed exactly once on this
            // error path.
            unsafe { libc::close(fd) };
            return Err(ChannelError::SegmentCreate(err));
        }

        // Map the segment
        // SAFETY:
        // - Null address lets the kernel choose the mapping address
        // - PROT_READ|PROT_WRITE with MAP_SHARED gives both processes a
        //   coherent read-write view
        // - fd is valid from shm_open and sized by ftruncate above
        // - mmap returns MAP_FAILED on error (checked below)
        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                size,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                fd,
                0,
            )
        };

        // Close fd (mapping keeps reference)
        // SAFETY: fd is valid; after mmap the mapping holds its own
        // reference to the object, so closing is safe either way.
        unsafe { libc::close(fd) };

        if ptr == libc::MAP_FAILED {
            return Err(ChannelError::Mmap(io::Error::last_os_error()));
        }

        // Zero-initialize the segment
        // SAFETY:
        // - ptr points to exactly `size` writable bytes from the
        //   successful mmap above
        // - No other process has opened the segment yet (O_EXCL create)
        unsafe {
            ptr::write_bytes(ptr as *mut u8, 0, size);
        }

        Ok(Self {
            ptr: ptr as *mut u8,
            size,
            name: name.to_string(),
        })
    }

    /// Open an existing shared memory segment.
    pub fn open(name: &str, size: usize) -> Result<Self> {
        Self::validate_name(name)?;

        let c_name = CString::new(name).map_err(|_| ChannelError::InvalidName(name.to_string()))?;

        // SAFETY:
        // - c_name is a valid null-terminated CString created above
        // - O_RDWR opens the existing object; mode is ignored without
        //   O_CREAT
        // - shm_open returns a valid fd on success or -1 (checked below)
        let fd = unsafe { libc::shm_open(c_name.as_ptr(), libc::O_RDWR, 0) };

        if fd < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::NotFound {
                return Err(ChannelError::NotFound(name.to_string()));
            }
            return Err(ChannelError::SegmentOpen(err));
        }

        // Map the segment
        // SAFETY:
        // - Null address lets the kernel choose the mapping address
        // - size is the expected segment size; the creator sized the
        //   object with ftruncate
        // - MAP_SHARED aliases the creator's mapping
        // - fd is valid from the successful shm_open above
        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                size,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                fd,
                0,
            )
        };

        // Close fd (mapping keeps reference)
        // SAFETY: fd is valid; the mapping holds its own reference.
        unsafe { libc::close(fd) };

        if ptr == libc::MAP_FAILED {
            return Err(ChannelError::Mmap(io::Error::last_os_error()));
        }

        Ok(Self {
            ptr: ptr as *mut u8,
            size,
            name: name.to_string(),
        })
    }

    /// Validate segment name follows POSIX rules
    fn validate_name(name: &str) -> Result<()> {
        if !name.starts_with('/') {
            return Err(ChannelError::InvalidName(format!(
                "Segment name must start with '/': {name}"
            )));
        }
        if name.len() > 1 && name[1..].contains('/') {
            return Err(ChannelError::InvalidName(format!(
                "Segment name cannot contain '/' after prefix: {name}"
            )));
        }
        if name.len() > 255 {
            return Err(ChannelError::InvalidName(format!(
                "Segment name too long (max 255): {name}"
            )));
        }
        Ok(())
    }

    /// Unlink (delete) a shared memory segment by name.
    ///
    /// The object disappears once every process unmaps it. Not-found is
    /// treated as success so cleanup stays idempotent.
    pub fn unlink(name: &str) -> Result<()> {
        let c_name = CString::new(name).map_err(|_| ChannelError::InvalidName(name.to_string()))?;

        // SAFETY:
        // - c_name is a valid null-terminated CString created above
        // - shm_unlink only touches the filesystem namespace; existing
        //   mappings stay valid
        let ret = unsafe { libc::shm_unlink(c_name.as_ptr()) };

        if ret < 0 {
            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::NotFound {
                return Err(ChannelError::SegmentOpen(err));
            }
        }

        Ok(())
    }

    /// Get raw pointer to the mapped memory
    #[inline]
    #[must_use]
    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr
    }

    /// Get the size of the mapping
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the segment name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if a segment with the given name exists
    #[must_use]
    pub fn exists(name: &str) -> bool {
        let Ok(c_name) = CString::new(name) else {
            return false;
        };

        // SAFETY:
        // - c_name is a valid null-terminated CString created above
        // - O_RDONLY probes for existence; -1 means not found
        let fd = unsafe { libc::shm_open(c_name.as_ptr(), libc::O_RDONLY, 0) };

        if fd >= 0 {
            // SAFETY: fd is valid (>= 0) and closed exactly once here.
            unsafe { libc::close(fd) };
            true
        } else {
            false
        }
    }
}

impl Drop for ShmSegment {
    fn drop(&mut self) {
        // SAFETY:
        // - self.ptr came from a successful mmap in create() or open()
        //   with exactly self.size bytes
        // - Drop runs once, so the region is unmapped once
        unsafe {
            libc::munmap(self.ptr as *mut libc::c_void, self.size);
        }
        // Note: We do NOT unlink here. The creator is responsible for cleanup.
    }
}

/// Unlink every segment belonging to one exchange instance.
///
/// Called on host shutdown and by the cleanup tool after a crash.
/// Returns the number of segments removed.
pub fn cleanup_instance_segments(instance: &str) -> usize {
    cleanup_matching(&format!("{SEGMENT_PREFIX}{instance}_"))
}

/// Unlink every segment this crate ever created, regardless of
/// instance. Crash-recovery sweep; returns the number removed.
pub fn cleanup_all_segments() -> usize {
    cleanup_matching(SEGMENT_PREFIX)
}

fn cleanup_matching(prefix: &str) -> usize {
    let mut cleaned = 0;

    // On Linux, shm objects appear in /dev/shm
    let shm_dir = std::path::Path::new("/dev/shm");
    if !shm_dir.exists() {
        return 0;
    }

    let Ok(entries) = std::fs::read_dir(shm_dir) else {
        return 0;
    };

    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };

        if name.starts_with(prefix) {
            let segment_name = format!("/{name}");
            if ShmSegment::unlink(&segment_name).is_ok() {
                log::debug!("[SHM] Cleaned up segment: {}", segment_name);
                cleaned += 1;
            }
        }
    }

    cleaned
}
