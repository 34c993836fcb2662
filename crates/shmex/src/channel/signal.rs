// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Futex-backed event counters.
//!
//! A [`SignalCell`] is a monotonically increasing counter in shared
//! memory. Each channel carries two: the sender posts the data signal
//! after appending bytes, the receiver posts the space signal after
//! consuming them. Counting events instead of toggling a flag means a
//! post is never lost even if the peer was not yet waiting.

use super::futex::{futex_wait, futex_wake_all};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Event counter cell (cache-line aligned to prevent false sharing with
/// the neighbouring control block and ring bytes).
#[repr(C, align(64))]
pub struct SignalCell {
    /// Event counter (incremented on each post)
    val: AtomicU32,
    /// Padding to fill cache line
    _pad: [u8; 60],
}

impl SignalCell {
    /// Create a new zeroed cell
    #[must_use]
    pub const fn new() -> Self {
        Self {
            val: AtomicU32::new(0),
            _pad: [0u8; 60],
        }
    }

    /// Increment the counter and wake all waiters.
    #[inline]
    pub fn post(&self) {
        self.val.fetch_add(1, Ordering::Release);
        futex_wake_all(&self.val);
    }

    /// Current counter value (for snapshot before wait).
    #[inline]
    pub fn snapshot(&self) -> u32 {
        self.val.load(Ordering::Acquire)
    }

    /// Block until the counter moves past `snapshot` or the timeout
    /// expires.
    ///
    /// Callers use the double-check pattern to avoid lost wakes:
    /// 1. Poll the condition
    /// 2. Snapshot the counter
    /// 3. Re-poll the condition (catches the race)
    /// 4. If still unmet, wait on the futex
    #[inline]
    pub fn wait(&self, snapshot: u32, timeout: Option<Duration>) -> i32 {
        futex_wait(&self.val, snapshot, timeout)
    }
}

impl Default for SignalCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_is_one_cache_line() {
        assert_eq!(std::mem::align_of::<SignalCell>(), 64);
        assert_eq!(std::mem::size_of::<SignalCell>(), 64);
    }

    #[test]
    fn post_increments_snapshot() {
        let cell = SignalCell::new();
        assert_eq!(cell.snapshot(), 0);
        cell.post();
        cell.post();
        assert_eq!(cell.snapshot(), 2);
    }

    #[test]
    fn stale_snapshot_returns_immediately() {
        let cell = SignalCell::new();
        cell.post();
        // Counter is already 1; waiting with the old snapshot 0 must
        // not block.
        let start = std::time::Instant::now();
        let _ = cell.wait(0, Some(Duration::from_secs(1)));
        assert!(start.elapsed() < Duration::from_millis(500));
    }
}
