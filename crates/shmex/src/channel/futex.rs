// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Raw futex syscalls backing the channel signals.
//!
//! Signal words live in `MAP_SHARED` segments, so these wrappers issue
//! the plain `FUTEX_WAIT`/`FUTEX_WAKE` opcodes. The `_PRIVATE` forms
//! key the wait queue on the per-process mapping and never wake a
//! waiter in another process.

use std::ptr;
use std::sync::atomic::AtomicU32;
use std::time::Duration;

// Plain opcodes; 128/129 are the process-local _PRIVATE forms.
const FUTEX_WAIT: i32 = 0;
const FUTEX_WAKE: i32 = 1;

/// Block while `*addr == expected`, up to `timeout`.
///
/// Returns `0` on a wake (possibly spurious), `-1` with `EAGAIN` when
/// the word already differs, `-1` with `ETIMEDOUT` when the wait
/// expires. Cross-process waits require `addr` to live in a MAP_SHARED
/// mapping.
#[cfg(target_os = "linux")]
pub fn futex_wait(addr: &AtomicU32, expected: u32, timeout: Option<Duration>) -> i32 {
    let ts = timeout.map(|d| libc::timespec {
        tv_sec: d.as_secs() as libc::time_t,
        tv_nsec: d.subsec_nanos() as libc::c_long,
    });

    let ts_ptr = ts
        .as_ref()
        .map_or(ptr::null(), |t| t as *const libc::timespec);

    // SAFETY: The reference pins the word for the duration of the
    // syscall; uaddr2 and val3 are ignored by FUTEX_WAIT.
    unsafe {
        libc::syscall(
            libc::SYS_futex,
            addr as *const AtomicU32 as *const u32,
            FUTEX_WAIT,
            expected,
            ts_ptr,
            ptr::null::<u32>(),
            0i32,
        ) as i32
    }
}

/// Wake at most `count` waiters blocked on the word. Returns the number
/// woken, or -1 on error.
#[cfg(target_os = "linux")]
pub fn futex_wake(addr: &AtomicU32, count: i32) -> i32 {
    // SAFETY: The reference pins the word; FUTEX_WAKE reads no pointer
    // arguments.
    unsafe {
        libc::syscall(
            libc::SYS_futex,
            addr as *const AtomicU32 as *const u32,
            FUTEX_WAKE,
            count,
            ptr::null::<libc::timespec>(),
            ptr::null::<u32>(),
            0i32,
        ) as i32
    }
}

/// Wake every waiter.
#[cfg(target_os = "linux")]
#[inline]
pub fn futex_wake_all(addr: &AtomicU32) -> i32 {
    futex_wake(addr, i32::MAX)
}

// Non-Linux fallback: short sleeps instead of kernel waits. Correctness
// comes from the callers' re-poll loops; only latency suffers.
#[cfg(not(target_os = "linux"))]
pub fn futex_wait(_addr: &AtomicU32, _expected: u32, timeout: Option<Duration>) -> i32 {
    let nap = timeout.unwrap_or(Duration::from_millis(1));
    std::thread::sleep(nap.min(Duration::from_millis(10)));
    0
}

#[cfg(not(target_os = "linux"))]
pub fn futex_wake(_addr: &AtomicU32, _count: i32) -> i32 {
    0
}

#[cfg(not(target_os = "linux"))]
#[inline]
pub fn futex_wake_all(_addr: &AtomicU32) -> i32 {
    0
}
