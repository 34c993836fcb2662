// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! The receive-dispatch agent loop.
//!
//! An [`Agent`] owns a channel's receiving side and a dispatch table
//! and pumps frames until the shutdown sentinel arrives or the cancel
//! flag is raised. Dispatch failures are counted and logged, never
//! fatal: one corrupt or unknown frame must not take the loop down.

use super::{DispatchError, DispatchTable};
use crate::channel::{self, ChannelError, FrameReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Counters accumulated over one agent run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AgentStats {
    /// Frames verified and handled.
    pub dispatched: u64,
    /// Frames whose hash matched no registered type.
    pub unknown_type: u64,
    /// Frames that failed verification.
    pub corrupt: u64,
    /// Frames whose handler returned an error.
    pub handler_errors: u64,
}

/// Frame pump: receive, dispatch, repeat.
pub struct Agent {
    table: DispatchTable,
    reader: FrameReader,
    cancel: Arc<AtomicBool>,
    poll_interval: Duration,
    stats: AgentStats,
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("reader", &self.reader)
            .field("poll_interval", &self.poll_interval)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Agent {
    /// Default bound on one blocking receive; also the cancel-check
    /// latency.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

    #[must_use]
    pub fn new(table: DispatchTable, reader: FrameReader) -> Self {
        Self {
            table,
            reader,
            cancel: Arc::new(AtomicBool::new(false)),
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            stats: AgentStats::default(),
        }
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Handle another thread can use to stop the loop.
    #[must_use]
    pub fn cancel_token(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    #[must_use]
    pub fn stats(&self) -> AgentStats {
        self.stats
    }

    #[must_use]
    pub fn table_mut(&mut self) -> &mut DispatchTable {
        &mut self.table
    }

    /// Run until the shutdown sentinel arrives or the cancel flag is
    /// raised. Returns the accumulated counters.
    pub fn run(&mut self) -> channel::Result<AgentStats> {
        log::info!("[AGENT] Loop started on {}", self.reader.name());
        loop {
            if self.cancel.load(Ordering::Acquire) {
                log::info!("[AGENT] Cancelled");
                break;
            }

            let frame = match self.reader.receive(self.poll_interval) {
                Ok(frame) => frame,
                // Timeout is just the cancel-check heartbeat.
                Err(ChannelError::Timeout) => continue,
                Err(e) => {
                    log::error!("[AGENT] Receive failed: {e}");
                    return Err(e);
                }
            };

            if frame.is_shutdown() {
                log::info!("[AGENT] Shutdown frame received");
                break;
            }

            match self.table.dispatch(&frame) {
                Ok(()) => self.stats.dispatched += 1,
                Err(DispatchError::UnknownType(hash)) => {
                    self.stats.unknown_type += 1;
                    log::warn!("[AGENT] Unknown type hash {hash:#018x}, frame dropped");
                }
                Err(DispatchError::CorruptFrame(e)) => {
                    self.stats.corrupt += 1;
                    log::warn!("[AGENT] Corrupt frame for {:#018x}: {e}", frame.type_hash);
                }
                Err(e) => {
                    self.stats.handler_errors += 1;
                    log::warn!("[AGENT] Handler error for {:#018x}: {e}", frame.type_hash);
                }
            }
        }
        Ok(self.stats)
    }
}
