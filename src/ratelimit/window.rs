//! Per-identifier window record.

use std::time::{Duration, Instant};

/// Mutable counting state for a single identifier.
///
/// At most one record exists per identifier at a time. The record itself
/// carries no lock; the registry's entry guard serializes access to it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Window {
    /// Requests admitted in the current window
    count: u64,
    /// When the current window began
    window_start: Instant,
}

impl Window {
    /// Create a fresh record whose window starts at `start`.
    pub(crate) fn new(start: Instant) -> Self {
        Self {
            count: 0,
            window_start: start,
        }
    }

    pub(crate) fn count(&self) -> u64 {
        self.count
    }

    /// Whether the window had already ended at `now`.
    ///
    /// A clock that moves backwards reads as zero elapsed time, so the
    /// record is treated as still within its window rather than expired.
    pub(crate) fn is_expired(&self, window: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.window_start) > window
    }

    /// Start a new window at `now` with the count cleared.
    pub(crate) fn reset(&mut self, now: Instant) {
        self.count = 0;
        self.window_start = now;
    }

    /// Count one admitted request.
    pub(crate) fn record_admission(&mut self) {
        self.count += 1;
    }

    /// The absolute time at which the current window ends.
    pub(crate) fn reset_at(&self, window: Duration) -> Instant {
        self.window_start + window
    }
}
