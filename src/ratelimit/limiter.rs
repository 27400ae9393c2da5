//! Core rate limiter implementation.

use std::time::Instant;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::config::LimiterSettings;
use crate::error::{FloodgateError, Result};

use super::decision::Decision;
use super::window::Window;

/// Fixed-window admission controller keyed by opaque identifier.
///
/// This struct is thread-safe and can be shared across multiple tasks.
/// The check-then-increment sequence for a single identifier runs under
/// that key's registry entry guard, so concurrent checks for the same
/// identifier never admit past the limit. No ordering is guaranteed
/// across different identifiers.
///
/// Fixed-window counting resets on the first check after expiry rather
/// than on a timer, so up to twice the limit can be admitted in a short
/// period spanning two windows. Callers needing a stricter guarantee
/// want a different algorithm, not a tighter configuration.
pub struct RateLimiter {
    settings: LimiterSettings,
    /// Window records indexed by identifier
    registry: DashMap<String, Window>,
    /// When the last eviction sweep ran
    last_sweep: Mutex<Instant>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given settings.
    ///
    /// Fails with [`FloodgateError::Config`] if the settings do not
    /// validate.
    pub fn new(settings: LimiterSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::from_settings(settings))
    }

    fn from_settings(settings: LimiterSettings) -> Self {
        Self {
            settings,
            registry: DashMap::new(),
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    /// The settings this limiter was constructed with.
    pub fn settings(&self) -> &LimiterSettings {
        &self.settings
    }

    /// Check whether a request from `identifier` may proceed right now.
    pub fn check(&self, identifier: &str) -> Result<Decision> {
        self.check_at(identifier, Instant::now())
    }

    /// Check whether a request from `identifier` may proceed at `now`.
    ///
    /// On admission the identifier's count is incremented; a denied check
    /// leaves the record untouched, so repeated denials within a window
    /// report the same `remaining` and `reset_at`. A `now` earlier than
    /// the stored window start is treated as zero elapsed time.
    pub fn check_at(&self, identifier: &str, now: Instant) -> Result<Decision> {
        if identifier.is_empty() {
            return Err(FloodgateError::InvalidIdentifier);
        }

        let limit = self.settings.max_requests_per_window;
        let window = self.settings.window();

        let decision = {
            let mut record = self
                .registry
                .entry(identifier.to_owned())
                .or_insert_with(|| {
                    debug!(identifier = %identifier, "Tracking new identifier");
                    Window::new(now)
                });

            if record.is_expired(window, now) {
                debug!(identifier = %identifier, "Window expired, resetting count");
                record.reset(now);
            }

            trace!(
                identifier = %identifier,
                count = record.count(),
                "Checking admission"
            );

            if record.count() >= limit {
                debug!(
                    identifier = %identifier,
                    limit = limit,
                    "Rate limit exceeded"
                );
                Decision {
                    allowed: false,
                    limit,
                    remaining: 0,
                    reset_at: record.reset_at(window),
                }
            } else {
                record.record_admission();
                Decision {
                    allowed: true,
                    limit,
                    remaining: limit - record.count(),
                    reset_at: record.reset_at(window),
                }
            }
        };

        // Entry guard is dropped before sweeping, which locks whole shards.
        self.maybe_sweep(now);

        Ok(decision)
    }

    /// Remove records whose window ended before `now`.
    ///
    /// An expired record would reset on its next check anyway, so dropping
    /// it never changes an admission decision. Hosts may call this from
    /// their own timer; `check_at` also triggers it at most once per
    /// configured sweep interval.
    pub fn sweep_at(&self, now: Instant) {
        let window = self.settings.window();
        let before = self.registry.len();
        self.registry
            .retain(|_, record| !record.is_expired(window, now));

        // Concurrent inserts during the retain can push len above `before`
        let evicted = before.saturating_sub(self.registry.len());
        if evicted > 0 {
            debug!(evicted = evicted, "Swept stale identifiers");
        }
    }

    fn maybe_sweep(&self, now: Instant) {
        // try_lock: a single sweeper at a time, everyone else moves on
        let Some(mut last) = self.last_sweep.try_lock() else {
            return;
        };
        if now.saturating_duration_since(*last) < self.settings.sweep_interval() {
            return;
        }
        *last = now;
        self.sweep_at(now);
    }

    /// Get the current count for an identifier.
    ///
    /// Returns `None` if the identifier is not tracked.
    pub fn count_for(&self, identifier: &str) -> Option<u64> {
        self.registry.get(identifier).map(|record| record.count())
    }

    /// Get the number of tracked identifiers.
    pub fn tracked(&self) -> usize {
        self.registry.len()
    }

    /// Clear all window records.
    ///
    /// This is primarily useful for testing.
    pub fn clear(&self) {
        self.registry.clear();
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::from_settings(LimiterSettings::default())
    }
}
