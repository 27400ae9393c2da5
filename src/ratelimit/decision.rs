//! Admission decision record.

use std::time::{Duration, Instant};

/// The verdict for a single checked request, with quota metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Configured maximum admissions per window
    pub limit: u64,
    /// Quota left in the current window (0 when denied)
    pub remaining: u64,
    /// When the current window ends and the count next resets
    pub reset_at: Instant,
}

impl Decision {
    /// How long until the current window resets, measured from `now`.
    ///
    /// Returns zero once `now` has passed [`reset_at`](Self::reset_at).
    pub fn retry_after(&self, now: Instant) -> Duration {
        self.reset_at.saturating_duration_since(now)
    }

    /// Conventional `X-RateLimit-*` header values for an HTTP-facing caller.
    ///
    /// `X-RateLimit-Reset` is expressed as whole seconds until the window
    /// resets. A caller denying a request would typically pair these with
    /// a 429 status.
    pub fn header_values(&self, now: Instant) -> [(&'static str, String); 3] {
        [
            ("X-RateLimit-Limit", self.limit.to_string()),
            ("X-RateLimit-Remaining", self.remaining.to_string()),
            (
                "X-RateLimit-Reset",
                self.retry_after(now).as_secs().to_string(),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_after_counts_down() {
        let base = Instant::now();
        let decision = Decision {
            allowed: false,
            limit: 10,
            remaining: 0,
            reset_at: base + Duration::from_secs(30),
        };

        assert_eq!(decision.retry_after(base), Duration::from_secs(30));
        assert_eq!(
            decision.retry_after(base + Duration::from_secs(10)),
            Duration::from_secs(20)
        );
    }

    #[test]
    fn test_retry_after_saturates_at_zero() {
        let base = Instant::now();
        let decision = Decision {
            allowed: true,
            limit: 10,
            remaining: 9,
            reset_at: base,
        };

        assert_eq!(
            decision.retry_after(base + Duration::from_secs(1)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_header_values() {
        let base = Instant::now();
        let decision = Decision {
            allowed: false,
            limit: 10,
            remaining: 0,
            reset_at: base + Duration::from_secs(42),
        };

        let headers = decision.header_values(base);

        assert_eq!(headers[0], ("X-RateLimit-Limit", "10".to_string()));
        assert_eq!(headers[1], ("X-RateLimit-Remaining", "0".to_string()));
        assert_eq!(headers[2], ("X-RateLimit-Reset", "42".to_string()));
    }
}
