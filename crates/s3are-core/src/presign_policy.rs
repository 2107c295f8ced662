//! Presigned credential lifetime policy
//!
//! Every credential handed to a client is valid for a bounded window. Callers may
//! request a lifetime in seconds; the policy substitutes a default for missing or
//! non-positive requests and silently clamps anything above the maximum.

use std::time::Duration;

/// Default credential lifetime: 24 hours.
pub const DEFAULT_PRESIGN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Longest lifetime S3 accepts for a SigV4 presigned URL: 7 days.
pub const MAX_PRESIGN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Shortest lifetime ever issued.
pub const MIN_PRESIGN_TTL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresignPolicy {
    default_ttl: Duration,
    max_ttl: Duration,
}

impl PresignPolicy {
    /// Build a policy. The maximum is capped at [`MAX_PRESIGN_TTL`] and both
    /// bounds are raised to at least [`MIN_PRESIGN_TTL`].
    pub fn new(default_ttl: Duration, max_ttl: Duration) -> Self {
        let max_ttl = max_ttl.clamp(MIN_PRESIGN_TTL, MAX_PRESIGN_TTL);
        let default_ttl = default_ttl.clamp(MIN_PRESIGN_TTL, max_ttl);
        Self {
            default_ttl,
            max_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn max_ttl(&self) -> Duration {
        self.max_ttl
    }

    /// Resolve the lifetime for a credential from the caller's request (seconds).
    ///
    /// - `None`, `0` or negative: the default lifetime
    /// - above the maximum: the maximum
    /// - anything else: honored exactly
    pub fn effective_ttl(&self, requested_secs: Option<i64>) -> Duration {
        match requested_secs {
            Some(secs) if secs > 0 => {
                Duration::from_secs(secs as u64).clamp(MIN_PRESIGN_TTL, self.max_ttl)
            }
            _ => self.default_ttl,
        }
    }
}

impl Default for PresignPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PRESIGN_TTL, MAX_PRESIGN_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: u64 = 24 * 60 * 60;

    #[test]
    fn test_missing_or_non_positive_request_uses_default() {
        let policy = PresignPolicy::default();
        assert_eq!(policy.effective_ttl(None), Duration::from_secs(DAY));
        assert_eq!(policy.effective_ttl(Some(0)), Duration::from_secs(DAY));
        assert_eq!(policy.effective_ttl(Some(-30)), Duration::from_secs(DAY));
    }

    #[test]
    fn test_long_request_is_clamped_to_seven_days() {
        let policy = PresignPolicy::default();
        let thirty_days = (30 * DAY) as i64;
        assert_eq!(
            policy.effective_ttl(Some(thirty_days)),
            Duration::from_secs(7 * DAY)
        );
        assert_eq!(
            policy.effective_ttl(Some(i64::MAX)),
            Duration::from_secs(7 * DAY)
        );
    }

    #[test]
    fn test_short_request_is_honored_exactly() {
        let policy = PresignPolicy::default();
        assert_eq!(policy.effective_ttl(Some(10)), Duration::from_secs(10));
        assert_eq!(policy.effective_ttl(Some(1)), MIN_PRESIGN_TTL);
    }

    #[test]
    fn test_configured_bounds_are_normalized() {
        let policy = PresignPolicy::new(Duration::from_secs(30 * DAY), Duration::from_secs(60 * DAY));
        assert_eq!(policy.max_ttl(), MAX_PRESIGN_TTL);
        assert_eq!(policy.default_ttl(), MAX_PRESIGN_TTL);

        let policy = PresignPolicy::new(Duration::ZERO, Duration::from_secs(3600));
        assert_eq!(policy.default_ttl(), MIN_PRESIGN_TTL);
        assert_eq!(policy.effective_ttl(Some(7200)), Duration::from_secs(3600));
    }
}
