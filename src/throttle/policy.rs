use chrono::{DateTime, Utc};

use super::record::AttemptRecord;
use crate::config::ThrottleConfig;

/// Outcome of a throttle check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// The attempt may proceed.
    Allowed,
    /// The device is locked out. `remaining_minutes` is rounded up, so a
    /// single leftover millisecond still reads as one minute.
    Denied { remaining_minutes: i64 },
}

impl ThrottleDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn remaining_minutes(&self) -> Option<i64> {
        match self {
            Self::Denied { remaining_minutes } => Some(*remaining_minutes),
            Self::Allowed => None,
        }
    }
}

/// Pure lockout decision logic.
///
/// Two effective states: Open (`count < max_attempts`) and Locked. The
/// Locked → Open transition is lazy — it happens on the next [`evaluate`]
/// after the lockout window has passed, not via a background timer — or
/// through [`record_success`].
///
/// [`evaluate`]: ThrottlePolicy::evaluate
/// [`record_success`]: ThrottlePolicy::record_success
#[derive(Debug, Clone)]
pub struct ThrottlePolicy {
    max_attempts: u32,
    lockout_duration: chrono::Duration,
}

impl ThrottlePolicy {
    pub fn new(config: &ThrottleConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            lockout_duration: config.lockout_duration,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Decides whether a login attempt may proceed.
    ///
    /// When the lockout window has expired the record is reset in place;
    /// the caller is responsible for persisting that reset.
    pub fn evaluate(&self, record: &mut AttemptRecord, now: DateTime<Utc>) -> ThrottleDecision {
        if record.count < self.max_attempts {
            return ThrottleDecision::Allowed;
        }

        match record.last_attempt_at {
            // locked count without a timestamp cannot express a window;
            // treat it as expired
            None => {
                record.reset();
                ThrottleDecision::Allowed
            }
            Some(last) if now - last >= self.lockout_duration => {
                record.reset();
                ThrottleDecision::Allowed
            }
            Some(last) => {
                let remaining = self.lockout_duration - (now - last);
                ThrottleDecision::Denied {
                    remaining_minutes: ceil_minutes(remaining.num_milliseconds()),
                }
            }
        }
    }

    /// Records one failed attempt. There is no cap: `evaluate` already
    /// treats anything at or above the threshold as locked.
    pub fn record_failure(&self, record: &mut AttemptRecord, now: DateTime<Utc>) {
        record.count += 1;
        record.last_attempt_at = Some(now);
    }

    /// A successful login always clears the record, whatever its prior
    /// state.
    pub fn record_success(&self, record: &mut AttemptRecord) {
        record.reset();
    }
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        Self::new(&ThrottleConfig::default())
    }
}

fn ceil_minutes(ms: i64) -> i64 {
    (ms + 59_999) / 60_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn policy() -> ThrottlePolicy {
        ThrottlePolicy::default()
    }

    #[test]
    fn test_below_threshold_always_allowed() {
        let p = policy();
        let now = Utc::now();

        for count in 0..5 {
            // timestamp is irrelevant below the threshold
            for last in [None, Some(now), Some(now - Duration::days(30))] {
                let mut record = AttemptRecord {
                    count,
                    last_attempt_at: last,
                };
                assert_eq!(p.evaluate(&mut record, now), ThrottleDecision::Allowed);
                assert_eq!(record.count, count, "evaluate must not mutate an open record");
            }
        }
    }

    #[test]
    fn test_locked_within_window_denied_with_ceil_minutes() {
        let p = policy();
        let now = Utc::now();

        // full window left: exactly 900_000 ms -> 15 minutes
        let mut record = AttemptRecord {
            count: 5,
            last_attempt_at: Some(now),
        };
        assert_eq!(
            p.evaluate(&mut record, now),
            ThrottleDecision::Denied {
                remaining_minutes: 15
            }
        );

        // one millisecond left still reads as one minute
        let mut record = AttemptRecord {
            count: 5,
            last_attempt_at: Some(now - Duration::minutes(15) + Duration::milliseconds(1)),
        };
        assert_eq!(
            p.evaluate(&mut record, now),
            ThrottleDecision::Denied {
                remaining_minutes: 1
            }
        );
    }

    #[test]
    fn test_expired_window_allows_and_resets() {
        let p = policy();
        let now = Utc::now();

        let mut record = AttemptRecord {
            count: 5,
            last_attempt_at: Some(now - Duration::minutes(16)),
        };
        assert_eq!(p.evaluate(&mut record, now), ThrottleDecision::Allowed);
        assert!(record.is_clear());

        // exact boundary counts as expired
        let mut record = AttemptRecord {
            count: 9,
            last_attempt_at: Some(now - Duration::minutes(15)),
        };
        assert_eq!(p.evaluate(&mut record, now), ThrottleDecision::Allowed);
        assert!(record.is_clear());
    }

    #[test]
    fn test_locked_count_without_timestamp_resets() {
        let p = policy();
        let mut record = AttemptRecord {
            count: 5,
            last_attempt_at: None,
        };
        assert_eq!(p.evaluate(&mut record, Utc::now()), ThrottleDecision::Allowed);
        assert!(record.is_clear());
    }

    #[test]
    fn test_five_failures_lock_the_record() {
        let p = policy();
        let now = Utc::now();
        let mut record = AttemptRecord::new();

        for i in 1..=5 {
            assert!(p.evaluate(&mut record, now).is_allowed());
            p.record_failure(&mut record, now);
            assert_eq!(record.count, i);
        }

        assert!(!p.evaluate(&mut record, now).is_allowed());
    }

    #[test]
    fn test_record_success_clears_any_state() {
        let p = policy();
        let mut record = AttemptRecord {
            count: 42,
            last_attempt_at: Some(Utc::now()),
        };
        p.record_success(&mut record);
        assert!(record.is_clear());

        let mut fresh = AttemptRecord::new();
        p.record_success(&mut fresh);
        assert!(fresh.is_clear());
    }

    #[test]
    fn test_scenario_fifth_failure_then_thirteen_minutes_remaining() {
        let p = policy();
        let t = Utc::now();

        let mut record = AttemptRecord {
            count: 4,
            last_attempt_at: Some(t),
        };

        p.record_failure(&mut record, t + Duration::minutes(1));
        assert_eq!(record.count, 5);
        assert_eq!(record.last_attempt_at, Some(t + Duration::minutes(1)));

        assert_eq!(
            p.evaluate(&mut record, t + Duration::minutes(2)),
            ThrottleDecision::Denied {
                remaining_minutes: 14
            }
        );

        // a minute later, 13 minutes remain
        assert_eq!(
            p.evaluate(&mut record, t + Duration::minutes(3)),
            ThrottleDecision::Denied {
                remaining_minutes: 13
            }
        );
    }

    #[test]
    fn test_scenario_lockout_expires_after_sixteen_minutes() {
        let p = policy();
        let t = Utc::now();

        let mut record = AttemptRecord {
            count: 5,
            last_attempt_at: Some(t),
        };
        assert_eq!(
            p.evaluate(&mut record, t + Duration::minutes(16)),
            ThrottleDecision::Allowed
        );
        assert!(record.is_clear());
    }
}
