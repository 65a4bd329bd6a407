use std::sync::Arc;

use super::policy::{ThrottleDecision, ThrottlePolicy};
use super::record::AttemptRecord;
use super::store::AttemptStore;
use crate::clock::{Clock, SystemClock};
use crate::config::ThrottleConfig;
use crate::PassengerError;

/// Store-backed login throttle.
///
/// Combines the pure [`ThrottlePolicy`] with an [`AttemptStore`] and a
/// [`Clock`]. This is what the login action consults before touching the
/// network.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use curbside::config::ThrottleConfig;
/// use curbside::throttle::{InMemoryAttemptStore, LoginThrottle};
///
/// let store = Arc::new(InMemoryAttemptStore::new());
/// let throttle = LoginThrottle::new(store, ThrottleConfig::default());
/// ```
#[derive(Clone)]
pub struct LoginThrottle {
    store: Arc<dyn AttemptStore>,
    policy: ThrottlePolicy,
    clock: Arc<dyn Clock>,
}

impl LoginThrottle {
    #[must_use]
    pub fn new(store: Arc<dyn AttemptStore>, config: ThrottleConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(
        store: Arc<dyn AttemptStore>,
        config: ThrottleConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            policy: ThrottlePolicy::new(&config),
            clock,
        }
    }

    /// Evaluates the current record without recording an attempt.
    ///
    /// A lockout that has expired is reset here and the reset is persisted,
    /// so the next check starts from a clear record.
    pub async fn check(&self) -> Result<ThrottleDecision, PassengerError> {
        let mut record = self.store.load().await?;
        let was_locked = record.count >= self.policy.max_attempts();

        let decision = self.policy.evaluate(&mut record, self.clock.now());

        if was_locked && decision.is_allowed() {
            self.store.save(&record).await?;
        }

        Ok(decision)
    }

    /// Records one failed attempt and returns the updated record.
    pub async fn record_failure(&self) -> Result<AttemptRecord, PassengerError> {
        let mut record = self.store.load().await?;
        self.policy.record_failure(&mut record, self.clock.now());
        self.store.save(&record).await?;
        Ok(record)
    }

    /// Clears the record after a successful login.
    pub async fn record_success(&self) -> Result<(), PassengerError> {
        let mut record = self.store.load().await?;
        self.policy.record_success(&mut record);
        self.store.save(&record).await
    }

    /// Attempts left before lockout, for "N attempts remaining" hints.
    pub async fn remaining_attempts(&self) -> Result<u32, PassengerError> {
        let record = self.store.load().await?;
        Ok(self.policy.max_attempts().saturating_sub(record.count))
    }

    /// Removes any stored record entirely.
    pub async fn clear(&self) -> Result<(), PassengerError> {
        self.store.clear().await
    }
}

impl std::fmt::Debug for LoginThrottle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginThrottle")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::throttle::InMemoryAttemptStore;
    use chrono::{Duration, Utc};

    fn throttle_at(start: chrono::DateTime<Utc>) -> (Arc<ManualClock>, LoginThrottle) {
        let clock = Arc::new(ManualClock::new(start));
        let throttle = LoginThrottle::with_clock(
            Arc::new(InMemoryAttemptStore::new()),
            ThrottleConfig::default(),
            clock.clone(),
        );
        (clock, throttle)
    }

    #[tokio::test]
    async fn test_open_then_locked_after_five_failures() {
        let (_clock, throttle) = throttle_at(Utc::now());

        for _ in 0..5 {
            assert!(throttle.check().await.unwrap().is_allowed());
            throttle.record_failure().await.unwrap();
        }

        let decision = throttle.check().await.unwrap();
        assert_eq!(decision.remaining_minutes(), Some(15));
        assert_eq!(throttle.remaining_attempts().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_lockout_expires_lazily_and_persists_reset() {
        let (clock, throttle) = throttle_at(Utc::now());

        for _ in 0..5 {
            throttle.record_failure().await.unwrap();
        }
        assert!(!throttle.check().await.unwrap().is_allowed());

        clock.advance(Duration::minutes(16));
        assert!(throttle.check().await.unwrap().is_allowed());

        // the reset was written back, not just observed
        assert_eq!(throttle.remaining_attempts().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_success_resets_counter() {
        let (_clock, throttle) = throttle_at(Utc::now());

        throttle.record_failure().await.unwrap();
        throttle.record_failure().await.unwrap();
        assert_eq!(throttle.remaining_attempts().await.unwrap(), 3);

        throttle.record_success().await.unwrap();
        assert_eq!(throttle.remaining_attempts().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_remaining_minutes_shrink_with_time() {
        let (clock, throttle) = throttle_at(Utc::now());

        for _ in 0..5 {
            throttle.record_failure().await.unwrap();
        }

        clock.advance(Duration::minutes(2));
        assert_eq!(
            throttle.check().await.unwrap().remaining_minutes(),
            Some(13)
        );
    }
}
