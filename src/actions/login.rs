use chrono::Utc;

use crate::clients::{LookupClient, UserProfile};
use crate::events::{dispatch, PassengerEvent};
use crate::throttle::{LoginThrottle, ThrottleDecision};
use crate::validators::{
    sanitize_input, validate_login_password, validate_username, ValidationError,
};
use crate::{PassengerError, SecretString};

/// Raw login form input, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Validated credentials, ready for [`LoginAction::execute`].
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl LoginForm {
    /// Validates the form and produces [`Credentials`].
    ///
    /// Runs before the flow does, so an invalid form never consumes
    /// attempt budget and never reaches the network.
    pub fn validate(&self) -> Result<Credentials, ValidationError> {
        let username = sanitize_input(self.username.trim());
        validate_username(&username)?;

        let password = SecretString::new(&self.password);
        validate_login_password(&password)?;

        Ok(Credentials { username, password })
    }
}

/// Authenticates a passenger against the remote user store.
///
/// Order of operations is fixed: the throttle is consulted first, and a
/// denied check returns without touching the lookup client. Failed
/// lookups, bad credentials and transport errors all consume one attempt;
/// a success clears the counter.
///
/// # Example
///
/// ```rust,ignore
/// let action = LoginAction::new(lookup, throttle);
/// let credentials = form.validate()?;
/// let profile = action.execute(&credentials).await?;
/// ```
pub struct LoginAction<L: LookupClient> {
    lookup: L,
    throttle: LoginThrottle,
}

impl<L: LookupClient> LoginAction<L> {
    pub fn new(lookup: L, throttle: LoginThrottle) -> Self {
        Self { lookup, throttle }
    }

    pub fn throttle(&self) -> &LoginThrottle {
        &self.throttle
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(name = "login", skip_all, err))]
    pub async fn execute(&self, credentials: &Credentials) -> Result<UserProfile, PassengerError> {
        if let ThrottleDecision::Denied { remaining_minutes } = self.throttle.check().await? {
            log::warn!(
                target: "curbside::auth",
                "msg=\"login locked out\" remaining_minutes={remaining_minutes}"
            );
            dispatch(PassengerEvent::LoginLockedOut {
                remaining_minutes,
                at: Utc::now(),
            })
            .await;

            return Err(PassengerError::RateLimited { remaining_minutes });
        }

        match self.authenticate(credentials).await {
            Ok(profile) => {
                self.throttle.record_success().await?;

                log::info!(
                    target: "curbside::auth",
                    "msg=\"login succeeded\" username={}",
                    profile.username
                );
                dispatch(PassengerEvent::LoginSucceeded {
                    user_id: profile.id.clone(),
                    username: profile.username.clone(),
                    at: Utc::now(),
                })
                .await;

                Ok(profile)
            }
            Err(error) => {
                if error.consumes_attempt() {
                    let record = self.throttle.record_failure().await?;
                    log::warn!(
                        target: "curbside::auth",
                        "msg=\"login failed\" username={} reason=\"{error}\" attempts={}",
                        credentials.username,
                        record.count
                    );
                }
                dispatch(PassengerEvent::LoginFailed {
                    username: credentials.username.clone(),
                    reason: error.to_string(),
                    at: Utc::now(),
                })
                .await;

                Err(error)
            }
        }
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<UserProfile, PassengerError> {
        let record = self
            .lookup
            .find_by_username(&credentials.username)
            .await?
            .ok_or(PassengerError::UserNotFound)?;

        // the mock user store keeps passwords in the clear, so comparison
        // happens here rather than server-side
        if record.password.expose_secret() != credentials.password.expose_secret() {
            return Err(PassengerError::IncorrectPassword);
        }

        Ok(record.profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{MockLookupClient, PassengerRecord};
    use crate::clock::ManualClock;
    use crate::config::ThrottleConfig;
    use crate::throttle::InMemoryAttemptStore;
    use chrono::Duration;
    use std::sync::Arc;

    fn action_with(
        records: Vec<PassengerRecord>,
    ) -> (MockLookupClient, Arc<ManualClock>, LoginAction<MockLookupClient>) {
        let lookup = MockLookupClient::with_records(records);
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let throttle = LoginThrottle::with_clock(
            Arc::new(InMemoryAttemptStore::new()),
            ThrottleConfig::default(),
            clock.clone(),
        );
        (lookup.clone(), clock, LoginAction::new(lookup, throttle))
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_owned(),
            password: SecretString::new(password),
        }
    }

    #[test]
    fn test_form_validation() {
        let form = LoginForm {
            username: " rider<b> ".to_owned(),
            password: "Secur3!pass".to_owned(),
        };
        let credentials = form.validate().unwrap();
        assert_eq!(credentials.username, "riderb");

        let short = LoginForm {
            username: "ab".to_owned(),
            password: "Secur3!pass".to_owned(),
        };
        assert_eq!(
            short.validate().unwrap_err(),
            ValidationError::UsernameTooShort(3)
        );

        let weak = LoginForm {
            username: "rider".to_owned(),
            password: "short".to_owned(),
        };
        assert_eq!(
            weak.validate().unwrap_err(),
            ValidationError::PasswordTooShort(8)
        );
    }

    #[tokio::test]
    async fn test_successful_login_resets_attempts() {
        let (_, _, action) = action_with(vec![PassengerRecord::mock()]);

        action
            .execute(&credentials("rider", "wrongpassword"))
            .await
            .unwrap_err();
        assert_eq!(action.throttle().remaining_attempts().await.unwrap(), 4);

        let profile = action
            .execute(&credentials("rider", "Secur3!pass"))
            .await
            .unwrap();
        assert_eq!(profile.username, "rider");
        assert_eq!(action.throttle().remaining_attempts().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_both_count() {
        let (_, _, action) = action_with(vec![PassengerRecord::mock()]);

        assert_eq!(
            action.execute(&credentials("nobody", "whatever1")).await,
            Err(PassengerError::UserNotFound)
        );
        assert_eq!(
            action.execute(&credentials("rider", "wrongpassword")).await,
            Err(PassengerError::IncorrectPassword)
        );
        assert_eq!(action.throttle().remaining_attempts().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_network_error_counts_as_attempt() {
        let (lookup, _, action) = action_with(vec![PassengerRecord::mock()]);

        lookup.fail_next_with(PassengerError::Network("connection refused".to_owned()));
        assert!(matches!(
            action.execute(&credentials("rider", "Secur3!pass")).await,
            Err(PassengerError::Network(_))
        ));
        assert_eq!(action.throttle().remaining_attempts().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_lockout_blocks_before_any_network_call() {
        let (lookup, _, action) = action_with(vec![PassengerRecord::mock()]);

        for _ in 0..5 {
            action
                .execute(&credentials("rider", "wrongpassword"))
                .await
                .unwrap_err();
        }
        assert_eq!(lookup.calls(), 5);

        // even correct credentials are rejected without a lookup
        assert_eq!(
            action.execute(&credentials("rider", "Secur3!pass")).await,
            Err(PassengerError::RateLimited {
                remaining_minutes: 15
            })
        );
        assert_eq!(lookup.calls(), 5);
    }

    #[tokio::test]
    async fn test_lockout_expires_and_login_succeeds() {
        let (_, clock, action) = action_with(vec![PassengerRecord::mock()]);

        for _ in 0..5 {
            action
                .execute(&credentials("rider", "wrongpassword"))
                .await
                .unwrap_err();
        }

        clock.advance(Duration::minutes(15));
        let profile = action
            .execute(&credentials("rider", "Secur3!pass"))
            .await
            .unwrap();
        assert_eq!(profile.username, "rider");
    }

    #[tokio::test]
    async fn test_remaining_minutes_reported_in_error() {
        let (_, clock, action) = action_with(vec![PassengerRecord::mock()]);

        for _ in 0..5 {
            action
                .execute(&credentials("rider", "wrongpassword"))
                .await
                .unwrap_err();
        }

        clock.advance(Duration::minutes(2) + Duration::seconds(30));
        let error = action
            .execute(&credentials("rider", "Secur3!pass"))
            .await
            .unwrap_err();
        assert_eq!(
            error,
            PassengerError::RateLimited {
                remaining_minutes: 13
            }
        );
        assert_eq!(
            error.to_string(),
            "Too many login attempts. Please try again in 13 minutes."
        );
    }
}
