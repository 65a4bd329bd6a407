//! Auth flow state machine.
//!
//! The flow is an explicit state machine rather than UI timers coupled to
//! authentication state: the redirect-after-success delay is driven by
//! timestamps the caller supplies, not a background timer. `poll` with a
//! clock; nothing here sleeps.

use chrono::{DateTime, Duration, Utc};

use crate::clients::UserProfile;
use crate::config::RedirectConfig;
use crate::PassengerError;

/// Where the login screen is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthPhase {
    /// Waiting for input. A failed submit returns here.
    Idle,
    /// A login request is in flight.
    Submitting,
    /// Logged in; showing the success state until `redirect_at`.
    Authenticated {
        profile: UserProfile,
        redirect_at: DateTime<Utc>,
    },
    /// The redirect delay has elapsed; the app should navigate.
    Redirecting { profile: UserProfile },
}

/// Clock-driven login flow state.
///
/// Transitions:
///
/// ```text
/// Idle --begin_submit--> Submitting --complete--> Authenticated
///   ^                        |                        |
///   +---------fail-----------+                     poll (after delay)
///   ^                                                 v
///   +-----------------reset--------------------- Redirecting
/// ```
#[derive(Debug)]
pub struct AuthFlow {
    phase: AuthPhase,
    last_error: Option<PassengerError>,
    redirect_delay: Duration,
}

impl AuthFlow {
    #[must_use]
    pub fn new(config: &RedirectConfig) -> Self {
        Self {
            phase: AuthPhase::Idle,
            last_error: None,
            redirect_delay: config.delay,
        }
    }

    pub fn phase(&self) -> &AuthPhase {
        &self.phase
    }

    /// The error from the most recent failed submit, until the next one
    /// starts.
    pub fn last_error(&self) -> Option<&PassengerError> {
        self.last_error.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(
            self.phase,
            AuthPhase::Authenticated { .. } | AuthPhase::Redirecting { .. }
        )
    }

    /// Starts a submit. Returns false (and does nothing) unless the flow
    /// is idle — a second submit while one is in flight is ignored.
    pub fn begin_submit(&mut self) -> bool {
        if self.phase != AuthPhase::Idle {
            return false;
        }
        self.last_error = None;
        self.phase = AuthPhase::Submitting;
        true
    }

    /// Records a successful login and schedules the redirect.
    pub fn complete(&mut self, profile: UserProfile, now: DateTime<Utc>) -> bool {
        if self.phase != AuthPhase::Submitting {
            return false;
        }
        self.phase = AuthPhase::Authenticated {
            profile,
            redirect_at: now + self.redirect_delay,
        };
        true
    }

    /// Records a failed login and returns the flow to idle.
    pub fn fail(&mut self, error: PassengerError) -> bool {
        if self.phase != AuthPhase::Submitting {
            return false;
        }
        self.last_error = Some(error);
        self.phase = AuthPhase::Idle;
        true
    }

    /// Advances time-driven transitions. Returns the profile when the
    /// flow has just moved (or already moved) to `Redirecting`.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<&UserProfile> {
        if let AuthPhase::Authenticated {
            profile,
            redirect_at,
        } = &self.phase
        {
            if now >= *redirect_at {
                self.phase = AuthPhase::Redirecting {
                    profile: profile.clone(),
                };
            }
        }

        match &self.phase {
            AuthPhase::Redirecting { profile } => Some(profile),
            _ => None,
        }
    }

    /// Returns to idle from any state, clearing the error. Used on logout
    /// and when leaving the screen.
    pub fn reset(&mut self) {
        self.phase = AuthPhase::Idle;
        self.last_error = None;
    }
}
