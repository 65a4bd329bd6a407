use chrono::{DateTime, Utc};

use crate::clients::PaymentMethod;

/// Events emitted by passenger flows.
///
/// Events are always fired from actions. If no listeners are registered,
/// they are silently ignored. Register listeners via
/// [`register_event_listeners`](crate::register_event_listeners).
#[derive(Debug, Clone)]
pub enum PassengerEvent {
    // account lifecycle
    SignupCompleted {
        username: String,
        email: String,
        at: DateTime<Utc>,
    },

    // authentication
    LoginSucceeded {
        user_id: String,
        username: String,
        at: DateTime<Utc>,
    },
    LoginFailed {
        username: String,
        reason: String,
        at: DateTime<Utc>,
    },
    LoginLockedOut {
        remaining_minutes: i64,
        at: DateTime<Utc>,
    },
    LoggedOut {
        at: DateTime<Utc>,
    },

    // booking and payment
    RideBooked {
        booking_id: String,
        payment_method: PaymentMethod,
        at: DateTime<Utc>,
    },
    PaymentConfirmed {
        tx_hash: String,
        at: DateTime<Utc>,
    },
    PaymentFailed {
        reason: String,
        at: DateTime<Utc>,
    },
}

impl PassengerEvent {
    /// Dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SignupCompleted { .. } => "auth.signup.completed",
            Self::LoginSucceeded { .. } => "auth.login.success",
            Self::LoginFailed { .. } => "auth.login.failed",
            Self::LoginLockedOut { .. } => "auth.login.locked_out",
            Self::LoggedOut { .. } => "auth.logout",
            Self::RideBooked { .. } => "ride.booked",
            Self::PaymentConfirmed { .. } => "payment.confirmed",
            Self::PaymentFailed { .. } => "payment.failed",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::SignupCompleted { at, .. }
            | Self::LoginSucceeded { at, .. }
            | Self::LoginFailed { at, .. }
            | Self::LoginLockedOut { at, .. }
            | Self::LoggedOut { at }
            | Self::RideBooked { at, .. }
            | Self::PaymentConfirmed { at, .. }
            | Self::PaymentFailed { at, .. } => *at,
        }
    }
}
