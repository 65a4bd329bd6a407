//! Curbside is an embeddable passenger-side core for ride-hailing apps.
//!
//! It provides the domain logic a passenger frontend needs — login attempt
//! throttling, authentication and signup against a remote user store, ride
//! booking and optional wallet-signed payments — behind injectable
//! capability traits so everything is testable without real HTTP or a
//! browser wallet.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`throttle`] | Login attempt counting, lockout policy, attempt stores |
//! | [`clients`] | Capability traits for remote collaborators |
//! | [`http`] | `reqwest` implementations of the client traits |
//! | [`actions`] | Login, signup, booking and logout flows |
//! | [`session`] | Auth flow state machine |
//! | [`validators`] | Form field validation |
//! | [`events`] | Domain events and listeners |

pub mod actions;
pub mod clients;
pub mod clock;
pub mod config;
pub mod events;
pub mod http;
pub mod session;
pub mod throttle;
pub mod validators;

mod secret;

pub use clients::{
    BookingRecord, BookingStore, LookupClient, PassengerRecord, PaymentMethod,
    RegistrationClient, TransferRequest, TxHash, UserProfile, WalletClient,
};
pub use clock::{Clock, SystemClock};
pub use config::CurbsideConfig;
pub use events::register_event_listeners;
pub use secret::SecretString;
pub use throttle::{AttemptRecord, AttemptStore, LoginThrottle, ThrottleDecision};

#[cfg(any(test, feature = "mocks"))]
pub use clients::{MockBookingStore, MockLookupClient, MockRegistrationClient, MockWalletClient};
#[cfg(any(test, feature = "mocks"))]
pub use clock::ManualClock;

use std::fmt;

/// Errors produced by passenger flows.
///
/// Validation failures are a separate type,
/// [`validators::ValidationError`], because the embedding UI renders them
/// inline per field rather than as a banner.
#[derive(Debug, Clone, PartialEq)]
pub enum PassengerError {
    UserNotFound,
    IncorrectPassword,
    EmailAlreadyRegistered,
    RateLimited { remaining_minutes: i64 },
    Network(String),
    Storage(String),
    WalletUnavailable,
    WalletRejected(String),
    WalletTimedOut,
    WalletCancelled,
    InvalidBooking(String),
}

impl std::error::Error for PassengerError {}

impl fmt::Display for PassengerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassengerError::UserNotFound => write!(f, "Username not found"),
            PassengerError::IncorrectPassword => write!(f, "Incorrect password"),
            PassengerError::EmailAlreadyRegistered => write!(f, "Email already registered"),
            PassengerError::RateLimited { remaining_minutes } => write!(
                f,
                "Too many login attempts. Please try again in {remaining_minutes} minutes."
            ),
            PassengerError::Network(msg) => write!(f, "Network error: {msg}"),
            PassengerError::Storage(msg) => write!(f, "Storage error: {msg}"),
            PassengerError::WalletUnavailable => {
                write!(f, "Wallet is not connected. Connect a wallet to pay with Ethereum.")
            }
            PassengerError::WalletRejected(msg) => write!(f, "Payment failed: {msg}"),
            PassengerError::WalletTimedOut => write!(f, "Wallet request timed out"),
            PassengerError::WalletCancelled => write!(f, "Wallet request cancelled"),
            PassengerError::InvalidBooking(msg) => write!(f, "{msg}"),
        }
    }
}

impl PassengerError {
    /// True for failures that consume login attempt budget.
    ///
    /// Transport errors deliberately count: an unreachable lookup service
    /// is indistinguishable from bad credentials as far as the throttle is
    /// concerned.
    pub fn consumes_attempt(&self) -> bool {
        matches!(
            self,
            PassengerError::UserNotFound
                | PassengerError::IncorrectPassword
                | PassengerError::Network(_)
        )
    }
}
