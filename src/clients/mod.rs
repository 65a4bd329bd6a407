//! Capability traits for the remote collaborators.
//!
//! Every network effect in the passenger flows goes through one of these
//! traits, so the actions can be tested against in-memory fakes.
//!
//! # Traits
//!
//! | Trait | Description |
//! |-------|-------------|
//! | [`LookupClient`] | Fetch a passenger record by username |
//! | [`RegistrationClient`] | Duplicate check and account creation |
//! | [`BookingStore`] | Persist a booking record |
//! | [`WalletClient`] | Account discovery and signed transfers |
//!
//! # Mock Implementations
//!
//! Enable the `mocks` feature for in-memory implementations useful for
//! testing:
//!
//! - [`MockLookupClient`]
//! - [`MockRegistrationClient`]
//! - [`MockBookingStore`]
//! - [`MockWalletClient`]

mod booking;
mod lookup;
mod registration;
mod wallet;

#[cfg(any(test, feature = "mocks"))]
mod booking_mock;
#[cfg(any(test, feature = "mocks"))]
mod lookup_mock;
#[cfg(any(test, feature = "mocks"))]
mod registration_mock;
#[cfg(any(test, feature = "mocks"))]
mod wallet_mock;

pub use booking::BookingRecord;
pub use booking::BookingStore;
pub use booking::PaymentMethod;
pub use lookup::LookupClient;
pub use lookup::PassengerRecord;
pub use lookup::UserProfile;
pub use registration::NewPassenger;
pub use registration::RegistrationClient;
pub use wallet::TransferRequest;
pub use wallet::TxHash;
pub use wallet::WalletClient;

#[cfg(any(test, feature = "mocks"))]
pub use booking_mock::MockBookingStore;
#[cfg(any(test, feature = "mocks"))]
pub use lookup_mock::MockLookupClient;
#[cfg(any(test, feature = "mocks"))]
pub use registration_mock::MockRegistrationClient;
#[cfg(any(test, feature = "mocks"))]
pub use wallet_mock::MockWalletClient;
