//! `reqwest`-backed implementations of the client traits.
//!
//! Three remote collaborators, three clients:
//!
//! | Client | Trait(s) | Transport |
//! |--------|----------|-----------|
//! | [`UserApiClient`] | [`LookupClient`], [`RegistrationClient`] | REST, `/signup` resource |
//! | [`RtdbBookingStore`] | [`BookingStore`] | Realtime-DB style `.json` PUTs |
//! | [`JsonRpcWallet`] | [`WalletClient`] | Ethereum JSON-RPC |
//!
//! All transport and decode failures map onto
//! [`PassengerError::Network`](crate::PassengerError::Network), except
//! wallet RPC errors which carry their provider message in
//! [`PassengerError::WalletRejected`](crate::PassengerError::WalletRejected).
//!
//! [`LookupClient`]: crate::clients::LookupClient
//! [`RegistrationClient`]: crate::clients::RegistrationClient
//! [`BookingStore`]: crate::clients::BookingStore
//! [`WalletClient`]: crate::clients::WalletClient

mod rpc_wallet;
mod rtdb;
mod user_api;

pub use rpc_wallet::JsonRpcWallet;
pub use rtdb::RtdbBookingStore;
pub use user_api::UserApiClient;

use crate::PassengerError;

fn network_error(error: reqwest::Error) -> PassengerError {
    PassengerError::Network(error.to_string())
}
