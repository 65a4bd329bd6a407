use async_trait::async_trait;

use crate::PassengerError;

/// A plain value transfer, ready for the wallet to sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub value_wei: u128,
    pub gas: u64,
}

/// Hash of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxHash(pub String);

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wallet provider boundary.
///
/// Implementations map provider-specific failures onto the wallet
/// variants of [`PassengerError`]: `WalletUnavailable` when no provider or
/// no account is reachable, `WalletRejected` when the user or node turns
/// the transaction down.
#[async_trait]
pub trait WalletClient: Send + Sync {
    /// Accounts the provider exposes; the first one pays.
    async fn accounts(&self) -> Result<Vec<String>, PassengerError>;

    /// Asks the wallet to sign and submit a transfer.
    ///
    /// May suspend indefinitely while the provider waits on the user;
    /// callers are expected to impose their own timeout and cancellation.
    async fn send_transfer(&self, request: &TransferRequest) -> Result<TxHash, PassengerError>;
}
