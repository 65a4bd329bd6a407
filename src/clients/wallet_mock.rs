#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::wallet::{TransferRequest, TxHash, WalletClient};
use crate::PassengerError;

/// In-memory wallet.
///
/// Configure `fail_with` to simulate a rejection, or `respond_after` to
/// simulate a provider that sits on the request (for timeout and
/// cancellation tests).
#[derive(Clone)]
pub struct MockWalletClient {
    pub accounts: Arc<Mutex<Vec<String>>>,
    pub sent: Arc<Mutex<Vec<TransferRequest>>>,
    pub fail_with: Arc<Mutex<Option<PassengerError>>>,
    pub respond_after: Arc<Mutex<Option<Duration>>>,
}

impl MockWalletClient {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(Mutex::new(vec!["0xmockaccount".to_owned()])),
            sent: Arc::new(Mutex::new(vec![])),
            fail_with: Arc::new(Mutex::new(None)),
            respond_after: Arc::new(Mutex::new(None)),
        }
    }

    pub fn disconnected() -> Self {
        let wallet = Self::new();
        wallet.accounts.lock().unwrap().clear();
        wallet
    }

    pub fn fail_next_with(&self, error: PassengerError) {
        *self.fail_with.lock().unwrap() = Some(error);
    }

    pub fn respond_after(&self, delay: Duration) {
        *self.respond_after.lock().unwrap() = Some(delay);
    }
}

impl Default for MockWalletClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletClient for MockWalletClient {
    async fn accounts(&self) -> Result<Vec<String>, PassengerError> {
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn send_transfer(&self, request: &TransferRequest) -> Result<TxHash, PassengerError> {
        let delay = *self.respond_after.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.fail_with.lock().unwrap().take() {
            return Err(error);
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(request.clone());
        let nonce = sent.len();
        drop(sent);

        Ok(TxHash(format!("0xmocktx{nonce:056x}")))
    }
}
