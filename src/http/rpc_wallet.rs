use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::network_error;
use crate::clients::{TransferRequest, TxHash, WalletClient};
use crate::PassengerError;

/// Wallet access over Ethereum JSON-RPC.
///
/// Speaks to whatever node or wallet bridge the app points it at. The
/// two calls it makes are `eth_accounts` and `eth_sendTransaction`; a
/// provider that answers either with an RPC error surfaces it as
/// [`PassengerError::WalletRejected`] with the provider's own message.
#[derive(Debug, Clone)]
pub struct JsonRpcWallet {
    client: reqwest::Client,
    url: String,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    message: String,
}

impl JsonRpcWallet {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, PassengerError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response: RpcResponse<T> = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(network_error)?
            .error_for_status()
            .map_err(network_error)?
            .json()
            .await
            .map_err(network_error)?;

        if let Some(error) = response.error {
            return Err(PassengerError::WalletRejected(error.message));
        }

        response
            .result
            .ok_or_else(|| PassengerError::Network(format!("{method}: empty RPC response")))
    }
}

#[async_trait]
impl WalletClient for JsonRpcWallet {
    async fn accounts(&self) -> Result<Vec<String>, PassengerError> {
        self.call("eth_accounts", json!([])).await
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(to = %request.to)))]
    async fn send_transfer(&self, request: &TransferRequest) -> Result<TxHash, PassengerError> {
        let params = json!([{
            "from": request.from,
            "to": request.to,
            "value": hex_quantity(request.value_wei),
            "gas": hex_quantity(request.gas.into()),
        }]);

        let hash: String = self.call("eth_sendTransaction", params).await?;
        Ok(TxHash(hash))
    }
}

/// Quantity encoding per the Ethereum JSON-RPC spec: `0x`-prefixed hex,
/// no leading zeros.
fn hex_quantity(value: u128) -> String {
    format!("{value:#x}")
}
