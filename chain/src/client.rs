//! HTTP client for a signing node.
//!
//! Wraps `reqwest::Client` with the node's base URL and provides typed
//! methods for each RPC action the engine needs. The node owns key material
//! and account sequence numbers; payrun never sees either.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use payrun_types::{ChainAddress, TokenAmount, TxHash};

use crate::{ChainError, TransactionBuilder, TransferOutput};

/// JSON-RPC client for the signing node.
#[derive(Clone)]
pub struct NodeClient {
    http: reqwest::Client,
    node_url: String,
    sender: ChainAddress,
}

#[derive(Deserialize)]
struct BalanceResult {
    balance: String,
}

#[derive(Deserialize)]
struct SubmitResult {
    hash: String,
}

impl NodeClient {
    /// Create a client targeting the given base URL (e.g.
    /// `http://127.0.0.1:1317`) for the given sender account.
    pub fn new(
        node_url: impl Into<String>,
        sender: ChainAddress,
    ) -> Result<Self, ChainError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ChainError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            node_url: node_url.into(),
            sender,
        })
    }

    /// The configured node URL.
    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    /// Send a JSON-RPC request and return the `result` field.
    async fn rpc_call(
        &self,
        action: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ChainError> {
        let mut body = params;
        body.as_object_mut()
            .ok_or_else(|| ChainError::InvalidResponse("params must be a JSON object".into()))?
            .insert("action".to_string(), serde_json::json!(action));

        let response = self
            .http
            .post(&self.node_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChainError::Network(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ChainError::Network(format!(
                "node returned HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ChainError::InvalidResponse(format!("invalid JSON response: {e}")))?;

        if let Some(err) = json.get("error").and_then(|e| e.as_str()) {
            return Err(ChainError::Rejected(err.to_string()));
        }

        Ok(json.get("result").cloned().unwrap_or(json))
    }
}

#[async_trait]
impl TransactionBuilder for NodeClient {
    async fn sender_address(&self) -> Result<ChainAddress, ChainError> {
        Ok(self.sender.clone())
    }

    async fn sender_balance(&self, denom: &str) -> Result<TokenAmount, ChainError> {
        let result = self
            .rpc_call(
                "account_balance",
                serde_json::json!({ "account": self.sender.as_str(), "denom": denom }),
            )
            .await?;

        let resp: BalanceResult = serde_json::from_value(result)
            .map_err(|e| ChainError::InvalidResponse(format!("invalid balance response: {e}")))?;
        resp.balance
            .parse()
            .map_err(|e| ChainError::InvalidResponse(format!("invalid balance value: {e}")))
    }

    async fn submit_transfer(&self, outputs: &[TransferOutput]) -> Result<TxHash, ChainError> {
        let result = self
            .rpc_call(
                "send_many",
                serde_json::json!({
                    "sender": self.sender.as_str(),
                    "outputs": outputs,
                }),
            )
            .await?;

        let resp: SubmitResult = serde_json::from_value(result)
            .map_err(|e| ChainError::InvalidResponse(format!("invalid submit response: {e}")))?;
        Ok(TxHash::new(resp.hash))
    }
}
