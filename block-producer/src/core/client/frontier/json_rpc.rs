use crate::core::client::frontier::{FrontierClient, FrontierError};
use crate::types::params::FrontierArgs;
use async_trait::async_trait;
use serde_json::{json, Value};
use url::Url;

/// Frontier source backed by an Ethereum-compatible JSON-RPC endpoint
#[derive(Debug, Clone)]
pub struct JsonRpcFrontierClient {
    client: reqwest::Client,
    rpc_url: Url,
    confirmations: u64,
}

impl JsonRpcFrontierClient {
    pub fn new(args: &FrontierArgs) -> Result<Self, FrontierError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, rpc_url: args.rpc_url.clone(), confirmations: args.confirmations })
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, FrontierError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params
        });
        let response = self.client.post(self.rpc_url.clone()).json(&body).send().await?.error_for_status()?;
        let response: Value = response.json().await?;
        if let Some(err) = response.get("error") {
            return Err(FrontierError::Rpc(err.to_string()));
        }
        response.get("result").cloned().ok_or_else(|| FrontierError::Decode("missing result".to_string()))
    }
}

/// Parses a `0x` prefixed hex quantity
pub(crate) fn parse_hex_quantity(value: &Value) -> Result<u64, FrontierError> {
    let quantity = value.as_str().ok_or_else(|| FrontierError::Decode(format!("expected a string, got {}", value)))?;
    let digits = quantity.strip_prefix("0x").unwrap_or(quantity);
    u64::from_str_radix(digits, 16).map_err(|e| FrontierError::Decode(format!("{}: {}", quantity, e)))
}

#[async_trait]
impl FrontierClient for JsonRpcFrontierClient {
    async fn latest_block_number(&self) -> Result<u64, FrontierError> {
        let result = self.call("eth_blockNumber", json!([])).await?;
        let head = parse_hex_quantity(&result)?;
        Ok(head.saturating_sub(self.confirmations))
    }
}
