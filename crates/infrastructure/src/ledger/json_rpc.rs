use super::abi;
use async_trait::async_trait;
use ledger_dns_application::ports::{
    LedgerBinding, LedgerError, LedgerNetwork, LedgerRecord, TxReceipt,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Registry contract reached over Ethereum JSON-RPC (`eth_call`).
///
/// Read-only: transaction signing happens outside this process, so every
/// mutation returns `LedgerError::ReadOnly`.
pub struct JsonRpcLedger {
    client: reqwest::Client,
    rpc_url: String,
    contract: String,
    timeout: Duration,
    next_id: AtomicU64,
}

impl JsonRpcLedger {
    pub fn new(
        rpc_url: impl Into<String>,
        contract: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LedgerError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Transport(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            rpc_url: rpc_url.into(),
            contract: contract.into(),
            timeout,
            next_id: AtomicU64::new(1),
        })
    }

    async fn rpc(&self, method: &str, params: Value) -> Result<Value, LedgerError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        let body =
            serde_json::to_vec(&request).map_err(|e| LedgerError::Transport(e.to_string()))?;

        debug!(method, url = %self.rpc_url, "JSON-RPC call");

        let response = tokio::time::timeout(
            self.timeout,
            self.client
                .post(&self.rpc_url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send(),
        )
        .await
        .map_err(|_| LedgerError::Transport(format!("timeout calling {method}")))?
        .map_err(|e| LedgerError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LedgerError::Transport(format!(
                "{method} returned HTTP {}",
                status.as_u16()
            )));
        }

        let bytes = tokio::time::timeout(self.timeout, response.bytes())
            .await
            .map_err(|_| LedgerError::Transport(format!("timeout reading {method} response")))?
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        let parsed: RpcResponse =
            serde_json::from_slice(&bytes).map_err(|e| LedgerError::Decode(e.to_string()))?;

        if let Some(error) = parsed.error {
            if error.message.to_ascii_lowercase().contains("revert") {
                return Err(LedgerError::Reverted(error.message));
            }
            return Err(LedgerError::Transport(format!(
                "{method} failed ({}): {}",
                error.code, error.message
            )));
        }

        parsed
            .result
            .ok_or_else(|| LedgerError::Decode(format!("{method} returned no result")))
    }

    async fn call(&self, data: Vec<u8>) -> Result<Vec<u8>, LedgerError> {
        let result = self
            .rpc(
                "eth_call",
                json!([{ "to": self.contract, "data": abi::to_hex(&data) }, "latest"]),
            )
            .await?;
        let hex = result
            .as_str()
            .ok_or_else(|| LedgerError::Decode("eth_call result is not a string".to_string()))?;

        let bytes = abi::from_hex(hex)?;
        if bytes.is_empty() {
            return Err(LedgerError::NoData);
        }
        Ok(bytes)
    }
}

/// Network names for well-known chain ids.
pub fn network_name(chain_id: u64) -> &'static str {
    match chain_id {
        1 => "homestead",
        5 => "goerli",
        137 => "matic",
        11155111 => "sepolia",
        31337 => "hardhat",
        _ => "unknown",
    }
}

fn parse_quantity(value: &Value) -> Result<u64, LedgerError> {
    let s = value
        .as_str()
        .ok_or_else(|| LedgerError::Decode("quantity is not a string".to_string()))?;
    u64::from_str_radix(s.trim_start_matches("0x"), 16)
        .map_err(|e| LedgerError::Decode(format!("bad quantity '{s}': {e}")))
}

#[async_trait]
impl LedgerBinding for JsonRpcLedger {
    async fn network(&self) -> Result<LedgerNetwork, LedgerError> {
        let chain_id = parse_quantity(&self.rpc("eth_chainId", json!([])).await?)?;
        Ok(LedgerNetwork {
            name: network_name(chain_id).to_string(),
            chain_id,
        })
    }

    async fn contract_deployed(&self) -> Result<bool, LedgerError> {
        let code = self
            .rpc("eth_getCode", json!([self.contract, "latest"]))
            .await?;
        let code = code.as_str().unwrap_or("0x");
        Ok(!code.trim_start_matches("0x").is_empty())
    }

    fn signer(&self) -> Option<Arc<str>> {
        None
    }

    async fn is_domain_registered(&self, domain: &str) -> Result<bool, LedgerError> {
        let data = self
            .call(abi::encode_string_call(abi::IS_DOMAIN_REGISTERED, &[domain]))
            .await?;
        abi::decode_bool(&data)
    }

    async fn domain_owner(&self, domain: &str) -> Result<String, LedgerError> {
        let data = self
            .call(abi::encode_string_call(abi::GET_DOMAIN_OWNER, &[domain]))
            .await?;
        abi::decode_address(&data)
    }

    async fn record(&self, domain: &str, record_type: &str) -> Result<LedgerRecord, LedgerError> {
        let data = self
            .call(abi::encode_string_call(
                abi::GET_RECORD,
                &[domain, record_type],
            ))
            .await?;
        abi::decode_record(&data)
    }

    async fn register_domain(&self, _domain: &str) -> Result<TxReceipt, LedgerError> {
        Err(LedgerError::ReadOnly)
    }

    async fn set_record(
        &self,
        _domain: &str,
        _record_type: &str,
        _value: &str,
        _ttl: u64,
    ) -> Result<TxReceipt, LedgerError> {
        Err(LedgerError::ReadOnly)
    }

    async fn delete_record(
        &self,
        _domain: &str,
        _record_type: &str,
    ) -> Result<TxReceipt, LedgerError> {
        Err(LedgerError::ReadOnly)
    }

    async fn transfer_domain(
        &self,
        _domain: &str,
        _new_owner: &str,
    ) -> Result<TxReceipt, LedgerError> {
        Err(LedgerError::ReadOnly)
    }
}
