use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by a ledger binding.
///
/// Bindings report "nothing stored here" as `NoData` or `Reverted`; the
/// registry client treats those as an absent record on reads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("call returned no data")]
    NoData,

    #[error("execution reverted: {0}")]
    Reverted(String),

    #[error("ledger transport error: {0}")]
    Transport(String),

    #[error("binding is read-only")]
    ReadOnly,

    #[error("could not decode ledger response: {0}")]
    Decode(String),
}

/// Record tuple as the registry contract stores it.
///
/// `record_type` is the contract's free-form string; it is validated by the
/// registry client, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRecord {
    pub record_type: String,
    pub value: String,
    pub ttl: u64,
    pub last_updated: u64,
    pub exists: bool,
}

impl LedgerRecord {
    /// Default tuple the contract returns for a slot that was never written.
    pub fn absent() -> Self {
        Self {
            record_type: String::new(),
            value: String::new(),
            ttl: 0,
            last_updated: 0,
            exists: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerNetwork {
    pub name: String,
    pub chain_id: u64,
}

/// Confirmation of a mined mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: String,
}

/// Raw binding to the registry contract on the ledger.
///
/// Mirrors the contract ABI one call per method. Mutating methods return
/// only after the transaction is confirmed.
#[async_trait]
pub trait LedgerBinding: Send + Sync {
    async fn network(&self) -> Result<LedgerNetwork, LedgerError>;

    /// Whether contract code exists at the configured address.
    async fn contract_deployed(&self) -> Result<bool, LedgerError>;

    /// Identity mutations are signed with, if any.
    fn signer(&self) -> Option<Arc<str>>;

    async fn is_domain_registered(&self, domain: &str) -> Result<bool, LedgerError>;

    async fn domain_owner(&self, domain: &str) -> Result<String, LedgerError>;

    async fn record(&self, domain: &str, record_type: &str) -> Result<LedgerRecord, LedgerError>;

    async fn register_domain(&self, domain: &str) -> Result<TxReceipt, LedgerError>;

    async fn set_record(
        &self,
        domain: &str,
        record_type: &str,
        value: &str,
        ttl: u64,
    ) -> Result<TxReceipt, LedgerError>;

    async fn delete_record(&self, domain: &str, record_type: &str)
        -> Result<TxReceipt, LedgerError>;

    async fn transfer_domain(&self, domain: &str, new_owner: &str)
        -> Result<TxReceipt, LedgerError>;
}
