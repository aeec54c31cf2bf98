use async_trait::async_trait;
use ledger_dns_application::ports::{
    Clock, LedgerBinding, LedgerError, LedgerNetwork, LedgerRecord, TxReceipt,
};
use ledger_dns_domain::config::SeedRecord;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Owner reported for labels nobody registered.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

const CHAIN_ID: u64 = 31337;

#[derive(Debug, Clone)]
struct DomainEntry {
    owner: String,
    records: BTreeMap<String, LedgerRecord>,
}

/// Process-local registry with the contract's ownership rules.
///
/// Only the owner of a domain may change its records or transfer it.
/// Record timestamps come from the injected clock.
pub struct InMemoryLedger {
    domains: RwLock<HashMap<String, DomainEntry>>,
    signer: Option<Arc<str>>,
    clock: Arc<dyn Clock>,
    tx_counter: AtomicU64,
}

impl InMemoryLedger {
    pub fn new(clock: Arc<dyn Clock>, signer: Option<&str>) -> Self {
        Self {
            domains: RwLock::new(HashMap::new()),
            signer: signer.map(Arc::from),
            clock,
            tx_counter: AtomicU64::new(0),
        }
    }

    /// Pre-populates the ledger. A seed without an owner goes to the
    /// signer, or to the zero address in read-only mode.
    pub fn with_seed(mut self, seed: &[SeedRecord]) -> Self {
        let now = self.clock.now_secs();
        let default_owner = self
            .signer
            .as_deref()
            .unwrap_or(ZERO_ADDRESS)
            .to_string();
        let domains = self.domains.get_mut();

        for record in seed {
            let domain = record.domain.trim().to_lowercase();
            let record_type = record.record_type.trim().to_uppercase();
            let entry = domains.entry(domain).or_insert_with(|| DomainEntry {
                owner: record.owner.clone().unwrap_or_else(|| default_owner.clone()),
                records: BTreeMap::new(),
            });
            entry.records.insert(
                record_type.clone(),
                LedgerRecord {
                    record_type,
                    value: record.value.clone(),
                    ttl: record.ttl,
                    last_updated: now,
                    exists: true,
                },
            );
        }

        info!(domains = domains.len(), records = seed.len(), "In-memory ledger seeded");
        self
    }

    pub async fn domain_count(&self) -> usize {
        self.domains.read().await.len()
    }

    fn require_signer(&self) -> Result<&str, LedgerError> {
        self.signer.as_deref().ok_or(LedgerError::ReadOnly)
    }

    fn owned_entry<'a>(
        domains: &'a mut HashMap<String, DomainEntry>,
        domain: &str,
        signer: &str,
    ) -> Result<&'a mut DomainEntry, LedgerError> {
        let entry = domains
            .get_mut(domain)
            .ok_or_else(|| LedgerError::Reverted("Domain not registered".to_string()))?;
        if !entry.owner.eq_ignore_ascii_case(signer) {
            return Err(LedgerError::Reverted("Not the domain owner".to_string()));
        }
        Ok(entry)
    }

    fn receipt(&self) -> TxReceipt {
        let nonce = self.tx_counter.fetch_add(1, Ordering::Relaxed) + 1;
        let mut hash = [0u8; 32];
        hash[..8].copy_from_slice(&self.clock.now_millis().to_be_bytes());
        hash[24..].copy_from_slice(&nonce.to_be_bytes());
        TxReceipt {
            tx_hash: format!("0x{}", hex::encode(hash)),
        }
    }
}

#[async_trait]
impl LedgerBinding for InMemoryLedger {
    async fn network(&self) -> Result<LedgerNetwork, LedgerError> {
        Ok(LedgerNetwork {
            name: "in-memory".to_string(),
            chain_id: CHAIN_ID,
        })
    }

    async fn contract_deployed(&self) -> Result<bool, LedgerError> {
        Ok(true)
    }

    fn signer(&self) -> Option<Arc<str>> {
        self.signer.clone()
    }

    async fn is_domain_registered(&self, domain: &str) -> Result<bool, LedgerError> {
        Ok(self.domains.read().await.contains_key(domain))
    }

    async fn domain_owner(&self, domain: &str) -> Result<String, LedgerError> {
        Ok(self
            .domains
            .read()
            .await
            .get(domain)
            .map(|d| d.owner.clone())
            .unwrap_or_else(|| ZERO_ADDRESS.to_string()))
    }

    async fn record(&self, domain: &str, record_type: &str) -> Result<LedgerRecord, LedgerError> {
        Ok(self
            .domains
            .read()
            .await
            .get(domain)
            .and_then(|d| d.records.get(record_type).cloned())
            .unwrap_or_else(LedgerRecord::absent))
    }

    async fn register_domain(&self, domain: &str) -> Result<TxReceipt, LedgerError> {
        let signer = self.require_signer()?;
        let mut domains = self.domains.write().await;
        if domains.contains_key(domain) {
            return Err(LedgerError::Reverted("Domain already registered".to_string()));
        }
        domains.insert(
            domain.to_string(),
            DomainEntry {
                owner: signer.to_string(),
                records: BTreeMap::new(),
            },
        );
        debug!(domain, owner = signer, "Domain registered");
        Ok(self.receipt())
    }

    async fn set_record(
        &self,
        domain: &str,
        record_type: &str,
        value: &str,
        ttl: u64,
    ) -> Result<TxReceipt, LedgerError> {
        let signer = self.require_signer()?;
        let mut domains = self.domains.write().await;
        let entry = Self::owned_entry(&mut domains, domain, signer)?;
        entry.records.insert(
            record_type.to_string(),
            LedgerRecord {
                record_type: record_type.to_string(),
                value: value.to_string(),
                ttl,
                last_updated: self.clock.now_secs(),
                exists: true,
            },
        );
        debug!(domain, record_type, "Record set");
        Ok(self.receipt())
    }

    async fn delete_record(
        &self,
        domain: &str,
        record_type: &str,
    ) -> Result<TxReceipt, LedgerError> {
        let signer = self.require_signer()?;
        let mut domains = self.domains.write().await;
        let entry = Self::owned_entry(&mut domains, domain, signer)?;
        if entry.records.remove(record_type).is_none() {
            return Err(LedgerError::Reverted("Record does not exist".to_string()));
        }
        debug!(domain, record_type, "Record deleted");
        Ok(self.receipt())
    }

    async fn transfer_domain(
        &self,
        domain: &str,
        new_owner: &str,
    ) -> Result<TxReceipt, LedgerError> {
        let signer = self.require_signer()?;
        let mut domains = self.domains.write().await;
        let entry = Self::owned_entry(&mut domains, domain, signer)?;
        entry.owner = new_owner.to_string();
        debug!(domain, new_owner, "Domain transferred");
        Ok(self.receipt())
    }
}
