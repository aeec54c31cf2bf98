use crate::ports::{LedgerBinding, LedgerError, LedgerNetwork, TxReceipt};
use ledger_dns_domain::{DomainError, Record, RecordType};
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Typed operations over the external ledger binding.
///
/// Reads: a record the ledger reports as missing (`exists == false`, empty
/// return data, revert) is `Ok(None)`, never an error, so multi-type probes
/// keep going. Only transport and decoding failures surface as errors.
///
/// Writes: refused with `DomainError::Unauthorized` before touching the
/// binding when no signer is configured.
pub struct RegistryClient {
    binding: Arc<dyn LedgerBinding>,
}

impl RegistryClient {
    pub fn new(binding: Arc<dyn LedgerBinding>) -> Self {
        Self { binding }
    }

    pub fn signer(&self) -> Option<Arc<str>> {
        self.binding.signer()
    }

    pub fn can_sign(&self) -> bool {
        self.binding.signer().is_some()
    }

    pub fn require_signer(&self) -> Result<Arc<str>, DomainError> {
        self.binding
            .signer()
            .ok_or_else(|| DomainError::Unauthorized("no signer configured".to_string()))
    }

    pub async fn network(&self) -> Result<LedgerNetwork, DomainError> {
        self.binding
            .network()
            .await
            .map_err(|e| DomainError::RegistryUnreachable(e.to_string()))
    }

    pub async fn ensure_deployed(&self) -> Result<(), DomainError> {
        match self.binding.contract_deployed().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(DomainError::RegistryUnreachable(
                "registry contract not found at the configured address".to_string(),
            )),
            Err(e) => Err(DomainError::RegistryUnreachable(e.to_string())),
        }
    }

    pub async fn is_registered(&self, domain: &str) -> Result<bool, DomainError> {
        self.binding
            .is_domain_registered(domain)
            .await
            .map_err(read_error)
    }

    pub async fn owner(&self, domain: &str) -> Result<Arc<str>, DomainError> {
        self.binding
            .domain_owner(domain)
            .await
            .map(Arc::from)
            .map_err(read_error)
    }

    pub async fn record(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Option<Record>, DomainError> {
        let raw = match self.binding.record(domain, record_type.as_str()).await {
            Ok(raw) => raw,
            Err(LedgerError::NoData) | Err(LedgerError::Reverted(_)) => {
                debug!(domain, record_type = %record_type, "Record absent");
                return Ok(None);
            }
            Err(e) => return Err(read_error(e)),
        };

        if !raw.exists {
            return Ok(None);
        }

        // Blank stored type: the probed type stands.
        let stored_type = if raw.record_type.trim().is_empty() {
            record_type
        } else {
            RecordType::from_str(&raw.record_type)?
        };

        Ok(Some(Record::new(
            stored_type,
            raw.value,
            raw.ttl,
            raw.last_updated,
        )))
    }

    pub async fn register(&self, domain: &str) -> Result<TxReceipt, DomainError> {
        self.require_signer()?;
        self.binding
            .register_domain(domain)
            .await
            .map_err(write_error)
    }

    pub async fn upsert_record(
        &self,
        domain: &str,
        record_type: RecordType,
        value: &str,
        ttl: u64,
    ) -> Result<TxReceipt, DomainError> {
        self.require_signer()?;
        self.binding
            .set_record(domain, record_type.as_str(), value, ttl)
            .await
            .map_err(write_error)
    }

    pub async fn delete_record(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<TxReceipt, DomainError> {
        self.require_signer()?;
        self.binding
            .delete_record(domain, record_type.as_str())
            .await
            .map_err(write_error)
    }

    pub async fn transfer(&self, domain: &str, new_owner: &str) -> Result<TxReceipt, DomainError> {
        self.require_signer()?;
        self.binding
            .transfer_domain(domain, new_owner)
            .await
            .map_err(write_error)
    }
}

fn read_error(e: LedgerError) -> DomainError {
    DomainError::RegistryTransport(e.to_string())
}

fn write_error(e: LedgerError) -> DomainError {
    match e {
        LedgerError::ReadOnly => DomainError::Unauthorized(e.to_string()),
        LedgerError::Reverted(reason) => DomainError::TransactionFailed(reason),
        LedgerError::NoData => DomainError::TransactionFailed(e.to_string()),
        LedgerError::Transport(_) | LedgerError::Decode(_) => {
            DomainError::RegistryTransport(e.to_string())
        }
    }
}
