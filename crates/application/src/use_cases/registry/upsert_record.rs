use super::RefreshSnapshotUseCase;
use crate::ports::TxReceipt;
use crate::services::{RegistryClient, ResolverContext};
use ledger_dns_domain::{registry_label, DomainError, RecordType, Severity};
use std::sync::Arc;
use tracing::instrument;

pub struct UpsertRecordUseCase {
    context: Arc<ResolverContext>,
    registry: Arc<RegistryClient>,
    refresh: Arc<RefreshSnapshotUseCase>,
    ledger_suffix: Arc<str>,
}

impl UpsertRecordUseCase {
    pub fn new(
        context: Arc<ResolverContext>,
        registry: Arc<RegistryClient>,
        refresh: Arc<RefreshSnapshotUseCase>,
        ledger_suffix: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            context,
            registry,
            refresh,
            ledger_suffix: ledger_suffix.into(),
        }
    }

    /// Creates or overwrites the `record_type` record of `domain`, then
    /// refreshes the snapshot.
    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        domain: &str,
        record_type: RecordType,
        value: &str,
        ttl: u64,
    ) -> Result<TxReceipt, DomainError> {
        if let Err(e) = self.registry.require_signer() {
            self.context
                .log("Wallet not connected. Cannot add record.", Severity::Error);
            return Err(e);
        }

        let label = match registry_label(domain, &self.ledger_suffix) {
            Ok(label) => label,
            Err(e) => {
                self.context
                    .log(format!("Invalid domain name: '{domain}'"), Severity::Error);
                return Err(e);
            }
        };

        let value = value.trim();
        if value.is_empty() {
            self.context.log(
                format!("Refusing empty {record_type} value for {label}"),
                Severity::Error,
            );
            return Err(DomainError::InvalidArgument(format!(
                "empty {record_type} value for {label}"
            )));
        }

        self.context.log(
            format!("Adding {record_type} record for {label}..."),
            Severity::Info,
        );

        let receipt = match self
            .registry
            .upsert_record(&label, record_type, value, ttl)
            .await
        {
            Ok(receipt) => receipt,
            Err(e) => {
                self.context
                    .log(format!("Error adding record: {e}"), Severity::Error);
                return Err(e);
            }
        };

        self.context.log(
            format!("Record added: {label} {record_type} {value}"),
            Severity::Success,
        );
        self.context.remember_domain(&label).await;
        self.refresh.execute().await;

        Ok(receipt)
    }
}
