use super::RefreshSnapshotUseCase;
use crate::ports::TxReceipt;
use crate::services::{RegistryClient, ResolverContext};
use ledger_dns_domain::{registry_label, DomainError, RecordType, Severity};
use std::sync::Arc;
use tracing::instrument;

pub struct DeleteRecordUseCase {
    context: Arc<ResolverContext>,
    registry: Arc<RegistryClient>,
    refresh: Arc<RefreshSnapshotUseCase>,
    ledger_suffix: Arc<str>,
}

impl DeleteRecordUseCase {
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

    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<TxReceipt, DomainError> {
        if let Err(e) = self.registry.require_signer() {
            self.context
                .log("Wallet not connected. Cannot delete record.", Severity::Error);
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

        self.context.log(
            format!("Deleting {record_type} record for {label}..."),
            Severity::Info,
        );

        let receipt = match self.registry.delete_record(&label, record_type).await {
            Ok(receipt) => receipt,
            Err(e) => {
                self.context
                    .log(format!("Error deleting record: {e}"), Severity::Error);
                return Err(e);
            }
        };

        self.context.log(
            format!("Record deleted: {label} {record_type}"),
            Severity::Success,
        );
        self.refresh.execute().await;

        Ok(receipt)
    }
}
