use super::RefreshSnapshotUseCase;
use crate::ports::TxReceipt;
use crate::services::{RegistryClient, ResolverContext};
use ledger_dns_domain::{abbreviate_identity, registry_label, DomainError, Severity};
use std::sync::Arc;
use tracing::instrument;

pub struct TransferDomainUseCase {
    context: Arc<ResolverContext>,
    registry: Arc<RegistryClient>,
    refresh: Arc<RefreshSnapshotUseCase>,
    ledger_suffix: Arc<str>,
}

impl TransferDomainUseCase {
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
    pub async fn execute(&self, domain: &str, new_owner: &str) -> Result<TxReceipt, DomainError> {
        if let Err(e) = self.registry.require_signer() {
            self.context.log(
                "Wallet not connected. Cannot transfer domain.",
                Severity::Error,
            );
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

        let new_owner = new_owner.trim();
        if new_owner.is_empty() {
            self.context
                .log("Transfer needs a new owner", Severity::Error);
            return Err(DomainError::InvalidArgument(format!(
                "missing new owner for {label}"
            )));
        }

        self.context.log(
            format!(
                "Transferring {label} to {}...",
                abbreviate_identity(new_owner)
            ),
            Severity::Info,
        );

        let receipt = match self.registry.transfer(&label, new_owner).await {
            Ok(receipt) => receipt,
            Err(e) => {
                self.context
                    .log(format!("Error transferring domain: {e}"), Severity::Error);
                return Err(e);
            }
        };

        self.context.log(
            format!(
                "Domain transferred: {label} -> {} (tx {})",
                abbreviate_identity(new_owner),
                receipt.tx_hash
            ),
            Severity::Success,
        );
        self.refresh.execute().await;

        Ok(receipt)
    }
}
