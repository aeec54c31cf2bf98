use super::RefreshSnapshotUseCase;
use crate::ports::TxReceipt;
use crate::services::{RegistryClient, ResolverContext};
use ledger_dns_domain::{registry_label, DomainError, Severity};
use std::sync::Arc;
use tracing::instrument;

pub struct RegisterDomainUseCase {
    context: Arc<ResolverContext>,
    registry: Arc<RegistryClient>,
    refresh: Arc<RefreshSnapshotUseCase>,
    ledger_suffix: Arc<str>,
}

impl RegisterDomainUseCase {
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

    /// Registers `domain` to the signer, adds it to the known domains and
    /// refreshes the snapshot. Failures are logged once and returned.
    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Result<TxReceipt, DomainError> {
        if let Err(e) = self.registry.require_signer() {
            self.context.log(
                "Wallet not connected. Cannot register domain.",
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

        self.context
            .log(format!("Registering domain: {label}..."), Severity::Info);

        let receipt = match self.registry.register(&label).await {
            Ok(receipt) => receipt,
            Err(e) => {
                self.context
                    .log(format!("Error registering domain: {e}"), Severity::Error);
                return Err(e);
            }
        };

        self.context.log(
            format!("Domain registered: {label} (tx {})", receipt.tx_hash),
            Severity::Success,
        );
        self.context.remember_domain(&label).await;
        self.refresh.execute().await;

        Ok(receipt)
    }
}
