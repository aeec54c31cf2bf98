use super::RefreshSnapshotUseCase;
use crate::ports::LedgerNetwork;
use crate::services::{RegistryClient, ResolverContext};
use ledger_dns_domain::{abbreviate_identity, DomainError, Severity};
use std::sync::Arc;
use tracing::instrument;

/// Verifies the ledger is reachable and the registry contract deployed,
/// reports the signing mode, then loads the initial snapshot.
pub struct ConnectRegistryUseCase {
    context: Arc<ResolverContext>,
    registry: Arc<RegistryClient>,
    refresh: Arc<RefreshSnapshotUseCase>,
}

impl ConnectRegistryUseCase {
    pub fn new(
        context: Arc<ResolverContext>,
        registry: Arc<RegistryClient>,
        refresh: Arc<RefreshSnapshotUseCase>,
    ) -> Self {
        Self {
            context,
            registry,
            refresh,
        }
    }

    /// # Errors
    ///
    /// * `DomainError::RegistryUnreachable` - the ledger did not answer or no
    ///   contract code exists at the configured address
    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<LedgerNetwork, DomainError> {
        self.context.log("Connecting to ledger...", Severity::Info);

        let network = match self.registry.network().await {
            Ok(network) => network,
            Err(e) => {
                self.context
                    .log(format!("Connection error: {e}"), Severity::Error);
                return Err(e);
            }
        };
        self.context.log(
            format!(
                "Connected to network: {} (chainId: {})",
                network.name, network.chain_id
            ),
            Severity::Success,
        );

        if let Err(e) = self.registry.ensure_deployed().await {
            self.context
                .log("Contract not found at this address!", Severity::Error);
            return Err(e);
        }
        self.context
            .log("Contract found at address", Severity::Success);

        match self.registry.signer() {
            Some(signer) => self.context.log(
                format!("Wallet connected: {}", abbreviate_identity(&signer)),
                Severity::Success,
            ),
            None => self
                .context
                .log("Read-only mode (no signer configured)", Severity::Info),
        }

        self.context
            .log("Ledger connection established!", Severity::Success);

        self.refresh.execute().await;

        Ok(network)
    }
}
