use ledger_dns_application::ports::{Clock, LedgerBinding, RecursiveResolver};
use ledger_dns_application::services::{RegistryClient, ResolverContext};
use ledger_dns_application::use_cases::{
    ConnectRegistryUseCase, DeleteRecordUseCase, RefreshSnapshotUseCase, RegisterDomainUseCase,
    ResolveDomainUseCase, TransferDomainUseCase, UpsertRecordUseCase,
};
use ledger_dns_domain::config::LedgerBackend;
use ledger_dns_domain::{Config, KnownDomains};
use ledger_dns_infrastructure::{DohJsonResolver, InMemoryLedger, JsonRpcLedger, SystemClock};
use ledger_dns_jobs::{CacheSweepJob, JobRunner, QuerySimulatorJob};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Fully wired resolver: shared context, adapters and every use case.
pub struct Services {
    pub context: Arc<ResolverContext>,
    pub clock: Arc<dyn Clock>,
    pub resolve: Arc<ResolveDomainUseCase>,
    pub refresh: Arc<RefreshSnapshotUseCase>,
    pub connect: ConnectRegistryUseCase,
    pub register: RegisterDomainUseCase,
    pub upsert: UpsertRecordUseCase,
    pub delete: DeleteRecordUseCase,
    pub transfer: TransferDomainUseCase,
}

impl Services {
    pub fn build(config: &Config) -> anyhow::Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let timeout = Duration::from_millis(config.recursive.timeout_ms);

        let binding: Arc<dyn LedgerBinding> = match config.registry.backend {
            LedgerBackend::Memory => Arc::new(
                InMemoryLedger::new(clock.clone(), config.registry.signer())
                    .with_seed(&config.registry.records),
            ),
            LedgerBackend::JsonRpc => Arc::new(JsonRpcLedger::new(
                &config.registry.rpc_url,
                &config.registry.contract_address,
                timeout,
            )?),
        };
        info!(backend = config.registry.backend.as_str(), "Ledger binding ready");

        let recursive: Arc<dyn RecursiveResolver> =
            Arc::new(DohJsonResolver::new(&config.recursive.doh_url, timeout)?);

        let context = Arc::new(ResolverContext::new(KnownDomains::from_seed(
            config.registry.seed_domains.iter(),
        )));
        let registry = Arc::new(RegistryClient::new(binding));
        let suffix = config.registry.ledger_suffix.as_str();

        let resolve = Arc::new(
            ResolveDomainUseCase::new(
                context.clone(),
                registry.clone(),
                recursive,
                clock.clone(),
                suffix,
            )
            .with_default_ttl(config.recursive.default_ttl),
        );
        let refresh = Arc::new(RefreshSnapshotUseCase::new(
            context.clone(),
            registry.clone(),
            clock.clone(),
        ));

        Ok(Self {
            connect: ConnectRegistryUseCase::new(
                context.clone(),
                registry.clone(),
                refresh.clone(),
            ),
            register: RegisterDomainUseCase::new(
                context.clone(),
                registry.clone(),
                refresh.clone(),
                suffix,
            ),
            upsert: UpsertRecordUseCase::new(
                context.clone(),
                registry.clone(),
                refresh.clone(),
                suffix,
            ),
            delete: DeleteRecordUseCase::new(
                context.clone(),
                registry.clone(),
                refresh.clone(),
                suffix,
            ),
            transfer: TransferDomainUseCase::new(
                context.clone(),
                registry,
                refresh.clone(),
                suffix,
            ),
            context,
            clock,
            resolve,
            refresh,
        })
    }

    /// Starts the background jobs enabled in `config`.
    pub async fn start_jobs(&self, config: &Config, shutdown: CancellationToken) {
        let mut runner = JobRunner::new(shutdown);

        if config.simulator.enabled {
            runner = runner.with_query_simulator(
                QuerySimulatorJob::new(self.resolve.clone(), config.simulator.domains.clone())
                    .with_interval(config.simulator.interval_secs),
            );
        }

        if config.cache.sweep_interval_secs > 0 {
            runner = runner.with_cache_sweep(
                CacheSweepJob::new(self.context.clone(), self.clock.clone())
                    .with_interval(config.cache.sweep_interval_secs),
            );
        }

        runner.start().await;
    }
}
