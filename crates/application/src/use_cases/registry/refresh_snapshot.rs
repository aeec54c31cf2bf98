use crate::ports::Clock;
use crate::services::{RegistryClient, ResolverContext};
use crate::use_cases::resolve::resolve_domain::freshness_label;
use ledger_dns_domain::{
    DomainError, FreshRecord, RecordType, RegistrySnapshot, Severity, SnapshotEntry,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Rebuilds the full registry view from the known-domain set.
///
/// Costs one `is_registered` call per known domain plus, for registered
/// ones, one owner lookup and eight record probes. Meant for connect time
/// and explicit refreshes, never for the per-query path.
pub struct RefreshSnapshotUseCase {
    context: Arc<ResolverContext>,
    registry: Arc<RegistryClient>,
    clock: Arc<dyn Clock>,
}

impl RefreshSnapshotUseCase {
    pub fn new(
        context: Arc<ResolverContext>,
        registry: Arc<RegistryClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            context,
            registry,
            clock,
        }
    }

    /// Loads the snapshot for the context's known domains and installs it.
    #[instrument(skip(self))]
    pub async fn execute(&self) -> RegistrySnapshot {
        let known = self.context.known_domains().await;
        let snapshot = self.load(&known).await;
        self.context.replace_snapshot(snapshot.clone()).await;
        snapshot
    }

    /// Walks `known_domains` in order and probes all eight record types of
    /// every registered one. Registered domains without any record are
    /// logged and left out. A failing domain is logged and skipped; the
    /// walk continues.
    pub async fn load(&self, known_domains: &[String]) -> RegistrySnapshot {
        self.context
            .log("Loading all registry records...", Severity::Info);

        let mut snapshot = RegistrySnapshot::new();
        for domain in known_domains {
            match self.load_domain(domain).await {
                Ok(Some(entry)) => snapshot.upsert(domain.as_str(), entry),
                Ok(None) => {}
                Err(e) => self
                    .context
                    .log(format!("Error checking domain {domain}: {e}"), Severity::Error),
            }
        }

        if snapshot.is_empty() {
            self.context.log(
                "No records found. Register domains to get started!",
                Severity::Info,
            );
        } else {
            self.context.log(
                format!("Total domains loaded: {}", snapshot.len()),
                Severity::Success,
            );
        }

        info!(
            known = known_domains.len(),
            loaded = snapshot.len(),
            "Registry snapshot refreshed"
        );

        snapshot
    }

    async fn load_domain(&self, domain: &str) -> Result<Option<SnapshotEntry>, DomainError> {
        if !self.registry.is_registered(domain).await? {
            return Ok(None);
        }

        let owner = self.registry.owner(domain).await?;
        let mut records = Vec::new();

        for record_type in RecordType::PROBE_ORDER {
            // A slot holding an unknown type is skipped; the other slots still load.
            let record = match self.registry.record(domain, record_type).await {
                Ok(Some(record)) => record,
                Ok(None) => continue,
                Err(e @ DomainError::InvalidRecordType(_)) => {
                    self.context.log(
                        format!("Skipping {record_type} slot of {domain}: {e}"),
                        Severity::Error,
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };

            let fresh = FreshRecord::at(
                record.with_owner(Arc::clone(&owner)),
                self.clock.now_secs(),
            );
            self.context.log(
                format!(
                    "Found {} record for {domain}: {} {}",
                    fresh.record.record_type,
                    fresh.record.value,
                    freshness_label(&fresh.freshness)
                ),
                if fresh.freshness.expired {
                    Severity::Error
                } else {
                    Severity::Success
                },
            );
            records.push(fresh);
        }

        if records.is_empty() {
            self.context.log(
                format!("Domain {domain} registered but has no records"),
                Severity::Info,
            );
            return Ok(None);
        }

        Ok(Some(SnapshotEntry { owner, records }))
    }
}
