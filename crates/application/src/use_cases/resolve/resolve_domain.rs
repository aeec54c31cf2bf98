use crate::ports::{Clock, RecursiveResolver};
use crate::services::{RegistryClient, ResolverContext};
use ledger_dns_domain::{
    DomainError, FreshRecord, Freshness, QueryTarget, Record, RecordType, Severity, SnapshotEntry,
};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Which path produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    Registry,
    Cache,
    Recursive,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerSource::Registry => "registry",
            AnswerSource::Cache => "cache",
            AnswerSource::Recursive => "recursive",
        }
    }
}

impl fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Registry label for registry answers, normalized name otherwise.
    pub domain: Arc<str>,
    pub source: AnswerSource,
    pub record: Record,
    /// Only registry answers carry freshness.
    pub freshness: Option<Freshness>,
    pub owner: Option<Arc<str>>,
    /// Wall-clock time from entry to result. Informational only.
    pub latency: Duration,
}

/// Routes a domain to the registry or to the cache/recursive path and
/// reconciles the answer into one [`Resolution`].
///
/// `Ok(None)` is the no-match outcome. The only error surfaced to the
/// caller is `InvalidDomainName`; every backend failure is written to the
/// activity log and turned into `Ok(None)`.
///
/// Every call writes exactly one activity log entry describing its outcome.
pub struct ResolveDomainUseCase {
    context: Arc<ResolverContext>,
    registry: Arc<RegistryClient>,
    recursive: Arc<dyn RecursiveResolver>,
    clock: Arc<dyn Clock>,
    ledger_suffix: Arc<str>,
    default_ttl: u64,
}

impl ResolveDomainUseCase {
    pub fn new(
        context: Arc<ResolverContext>,
        registry: Arc<RegistryClient>,
        recursive: Arc<dyn RecursiveResolver>,
        clock: Arc<dyn Clock>,
        ledger_suffix: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            context,
            registry,
            recursive,
            clock,
            ledger_suffix: ledger_suffix.into(),
            default_ttl: 3600,
        }
    }

    /// TTL stamped on recursive answers (default 3600s).
    pub fn with_default_ttl(mut self, ttl_secs: u64) -> Self {
        self.default_ttl = ttl_secs;
        self
    }

    pub fn ledger_suffix(&self) -> &str {
        &self.ledger_suffix
    }

    #[instrument(skip(self), fields(source = tracing::field::Empty))]
    pub async fn execute(&self, domain: &str) -> Result<Option<Resolution>, DomainError> {
        let started = Instant::now();
        self.context.metrics().record_query();
        debug!(domain, "Received query");

        let target = match QueryTarget::classify(domain, &self.ledger_suffix) {
            Ok(target) => target,
            Err(e) => {
                self.context.log(format!("Invalid domain name: '{domain}'"), Severity::Error);
                return Err(e);
            }
        };

        let resolution = match target {
            QueryTarget::Registry { label } => self.resolve_registry(label, started).await,
            QueryTarget::Conventional { name } => self.resolve_conventional(name, started).await,
        };

        if let Some(ref resolution) = resolution {
            tracing::Span::current().record("source", resolution.source.as_str());
        }

        Ok(resolution)
    }

    async fn resolve_registry(&self, label: Arc<str>, started: Instant) -> Option<Resolution> {
        let found = match self.probe_registry(&label).await {
            Ok(found) => found?,
            Err(e) => {
                self.context.log(
                    format!(
                        "Error querying registry for {label}: {e} ({})",
                        format_latency(started.elapsed())
                    ),
                    Severity::Error,
                );
                return None;
            }
        };

        let (fresh, owner) = found;
        self.context.metrics().record_blockchain_hit();
        self.context
            .upsert_snapshot_entry(
                &label,
                SnapshotEntry {
                    owner: Arc::clone(&owner),
                    records: vec![fresh.clone()],
                },
            )
            .await;

        let latency = started.elapsed();
        self.context.log(
            format!(
                "Found on ledger: {label} {} {} {} ({})",
                fresh.record.record_type,
                fresh.record.value,
                freshness_label(&fresh.freshness),
                format_latency(latency)
            ),
            Severity::Success,
        );

        Some(Resolution {
            domain: label,
            source: AnswerSource::Registry,
            record: fresh.record,
            freshness: Some(fresh.freshness),
            owner: Some(owner),
            latency,
        })
    }

    /// First-match probe: the first record type in probe order that holds a
    /// record wins. `Ok(None)` when the label is unregistered or empty.
    async fn probe_registry(
        &self,
        label: &str,
    ) -> Result<Option<(FreshRecord, Arc<str>)>, DomainError> {
        if !self.registry.is_registered(label).await? {
            self.context
                .log(format!("Domain {label} not registered"), Severity::Info);
            return Ok(None);
        }

        self.context.remember_domain(label).await;

        for record_type in RecordType::PROBE_ORDER {
            let record = match self.registry.record(label, record_type).await {
                Ok(Some(record)) => record,
                Ok(None) => continue,
                Err(e @ DomainError::InvalidRecordType(_)) => {
                    self.context.log(
                        format!("Skipping {record_type} slot of {label}: {e}"),
                        Severity::Error,
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };
            let owner = self.registry.owner(label).await?;
            let record = record.with_owner(Arc::clone(&owner));
            let fresh = FreshRecord::at(record, self.clock.now_secs());
            return Ok(Some((fresh, owner)));
        }

        self.context.log(
            format!("Domain {label} registered but has no records"),
            Severity::Info,
        );
        Ok(None)
    }

    async fn resolve_conventional(&self, name: Arc<str>, started: Instant) -> Option<Resolution> {
        if let Some(record) = self.context.cache().get(&name, self.clock.now_millis()) {
            self.context.metrics().record_cache_hit();
            let latency = started.elapsed();
            self.context.log(
                format!("Cache hit for {name} ({})", format_latency(latency)),
                Severity::Success,
            );
            return Some(Resolution {
                domain: name,
                source: AnswerSource::Cache,
                record,
                freshness: None,
                owner: None,
                latency,
            });
        }

        self.context.metrics().record_recursive_query();
        let answer = match self.recursive.lookup_a(&name).await {
            Ok(answer) => answer,
            Err(e) => {
                self.context.log(
                    format!(
                        "Failed to resolve {name}: {e} ({})",
                        format_latency(started.elapsed())
                    ),
                    Severity::Error,
                );
                return None;
            }
        };

        let now_ms = self.clock.now_millis();
        let record = Record::new(
            RecordType::A,
            answer.address.to_string(),
            self.default_ttl,
            now_ms / 1000,
        );
        self.context
            .cache()
            .put(&name, record.clone(), self.default_ttl, now_ms);

        self.context.log(
            format!(
                "Resolved {name} to {} via recursive DNS ({})",
                answer.address,
                format_latency(answer.latency)
            ),
            Severity::Success,
        );

        Some(Resolution {
            domain: name,
            source: AnswerSource::Recursive,
            record,
            freshness: None,
            owner: None,
            latency: started.elapsed(),
        })
    }
}

pub(crate) fn format_latency(latency: Duration) -> String {
    format!("{:.3}s", latency.as_secs_f64())
}

pub(crate) fn freshness_label(freshness: &Freshness) -> String {
    if freshness.expired {
        "(EXPIRED)".to_string()
    } else {
        format!("({}s left)", freshness.remaining)
    }
}
