use super::{ResolutionCounters, TtlCache};
use ledger_dns_domain::{
    ActivityLog, CounterSnapshot, KnownDomains, LogEntry, RegistrySnapshot, Severity,
    SnapshotEntry,
};
use std::sync::{Mutex, PoisonError};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// All mutable state of the resolution engine, owned by one instance and
/// shared by reference between the router, the snapshot loader and the
/// mutation use cases.
///
/// Overlapping resolutions are neither serialized nor coalesced: two
/// in-flight lookups of the same name both reach their backend and the last
/// cache write wins.
pub struct ResolverContext {
    cache: TtlCache,
    counters: ResolutionCounters,
    snapshot: RwLock<RegistrySnapshot>,
    known_domains: RwLock<KnownDomains>,
    log: Mutex<ActivityLog>,
}

impl ResolverContext {
    pub fn new(known_domains: KnownDomains) -> Self {
        Self {
            cache: TtlCache::new(),
            counters: ResolutionCounters::new(),
            snapshot: RwLock::new(RegistrySnapshot::new()),
            known_domains: RwLock::new(known_domains),
            log: Mutex::new(ActivityLog::new()),
        }
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn metrics(&self) -> &ResolutionCounters {
        &self.counters
    }

    pub fn counters(&self) -> CounterSnapshot {
        self.counters.snapshot()
    }

    /// Appends to the activity log and mirrors the entry to `tracing`.
    pub fn log(&self, message: impl Into<String>, severity: Severity) {
        let entry = LogEntry::new(message, severity);
        match severity {
            Severity::Info => info!(target: "activity", severity = "info", "{}", entry.message),
            Severity::Success => {
                info!(target: "activity", severity = "success", "{}", entry.message)
            }
            Severity::Error => warn!(target: "activity", severity = "error", "{}", entry.message),
        }
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    pub fn log_entries(&self) -> Vec<LogEntry> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .to_vec()
    }

    pub async fn snapshot(&self) -> RegistrySnapshot {
        self.snapshot.read().await.clone()
    }

    pub async fn replace_snapshot(&self, snapshot: RegistrySnapshot) {
        *self.snapshot.write().await = snapshot;
    }

    pub async fn upsert_snapshot_entry(&self, domain: &str, entry: SnapshotEntry) {
        self.snapshot.write().await.upsert(domain, entry);
    }

    /// Returns `true` if the domain was not known before.
    pub async fn remember_domain(&self, domain: &str) -> bool {
        self.known_domains.write().await.insert(domain)
    }

    pub async fn known_domains(&self) -> Vec<String> {
        self.known_domains.read().await.to_vec()
    }
}

impl Default for ResolverContext {
    fn default() -> Self {
        Self::new(KnownDomains::new())
    }
}
