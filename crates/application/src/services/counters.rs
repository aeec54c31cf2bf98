use ledger_dns_domain::CounterSnapshot;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic resolution counters.
///
/// Each counter is bumped exactly once per matching event. There is no
/// decrement and no reset.
#[derive(Debug, Default)]
pub struct ResolutionCounters {
    queries: AtomicU64,
    blockchain_hits: AtomicU64,
    recursive_queries: AtomicU64,
    cache_hits: AtomicU64,
}

impl ResolutionCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_query(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_blockchain_hit(&self) {
        self.blockchain_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_recursive_query(&self) {
        self.recursive_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            queries: self.queries.load(Ordering::Relaxed),
            blockchain_hits: self.blockchain_hits.load(Ordering::Relaxed),
            recursive_queries: self.recursive_queries.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
        }
    }
}
