use serde::Serialize;

/// Point-in-time copy of the resolution counters.
///
/// `queries` is not guaranteed to equal the sum of the other three: a query can
/// end on no path at all, e.g. an unregistered ledger domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CounterSnapshot {
    pub queries: u64,
    pub blockchain_hits: u64,
    pub recursive_queries: u64,
    pub cache_hits: u64,
}
