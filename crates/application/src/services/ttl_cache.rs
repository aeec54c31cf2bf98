use dashmap::DashMap;
use ledger_dns_domain::Record;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub record: Record,
    pub expires_at_ms: u64,
}

impl CacheEntry {
    /// Live while `now_ms` is strictly before the expiry instant.
    #[inline]
    pub fn is_live(&self, now_ms: u64) -> bool {
        now_ms < self.expires_at_ms
    }
}

/// Recursive answers keyed by normalized domain, with absolute expiry.
///
/// Eviction is lazy: `get` treats an expired slot as a miss but leaves it in
/// place until the next `put` for the same name overwrites it, or until
/// `purge_expired` runs. Registry answers never enter this cache.
#[derive(Debug, Default)]
pub struct TtlCache {
    entries: DashMap<Arc<str>, CacheEntry>,
}

impl TtlCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, domain: &str, now_ms: u64) -> Option<Record> {
        let entry = self.entries.get(domain)?;
        if entry.is_live(now_ms) {
            Some(entry.record.clone())
        } else {
            None
        }
    }

    /// Inserts or replaces the slot for `domain`, expiring at
    /// `now_ms + ttl_secs * 1000`. Last writer wins.
    pub fn put(&self, domain: &str, record: Record, ttl_secs: u64, now_ms: u64) {
        let expires_at_ms = now_ms.saturating_add(ttl_secs.saturating_mul(1000));
        self.entries.insert(
            Arc::from(domain),
            CacheEntry {
                record,
                expires_at_ms,
            },
        );
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&self, now_ms: u64) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            if entry.is_live(now_ms) {
                true
            } else {
                removed += 1;
                false
            }
        });
        removed
    }

    /// Number of slots, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
