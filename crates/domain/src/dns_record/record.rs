use super::{Freshness, RecordType};
use serde::Serialize;
use std::sync::Arc;

/// A single DNS-like record, either read from the registry or synthesized
/// from a recursive answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub record_type: RecordType,
    pub value: Arc<str>,
    /// Original lifetime in seconds, as written.
    pub ttl: u64,
    /// Epoch seconds of the last write.
    pub last_updated: u64,
    pub owner: Option<Arc<str>>,
}

impl Record {
    pub fn new(
        record_type: RecordType,
        value: impl Into<Arc<str>>,
        ttl: u64,
        last_updated: u64,
    ) -> Self {
        Self {
            record_type,
            value: value.into(),
            ttl,
            last_updated,
            owner: None,
        }
    }

    pub fn with_owner(mut self, owner: impl Into<Arc<str>>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn freshness(&self, now_secs: u64) -> Freshness {
        Freshness::compute(self.ttl, self.last_updated, now_secs)
    }
}

/// A record paired with the freshness computed at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreshRecord {
    pub record: Record,
    pub freshness: Freshness,
}

impl FreshRecord {
    pub fn at(record: Record, now_secs: u64) -> Self {
        let freshness = record.freshness(now_secs);
        Self { record, freshness }
    }
}
