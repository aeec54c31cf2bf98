use crate::dns_record::FreshRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shortens a ledger identity for display: `0x1234...abcd`.
///
/// Identities shorter than a full 42-character address are returned as-is.
pub fn abbreviate_identity(identity: &str) -> String {
    if identity.len() < 42 || !identity.is_ascii() {
        return identity.to_string();
    }
    format!("{}...{}", &identity[..6], &identity[38..])
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotEntry {
    pub owner: Arc<str>,
    pub records: Vec<FreshRecord>,
}

impl SnapshotEntry {
    pub fn owner_display(&self) -> String {
        abbreviate_identity(&self.owner)
    }
}

/// Materialized view of every known registry domain and its records,
/// keyed by lower-case label without the ledger suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrySnapshot {
    entries: BTreeMap<String, SnapshotEntry>,
}

impl RegistrySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entry for `domain`.
    pub fn upsert(&mut self, domain: impl Into<String>, entry: SnapshotEntry) {
        self.entries.insert(domain.into(), entry);
    }

    pub fn get(&self, domain: &str) -> Option<&SnapshotEntry> {
        self.entries.get(domain)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SnapshotEntry)> {
        self.entries.iter()
    }
}

/// Registry labels discovered so far, in discovery order.
///
/// Grows monotonically; nothing prunes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownDomains {
    domains: Vec<String>,
}

impl KnownDomains {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed<I, S>(seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut known = Self::new();
        for domain in seed {
            known.insert(domain.as_ref());
        }
        known
    }

    /// Returns `true` if the domain was not known before.
    pub fn insert(&mut self, domain: &str) -> bool {
        let domain = domain.trim().to_lowercase();
        if domain.is_empty() || self.contains(&domain) {
            return false;
        }
        self.domains.push(domain);
        true
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.domains.clone()
    }
}
