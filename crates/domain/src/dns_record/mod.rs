pub mod freshness;
pub mod record;

pub use freshness::Freshness;
pub use record::{FreshRecord, Record};

use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record types the registry contract stores.
///
/// Variant order is the probe order used when resolving a ledger domain:
/// the first type holding a record wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    TXT,
    MX,
    NS,
    SOA,
    SRV,
}

impl RecordType {
    /// Fixed probe order for registry lookups.
    pub const PROBE_ORDER: [RecordType; 8] = [
        RecordType::A,
        RecordType::AAAA,
        RecordType::CNAME,
        RecordType::TXT,
        RecordType::MX,
        RecordType::NS,
        RecordType::SOA,
        RecordType::SRV,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
            RecordType::TXT => "TXT",
            RecordType::MX => "MX",
            RecordType::NS => "NS",
            RecordType::SOA => "SOA",
            RecordType::SRV => "SRV",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = DomainError;

    /// Case-insensitive. Anything outside the eight registry types is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RecordType::PROBE_ORDER
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::InvalidRecordType(s.to_string()))
    }
}
