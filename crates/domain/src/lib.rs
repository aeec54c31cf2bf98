//! Ledger DNS Domain Layer
pub mod activity_log;
pub mod config;
pub mod dns_record;
pub mod domain_name;
pub mod errors;
pub mod registry_snapshot;
pub mod stats;

pub use activity_log::{ActivityLog, LogEntry, Severity, ACTIVITY_LOG_CAPACITY};
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::{Freshness, FreshRecord, Record, RecordType};
pub use domain_name::{registry_label, QueryTarget};
pub use errors::DomainError;
pub use registry_snapshot::{abbreviate_identity, KnownDomains, RegistrySnapshot, SnapshotEntry};
pub use stats::CounterSnapshot;
