//! Configuration module for Ledger DNS
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration and CLI overrides
//! - `registry`: Ledger registry backend and seed data
//! - `recursive`: Upstream DNS-over-HTTPS resolver
//! - `simulator`: Periodic self-query driver
//! - `cache`: TTL cache eviction policy
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod cache;
pub mod errors;
pub mod logging;
pub mod recursive;
pub mod registry;
pub mod root;
pub mod simulator;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use recursive::RecursiveConfig;
pub use registry::{LedgerBackend, RegistryConfig, SeedRecord};
pub use root::{CliOverrides, Config, DEFAULT_CONFIG_FILE};
pub use simulator::SimulatorConfig;
