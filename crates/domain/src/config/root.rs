use super::{
    CacheConfig, ConfigError, LedgerBackend, LoggingConfig, RecursiveConfig, RegistryConfig,
    SimulatorConfig,
};
use crate::RecordType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "ledger-dns.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub recursive: RecursiveConfig,

    #[serde(default)]
    pub simulator: SimulatorConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub backend: Option<LedgerBackend>,
    pub ledger_suffix: Option<String>,
    pub rpc_url: Option<String>,
    pub contract_address: Option<String>,
    pub signer: Option<String>,
    pub doh_url: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Loads configuration from `config_path`, or from [`DEFAULT_CONFIG_FILE`]
    /// when it exists, or falls back to defaults. CLI overrides are applied
    /// last.
    ///
    /// An explicitly given path that cannot be read is an error.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(backend) = overrides.backend {
            self.registry.backend = backend;
        }
        if let Some(suffix) = overrides.ledger_suffix {
            self.registry.ledger_suffix = suffix;
        }
        if let Some(rpc_url) = overrides.rpc_url {
            self.registry.rpc_url = rpc_url;
        }
        if let Some(address) = overrides.contract_address {
            self.registry.contract_address = address;
        }
        if let Some(signer) = overrides.signer {
            self.registry.signer = Some(signer);
        }
        if let Some(doh_url) = overrides.doh_url {
            self.recursive.doh_url = doh_url;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let suffix = self.registry.ledger_suffix.trim();
        if suffix.is_empty() || suffix.contains('.') {
            return Err(ConfigError::Validation(format!(
                "ledger_suffix must be a single non-empty label, got '{}'",
                self.registry.ledger_suffix
            )));
        }

        validate_url("recursive.doh_url", &self.recursive.doh_url)?;
        if self.registry.backend == LedgerBackend::JsonRpc {
            validate_url("registry.rpc_url", &self.registry.rpc_url)?;
        }

        if self.recursive.default_ttl == 0 {
            return Err(ConfigError::Validation(
                "recursive.default_ttl must be greater than 0".to_string(),
            ));
        }
        if self.recursive.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "recursive.timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.simulator.enabled {
            if self.simulator.interval_secs == 0 {
                return Err(ConfigError::Validation(
                    "simulator.interval_secs must be greater than 0".to_string(),
                ));
            }
            if self.simulator.domains.is_empty() {
                return Err(ConfigError::Validation(
                    "simulator.domains cannot be empty when the simulator is enabled".to_string(),
                ));
            }
        }

        self.logging.validate()?;

        for record in &self.registry.records {
            if record.domain.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "registry.records entries need a domain".to_string(),
                ));
            }
            RecordType::from_str(&record.record_type).map_err(|e| {
                ConfigError::Validation(format!("registry.records '{}': {}", record.domain, e))
            })?;
        }

        Ok(())
    }
}

fn validate_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}
