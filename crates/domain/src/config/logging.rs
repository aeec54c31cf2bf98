use super::ConfigError;
use serde::{Deserialize, Serialize};

const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Level name, or a full filter directive such as
    /// `"info,ledger_dns_application=debug"`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Newline-delimited JSON instead of human-readable lines.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Plain level names must be known; directives are checked when the
    /// subscriber is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.level.trim();
        if level.is_empty() {
            return Err(ConfigError::Validation(
                "logging.level cannot be empty".to_string(),
            ));
        }
        let is_directive = level.contains('=') || level.contains(',');
        if !is_directive && !LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level '{level}' is not one of {}",
                LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
