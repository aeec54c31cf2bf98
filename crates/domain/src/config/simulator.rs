use serde::{Deserialize, Serialize};

/// Periodic self-query driver
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulatorConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Names picked from at random on every tick
    #[serde(default = "default_domains")]
    pub domains: Vec<String>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: default_interval_secs(),
            domains: default_domains(),
        }
    }
}

fn default_interval_secs() -> u64 {
    8
}

fn default_domains() -> Vec<String> {
    vec![
        "api.service.com".to_string(),
        "cdn.example.com".to_string(),
        "test.blockchain".to_string(),
        "google.com".to_string(),
    ]
}
