use serde::{Deserialize, Serialize};

/// TTL cache configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Interval between active sweeps of expired entries, in seconds.
    /// 0 disables sweeping; expired entries are then only replaced when the
    /// same name is resolved again.
    #[serde(default)]
    pub sweep_interval_secs: u64,
}
