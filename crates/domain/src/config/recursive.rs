use serde::{Deserialize, Serialize};

/// Upstream resolver used for every name outside the ledger suffix
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecursiveConfig {
    /// JSON DNS-over-HTTPS endpoint (`?name=...&type=A`, `application/dns-json`)
    #[serde(default = "default_doh_url")]
    pub doh_url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// TTL stamped on recursive answers and used for their cache expiry
    #[serde(default = "default_ttl")]
    pub default_ttl: u64,
}

impl Default for RecursiveConfig {
    fn default() -> Self {
        Self {
            doh_url: default_doh_url(),
            timeout_ms: default_timeout_ms(),
            default_ttl: default_ttl(),
        }
    }
}

fn default_doh_url() -> String {
    "https://cloudflare-dns.com/dns-query".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_ttl() -> u64 {
    3600
}
