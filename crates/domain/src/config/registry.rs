use serde::{Deserialize, Serialize};

/// Which ledger binding backs the registry client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LedgerBackend {
    /// Process-local ledger seeded from `[[registry.records]]`
    #[default]
    Memory,
    /// Read-only Ethereum JSON-RPC contract binding
    JsonRpc,
}

impl LedgerBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerBackend::Memory => "memory",
            LedgerBackend::JsonRpc => "json-rpc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Some(LedgerBackend::Memory),
            "json-rpc" | "jsonrpc" | "rpc" => Some(LedgerBackend::JsonRpc),
            _ => None,
        }
    }
}

/// Registry record seeded into the in-memory ledger at startup
///
/// The domain is registered to `owner` (or to the configured signer when
/// absent) and the record is stamped with the startup time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedRecord {
    /// Label without the ledger suffix (e.g., "mysite")
    pub domain: String,

    #[serde(default)]
    pub owner: Option<String>,

    /// One of A, AAAA, CNAME, TXT, MX, NS, SOA, SRV
    pub record_type: String,

    pub value: String,

    #[serde(default = "default_record_ttl")]
    pub ttl: u64,
}

/// Ledger registry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub backend: LedgerBackend,

    /// Reserved pseudo-TLD routed to the registry (e.g., "blockchain")
    #[serde(default = "default_ledger_suffix")]
    pub ledger_suffix: String,

    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    #[serde(default = "default_contract_address")]
    pub contract_address: String,

    /// Identity allowed to sign mutations. Empty means read-only.
    #[serde(default)]
    pub signer: Option<String>,

    /// Labels probed by the snapshot loader before any query discovered them
    #[serde(default = "default_seed_domains")]
    pub seed_domains: Vec<String>,

    #[serde(default)]
    pub records: Vec<SeedRecord>,
}

impl RegistryConfig {
    /// Signer identity, treating an empty string as "none".
    pub fn signer(&self) -> Option<&str> {
        self.signer
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            backend: LedgerBackend::default(),
            ledger_suffix: default_ledger_suffix(),
            rpc_url: default_rpc_url(),
            contract_address: default_contract_address(),
            signer: None,
            seed_domains: default_seed_domains(),
            records: Vec::new(),
        }
    }
}

fn default_ledger_suffix() -> String {
    "blockchain".to_string()
}

fn default_rpc_url() -> String {
    "https://sepolia.infura.io/v3/YOUR_INFURA_KEY".to_string()
}

fn default_contract_address() -> String {
    "0x0000000000000000000000000000000000000000".to_string()
}

fn default_seed_domains() -> Vec<String> {
    ["example", "test", "mysite", "wallet", "dapp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_record_ttl() -> u64 {
    3600
}
