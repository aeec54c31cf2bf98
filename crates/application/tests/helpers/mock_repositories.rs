#![allow(dead_code)]

use async_trait::async_trait;
use ledger_dns_application::ports::{
    Clock, LedgerBinding, LedgerError, LedgerNetwork, LedgerRecord, RecursiveResolver, TxReceipt,
    UpstreamAnswer,
};
use ledger_dns_application::services::{RegistryClient, ResolverContext};
use ledger_dns_application::use_cases::{RefreshSnapshotUseCase, ResolveDomainUseCase};
use ledger_dns_domain::{DomainError, KnownDomains};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub const OWNER: &str = "0x1234567890abcdef1234567890abcdef12345678";
pub const OTHER_OWNER: &str = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd";
pub const T0_MS: u64 = 1_700_000_000_000;

// ============================================================================
// Manual clock
// ============================================================================

pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    pub fn at(now_ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(now_ms),
        }
    }

    pub fn set_millis(&self, now_ms: u64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.now_ms
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Mock LedgerBinding
// ============================================================================

#[derive(Debug, Clone, Default)]
struct MockDomain {
    owner: String,
    records: HashMap<String, LedgerRecord>,
}

pub struct MockLedger {
    domains: Arc<RwLock<HashMap<String, MockDomain>>>,
    injected: Arc<RwLock<HashMap<(String, String), LedgerError>>>,
    failing_domains: Arc<RwLock<Vec<String>>>,
    registered_calls: Arc<RwLock<Vec<String>>>,
    signer: Option<Arc<str>>,
    deployed: AtomicBool,
    unreachable: AtomicBool,
    record_calls: AtomicU64,
    owner_calls: AtomicU64,
    write_calls: AtomicU64,
    tx_counter: AtomicU64,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            domains: Arc::new(RwLock::new(HashMap::new())),
            injected: Arc::new(RwLock::new(HashMap::new())),
            failing_domains: Arc::new(RwLock::new(Vec::new())),
            registered_calls: Arc::new(RwLock::new(Vec::new())),
            signer: None,
            deployed: AtomicBool::new(true),
            unreachable: AtomicBool::new(false),
            record_calls: AtomicU64::new(0),
            owner_calls: AtomicU64::new(0),
            write_calls: AtomicU64::new(0),
            tx_counter: AtomicU64::new(0),
        }
    }

    pub fn with_signer(mut self, signer: &str) -> Self {
        self.signer = Some(Arc::from(signer));
        self
    }

    pub async fn register(&self, domain: &str, owner: &str) {
        self.domains.write().await.insert(
            domain.to_string(),
            MockDomain {
                owner: owner.to_string(),
                records: HashMap::new(),
            },
        );
    }

    pub async fn add_record(
        &self,
        domain: &str,
        record_type: &str,
        value: &str,
        ttl: u64,
        last_updated: u64,
    ) {
        let mut domains = self.domains.write().await;
        let entry = domains.entry(domain.to_string()).or_insert_with(|| MockDomain {
            owner: OWNER.to_string(),
            records: HashMap::new(),
        });
        entry.records.insert(
            record_type.to_string(),
            LedgerRecord {
                record_type: record_type.to_string(),
                value: value.to_string(),
                ttl,
                last_updated,
                exists: true,
            },
        );
    }

    /// Stores a record under the `probed_as` slot whose tuple reports
    /// `stored_type`.
    pub async fn add_record_with_stored_type(
        &self,
        domain: &str,
        probed_as: &str,
        stored_type: &str,
        value: &str,
        ttl: u64,
        last_updated: u64,
    ) {
        self.add_record(domain, probed_as, value, ttl, last_updated)
            .await;
        if let Some(record) = self
            .domains
            .write()
            .await
            .get_mut(domain)
            .and_then(|d| d.records.get_mut(probed_as))
        {
            record.record_type = stored_type.to_string();
        }
    }

    /// Makes `record(domain, record_type)` fail with `error`.
    pub async fn inject_record_error(&self, domain: &str, record_type: &str, error: LedgerError) {
        self.injected
            .write()
            .await
            .insert((domain.to_string(), record_type.to_string()), error);
    }

    /// Makes every read for `domain` fail with a transport error.
    pub async fn fail_domain(&self, domain: &str) {
        self.failing_domains.write().await.push(domain.to_string());
    }

    pub fn set_deployed(&self, deployed: bool) {
        self.deployed.store(deployed, Ordering::SeqCst);
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    pub async fn registration_checks(&self) -> Vec<String> {
        self.registered_calls.read().await.clone()
    }

    pub async fn is_registered_calls(&self) -> usize {
        self.registered_calls.read().await.len()
    }

    pub fn record_calls(&self) -> u64 {
        self.record_calls.load(Ordering::SeqCst)
    }

    pub fn owner_calls(&self) -> u64 {
        self.owner_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> u64 {
        self.write_calls.load(Ordering::SeqCst)
    }

    pub async fn owner_of(&self, domain: &str) -> Option<String> {
        self.domains.read().await.get(domain).map(|d| d.owner.clone())
    }

    async fn check_failing(&self, domain: &str) -> Result<(), LedgerError> {
        if self.failing_domains.read().await.iter().any(|d| d == domain) {
            return Err(LedgerError::Transport("connection reset".to_string()));
        }
        Ok(())
    }

    fn receipt(&self) -> TxReceipt {
        let n = self.tx_counter.fetch_add(1, Ordering::SeqCst) + 1;
        TxReceipt {
            tx_hash: format!("0x{n:064x}"),
        }
    }
}

#[async_trait]
impl LedgerBinding for MockLedger {
    async fn network(&self) -> Result<LedgerNetwork, LedgerError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(LedgerError::Transport("connection refused".to_string()));
        }
        Ok(LedgerNetwork {
            name: "testnet".to_string(),
            chain_id: 31337,
        })
    }

    async fn contract_deployed(&self) -> Result<bool, LedgerError> {
        Ok(self.deployed.load(Ordering::SeqCst))
    }

    fn signer(&self) -> Option<Arc<str>> {
        self.signer.clone()
    }

    async fn is_domain_registered(&self, domain: &str) -> Result<bool, LedgerError> {
        tokio::task::yield_now().await;
        self.registered_calls.write().await.push(domain.to_string());
        self.check_failing(domain).await?;
        Ok(self.domains.read().await.contains_key(domain))
    }

    async fn domain_owner(&self, domain: &str) -> Result<String, LedgerError> {
        self.owner_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing(domain).await?;
        self.domains
            .read()
            .await
            .get(domain)
            .map(|d| d.owner.clone())
            .ok_or_else(|| LedgerError::Reverted("domain not registered".to_string()))
    }

    async fn record(&self, domain: &str, record_type: &str) -> Result<LedgerRecord, LedgerError> {
        self.record_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing(domain).await?;
        if let Some(error) = self
            .injected
            .read()
            .await
            .get(&(domain.to_string(), record_type.to_string()))
        {
            return Err(error.clone());
        }

        Ok(self
            .domains
            .read()
            .await
            .get(domain)
            .and_then(|d| d.records.get(record_type).cloned())
            .unwrap_or_else(LedgerRecord::absent))
    }

    async fn register_domain(&self, domain: &str) -> Result<TxReceipt, LedgerError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let signer = self.signer.clone().ok_or(LedgerError::ReadOnly)?;
        let mut domains = self.domains.write().await;
        if domains.contains_key(domain) {
            return Err(LedgerError::Reverted("domain already registered".to_string()));
        }
        domains.insert(
            domain.to_string(),
            MockDomain {
                owner: signer.to_string(),
                records: HashMap::new(),
            },
        );
        Ok(self.receipt())
    }

    async fn set_record(
        &self,
        domain: &str,
        record_type: &str,
        value: &str,
        ttl: u64,
    ) -> Result<TxReceipt, LedgerError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let mut domains = self.domains.write().await;
        let entry = domains
            .get_mut(domain)
            .ok_or_else(|| LedgerError::Reverted("domain not registered".to_string()))?;
        entry.records.insert(
            record_type.to_string(),
            LedgerRecord {
                record_type: record_type.to_string(),
                value: value.to_string(),
                ttl,
                last_updated: T0_MS / 1000,
                exists: true,
            },
        );
        Ok(self.receipt())
    }

    async fn delete_record(
        &self,
        domain: &str,
        record_type: &str,
    ) -> Result<TxReceipt, LedgerError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let mut domains = self.domains.write().await;
        let entry = domains
            .get_mut(domain)
            .ok_or_else(|| LedgerError::Reverted("domain not registered".to_string()))?;
        entry
            .records
            .remove(record_type)
            .ok_or_else(|| LedgerError::Reverted("record does not exist".to_string()))?;
        Ok(self.receipt())
    }

    async fn transfer_domain(
        &self,
        domain: &str,
        new_owner: &str,
    ) -> Result<TxReceipt, LedgerError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let mut domains = self.domains.write().await;
        let entry = domains
            .get_mut(domain)
            .ok_or_else(|| LedgerError::Reverted("domain not registered".to_string()))?;
        entry.owner = new_owner.to_string();
        Ok(self.receipt())
    }
}

// ============================================================================
// Mock RecursiveResolver
// ============================================================================

pub struct MockRecursiveResolver {
    answers: Arc<RwLock<HashMap<String, IpAddr>>>,
    should_fail: AtomicBool,
    call_count: AtomicU64,
}

impl MockRecursiveResolver {
    pub fn new() -> Self {
        Self {
            answers: Arc::new(RwLock::new(HashMap::new())),
            should_fail: AtomicBool::new(false),
            call_count: AtomicU64::new(0),
        }
    }

    pub async fn set_answer(&self, domain: &str, address: &str) {
        self.answers
            .write()
            .await
            .insert(domain.to_string(), address.parse().unwrap());
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecursiveResolver for MockRecursiveResolver {
    async fn lookup_a(&self, domain: &str) -> Result<UpstreamAnswer, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::UpstreamUnavailable(
                "DNS query failed: 503".to_string(),
            ));
        }

        self.answers
            .read()
            .await
            .get(domain)
            .map(|address| UpstreamAnswer {
                address: *address,
                latency: Duration::from_millis(12),
            })
            .ok_or_else(|| DomainError::NoAnswer(domain.to_string()))
    }
}

// ============================================================================
// Wiring
// ============================================================================

pub struct Harness {
    pub context: Arc<ResolverContext>,
    pub ledger: Arc<MockLedger>,
    pub recursive: Arc<MockRecursiveResolver>,
    pub clock: Arc<ManualClock>,
    pub registry: Arc<RegistryClient>,
    pub resolve: ResolveDomainUseCase,
    pub refresh: Arc<RefreshSnapshotUseCase>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_ledger(MockLedger::new(), &[])
    }

    pub fn with_ledger(ledger: MockLedger, seed: &[&str]) -> Self {
        let context = Arc::new(ResolverContext::new(KnownDomains::from_seed(
            seed.iter().copied(),
        )));
        let ledger = Arc::new(ledger);
        let recursive = Arc::new(MockRecursiveResolver::new());
        let clock = Arc::new(ManualClock::at(T0_MS));
        let registry = Arc::new(RegistryClient::new(ledger.clone()));

        let resolve = ResolveDomainUseCase::new(
            context.clone(),
            registry.clone(),
            recursive.clone(),
            clock.clone(),
            "blockchain",
        );
        let refresh = Arc::new(RefreshSnapshotUseCase::new(
            context.clone(),
            registry.clone(),
            clock.clone(),
        ));

        Self {
            context,
            ledger,
            recursive,
            clock,
            registry,
            resolve,
            refresh,
        }
    }

    pub fn now_secs(&self) -> u64 {
        self.clock.now_secs()
    }
}
