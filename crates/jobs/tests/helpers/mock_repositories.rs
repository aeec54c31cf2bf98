#![allow(dead_code)]

use async_trait::async_trait;
use ledger_dns_application::ports::{
    Clock, LedgerBinding, LedgerError, LedgerNetwork, LedgerRecord, RecursiveResolver, TxReceipt,
    UpstreamAnswer,
};
use ledger_dns_application::services::{RegistryClient, ResolverContext};
use ledger_dns_application::use_cases::ResolveDomainUseCase;
use ledger_dns_domain::{DomainError, KnownDomains};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    pub fn at(now_ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(now_ms),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now_ms.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// Answers every name with 10.0.0.1 and remembers what it was asked.
pub struct RecordingResolver {
    asked: Mutex<Vec<String>>,
}

impl RecordingResolver {
    pub fn new() -> Self {
        Self {
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecursiveResolver for RecordingResolver {
    async fn lookup_a(&self, domain: &str) -> Result<UpstreamAnswer, DomainError> {
        self.asked.lock().unwrap().push(domain.to_string());
        Ok(UpstreamAnswer {
            address: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
            latency: Duration::from_millis(1),
        })
    }
}

/// Ledger with nothing registered.
pub struct EmptyLedger;

#[async_trait]
impl LedgerBinding for EmptyLedger {
    async fn network(&self) -> Result<LedgerNetwork, LedgerError> {
        Ok(LedgerNetwork {
            name: "empty".to_string(),
            chain_id: 0,
        })
    }

    async fn contract_deployed(&self) -> Result<bool, LedgerError> {
        Ok(true)
    }

    fn signer(&self) -> Option<Arc<str>> {
        None
    }

    async fn is_domain_registered(&self, _domain: &str) -> Result<bool, LedgerError> {
        Ok(false)
    }

    async fn domain_owner(&self, _domain: &str) -> Result<String, LedgerError> {
        Err(LedgerError::NoData)
    }

    async fn record(&self, _domain: &str, _record_type: &str) -> Result<LedgerRecord, LedgerError> {
        Ok(LedgerRecord::absent())
    }

    async fn register_domain(&self, _domain: &str) -> Result<TxReceipt, LedgerError> {
        Err(LedgerError::ReadOnly)
    }

    async fn set_record(
        &self,
        _domain: &str,
        _record_type: &str,
        _value: &str,
        _ttl: u64,
    ) -> Result<TxReceipt, LedgerError> {
        Err(LedgerError::ReadOnly)
    }

    async fn delete_record(
        &self,
        _domain: &str,
        _record_type: &str,
    ) -> Result<TxReceipt, LedgerError> {
        Err(LedgerError::ReadOnly)
    }

    async fn transfer_domain(
        &self,
        _domain: &str,
        _new_owner: &str,
    ) -> Result<TxReceipt, LedgerError> {
        Err(LedgerError::ReadOnly)
    }
}

pub struct JobHarness {
    pub context: Arc<ResolverContext>,
    pub resolver: Arc<RecordingResolver>,
    pub clock: Arc<ManualClock>,
    pub resolve: Arc<ResolveDomainUseCase>,
}

impl JobHarness {
    pub fn new() -> Self {
        let context = Arc::new(ResolverContext::new(KnownDomains::default()));
        let resolver = Arc::new(RecordingResolver::new());
        let clock = Arc::new(ManualClock::at(1_700_000_000_000));
        let resolve = Arc::new(ResolveDomainUseCase::new(
            context.clone(),
            Arc::new(RegistryClient::new(Arc::new(EmptyLedger))),
            resolver.clone(),
            clock.clone(),
            "blockchain",
        ));

        Self {
            context,
            resolver,
            clock,
            resolve,
        }
    }
}
