use async_trait::async_trait;
use ledger_dns_domain::DomainError;
use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamAnswer {
    pub address: IpAddr,
    pub latency: Duration,
}

/// Single-record upstream lookup for names outside the ledger suffix.
///
/// One upstream request per call, no retries.
#[async_trait]
pub trait RecursiveResolver: Send + Sync {
    /// # Errors
    ///
    /// * `DomainError::UpstreamUnavailable` - transport failure or non-2xx status
    /// * `DomainError::NoAnswer` - the response carried no usable A answer
    /// * `DomainError::InvalidDnsResponse` - the response body could not be decoded
    async fn lookup_a(&self, domain: &str) -> Result<UpstreamAnswer, DomainError>;
}
