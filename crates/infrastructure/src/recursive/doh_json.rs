use async_trait::async_trait;
use ledger_dns_application::ports::{RecursiveResolver, UpstreamAnswer};
use ledger_dns_domain::DomainError;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::time::{Duration, Instant};
use tracing::debug;

/// Media type of the JSON flavour of DNS-over-HTTPS.
pub const DNS_JSON_CONTENT_TYPE: &str = "application/dns-json";

/// RR type code of an A record.
const TYPE_A: u16 = 1;

#[derive(Debug, Deserialize)]
struct DohJsonResponse {
    #[serde(rename = "Answer", default)]
    answer: Vec<DohJsonAnswer>,
}

#[derive(Debug, Deserialize)]
struct DohJsonAnswer {
    #[serde(rename = "type")]
    record_type: u16,
    #[serde(default)]
    data: String,
}

/// Recursive lookups over a DoH JSON endpoint (`GET ?name=..&type=A`).
pub struct DohJsonResolver {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl DohJsonResolver {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| DomainError::UpstreamUnavailable(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RecursiveResolver for DohJsonResolver {
    async fn lookup_a(&self, domain: &str) -> Result<UpstreamAnswer, DomainError> {
        let started = Instant::now();
        let url = reqwest::Url::parse_with_params(&self.url, &[("name", domain), ("type", "A")])
            .map_err(|e| {
                DomainError::UpstreamUnavailable(format!("invalid DoH URL {}: {e}", self.url))
            })?;

        debug!(url = %url, "Sending DoH JSON query");

        let response = tokio::time::timeout(
            self.timeout,
            self.client
                .get(url)
                .header(reqwest::header::ACCEPT, DNS_JSON_CONTENT_TYPE)
                .send(),
        )
        .await
        .map_err(|_| {
            DomainError::UpstreamUnavailable(format!("timeout querying {}", self.url))
        })?
        .map_err(|e| DomainError::UpstreamUnavailable(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::UpstreamUnavailable(format!(
                "DNS query failed: {}",
                status.as_u16()
            )));
        }

        let body = tokio::time::timeout(self.timeout, response.bytes())
            .await
            .map_err(|_| {
                DomainError::UpstreamUnavailable(format!(
                    "timeout reading response from {}",
                    self.url
                ))
            })?
            .map_err(|e| DomainError::UpstreamUnavailable(format!("reading response: {e}")))?;

        let address = parse_answer(domain, &body)?;
        let latency = started.elapsed();

        debug!(domain, %address, latency_ms = latency.as_millis() as u64, "DoH answer");

        Ok(UpstreamAnswer { address, latency })
    }
}

/// Picks the first A answer out of a DoH JSON body.
///
/// Answers of other types (CNAME chains, etc.) are skipped. A first A answer
/// whose data is not an IPv4 address counts as no answer.
pub fn parse_answer(domain: &str, body: &[u8]) -> Result<IpAddr, DomainError> {
    let response: DohJsonResponse = serde_json::from_slice(body)
        .map_err(|e| DomainError::InvalidDnsResponse(e.to_string()))?;

    let answer = response
        .answer
        .iter()
        .find(|a| a.record_type == TYPE_A)
        .ok_or_else(|| DomainError::NoAnswer(domain.to_string()))?;

    answer
        .data
        .trim()
        .parse::<Ipv4Addr>()
        .map(IpAddr::V4)
        .map_err(|_| {
            debug!(domain, data = %answer.data, "A answer data is not an IPv4 address");
            DomainError::NoAnswer(domain.to_string())
        })
}
