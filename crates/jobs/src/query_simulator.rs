use ledger_dns_application::use_cases::ResolveDomainUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Resolves a randomly picked domain from a fixed list on every tick,
/// exercising the live resolution path.
///
/// The first query fires one full interval after `start`.
pub struct QuerySimulatorJob {
    resolve: Arc<ResolveDomainUseCase>,
    domains: Vec<String>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl QuerySimulatorJob {
    pub fn new(resolve: Arc<ResolveDomainUseCase>, domains: Vec<String>) -> Self {
        Self {
            resolve,
            domains,
            interval_secs: 8,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Uniform pick over the configured domains.
    pub fn pick_domain(&self) -> Option<&str> {
        if self.domains.is_empty() {
            return None;
        }
        Some(&self.domains[fastrand::usize(..self.domains.len())])
    }

    /// Resolves one picked domain. Returns `true` when it produced an answer.
    pub async fn run_once(&self) -> bool {
        let Some(domain) = self.pick_domain() else {
            return false;
        };

        match self.resolve.execute(domain).await {
            Ok(Some(resolution)) => {
                debug!(domain, source = resolution.source.as_str(), "Simulated query answered");
                true
            }
            Ok(None) => {
                debug!(domain, "Simulated query found no match");
                false
            }
            Err(e) => {
                warn!(domain, error = %e, "Simulated query failed");
                false
            }
        }
    }

    pub async fn start(self: Arc<Self>) {
        if self.domains.is_empty() || self.interval_secs == 0 {
            warn!("Query simulator has nothing to do; not starting");
            return;
        }

        info!(
            interval_secs = self.interval_secs,
            domains = self.domains.len(),
            "Starting query simulator job"
        );

        tokio::spawn(async move {
            let period = Duration::from_secs(self.interval_secs);
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("QuerySimulatorJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        self.run_once().await;
                    }
                }
            }
        });
    }
}
