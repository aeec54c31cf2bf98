use ledger_dns_application::ports::Clock;
use ledger_dns_application::services::ResolverContext;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Periodically drops expired cache entries.
///
/// Lookups already skip expired entries; the sweep reclaims entries for
/// names that are never asked for again.
pub struct CacheSweepJob {
    context: Arc<ResolverContext>,
    clock: Arc<dyn Clock>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheSweepJob {
    pub fn new(context: Arc<ResolverContext>, clock: Arc<dyn Clock>) -> Self {
        Self {
            context,
            clock,
            interval_secs: 60,
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

    /// Runs one sweep and returns how many entries were removed.
    pub fn sweep(&self) -> usize {
        let removed = self
            .context
            .cache()
            .purge_expired(self.clock.now_millis());
        if removed > 0 {
            debug!(removed, remaining = self.context.cache_len(), "Cache sweep");
        }
        removed
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting cache sweep job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs.max(1)));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CacheSweepJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        self.sweep();
                    }
                }
            }
        });
    }
}
