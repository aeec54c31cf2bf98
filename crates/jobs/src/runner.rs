use crate::{CacheSweepJob, QuerySimulatorJob};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Starts the background jobs that are registered and shares one shutdown
/// token between them.
///
/// ```rust,ignore
/// let shutdown = CancellationToken::new();
/// JobRunner::new(shutdown.clone())
///     .with_query_simulator(QuerySimulatorJob::new(resolve, domains))
///     .with_cache_sweep(CacheSweepJob::new(context, clock).with_interval(60))
///     .start()
///     .await;
/// // later
/// shutdown.cancel();
/// ```
pub struct JobRunner {
    shutdown: CancellationToken,
    query_simulator: Option<QuerySimulatorJob>,
    cache_sweep: Option<CacheSweepJob>,
}

impl JobRunner {
    pub fn new(shutdown: CancellationToken) -> Self {
        Self {
            shutdown,
            query_simulator: None,
            cache_sweep: None,
        }
    }

    pub fn with_query_simulator(mut self, job: QuerySimulatorJob) -> Self {
        self.query_simulator = Some(job);
        self
    }

    pub fn with_cache_sweep(mut self, job: CacheSweepJob) -> Self {
        self.cache_sweep = Some(job);
        self
    }

    /// Returns how many jobs were handed to the runtime.
    pub async fn start(self) -> usize {
        let mut started = 0;

        if let Some(job) = self.query_simulator {
            Arc::new(job.with_cancellation(self.shutdown.clone()))
                .start()
                .await;
            started += 1;
        }

        if let Some(job) = self.cache_sweep {
            Arc::new(job.with_cancellation(self.shutdown.clone()))
                .start()
                .await;
            started += 1;
        }

        info!(jobs = started, "Background jobs started");
        started
    }
}
