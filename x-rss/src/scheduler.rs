use crate::config::{Config, ScheduleConfig};
use crate::pipeline::XRssPipeline;
use crate::storage::{self, StorageTarget};
use crate::types::{PipelineOutcome, Result};
use std::future::Future;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info};

/// One full run: build the pipeline and sink from `config`, generate, persist.
pub async fn run_once(config: &Config, target: StorageTarget) -> Result<PipelineOutcome> {
    let pipeline = XRssPipeline::from_config(config)?;
    let sink = storage::from_config(config, target)?;
    pipeline.run(sink.as_ref()).await
}

/// Fixed-interval trigger. A run always finishes before the next tick is awaited.
pub struct Scheduler {
    period: Duration,
    run_on_startup: bool,
}

impl Scheduler {
    pub fn new(period: Duration, run_on_startup: bool) -> Self {
        Self { period, run_on_startup }
    }

    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self::new(Duration::from_secs(config.interval_minutes.saturating_mul(60)), config.run_on_startup)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Call `job` on every tick until `shutdown` resolves. Returns how many runs completed.
    pub async fn run<F, Fut, S>(&self, mut job: F, shutdown: S) -> usize
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<PipelineOutcome>>,
        S: Future<Output = ()>,
    {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        // The first tick completes immediately.
        if !self.run_on_startup {
            ticker.tick().await;
        }

        info!("Scheduler started, running every {:?}", self.period);
        let mut runs = 0;
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Scheduler stopping after {} runs", runs);
                    break;
                }
                _ = ticker.tick() => {
                    match job().await {
                        Ok(outcome) => info!("Scheduled run finished: {}", describe(&outcome)),
                        Err(e) => error!("Error in scheduled run: {}", e),
                    }
                    runs += 1;
                }
            }
        }
        runs
    }
}

fn describe(outcome: &PipelineOutcome) -> String {
    match outcome {
        PipelineOutcome::Feed { items, .. } => format!("feed with {} items", items),
        PipelineOutcome::NoPosts => "no posts".to_string(),
        PipelineOutcome::FetchFailed(reason) => format!("fetch failed ({})", reason),
    }
}
