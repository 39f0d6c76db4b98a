use crate::pipeline::Pipeline;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

/// Recurring-timer wrapper around the pipeline.
///
/// Each tick attempts the shared single-flight guard; if a run is still in
/// flight (scheduled or on-demand) the tick is skipped and logged, never
/// queued. A failed run is logged and the scheduler goes back to waiting for
/// the next tick, with no immediate retry. Runs until the host process stops.
pub struct Scheduler {
    pipeline: Arc<Pipeline>,
    interval_minutes: u64,
}

impl Scheduler {
    pub fn new(pipeline: Arc<Pipeline>, interval_minutes: u64) -> Self {
        Self {
            pipeline,
            interval_minutes,
        }
    }

    pub async fn run(&self) {
        let mut ticker = interval(Duration::from_secs(self.interval_minutes * 60));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick of tokio's interval fires immediately; consume it so
        // the first run happens one full interval after startup.
        ticker.tick().await;

        info!(
            "Scheduler started, running pipeline every {} minutes",
            self.interval_minutes
        );

        loop {
            ticker.tick().await;
            match self.pipeline.try_run_once().await {
                Ok(Some(summary)) => {
                    info!(
                        "Scheduled run complete: read={} rejected={} stored={}",
                        summary.records_read, summary.records_rejected, summary.records_stored
                    );
                }
                Ok(None) => {
                    warn!("Skipping tick: a pipeline run is already in flight");
                }
                Err(e) => {
                    error!("Scheduled run failed: {}", e);
                }
            }
        }
    }
}
