use crate::config::Config;
use crate::error::ScanError;
use crate::worker::scan::{PassOutcome, ScanEngine};
use std::sync::Arc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Drives the scan engine on a fixed interval until cancelled or a pass fails fatally
pub struct TriggerLoop {
    engine: Arc<ScanEngine>,
    config: Arc<Config>,
    cancellation_token: CancellationToken,
}

impl TriggerLoop {
    pub fn new(config: Arc<Config>, cancellation_token: CancellationToken) -> Self {
        let engine = Arc::new(ScanEngine::new(config.clone()));
        Self { engine, config, cancellation_token }
    }

    pub fn engine(&self) -> Arc<ScanEngine> {
        self.engine.clone()
    }

    /// run - Tick every `trigger_interval`, running one pass per tick.
    ///
    /// Passes are awaited inline, so a slow pass delays the next tick and missed ticks are
    /// dropped. Cancellation is observed between passes, never inside one.
    /// Returns `Ok` on cancellation and the error of the first fatal pass otherwise.
    pub async fn run(&self) -> Result<(), ScanError> {
        let params = self.config.scan_params();
        let mut interval = tokio::time::interval(params.trigger_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            direction = %params.direction,
            interval_secs = params.trigger_interval.as_secs(),
            "Trigger loop started"
        );

        loop {
            tokio::select! {
                biased;
                _ = self.cancellation_token.cancelled() => {
                    info!(direction = %params.direction, "Trigger loop cancelled");
                    return Ok(());
                }
                _ = interval.tick() => {}
            }

            let span = info_span!("scan_pass", direction = %params.direction, pass_id = %Uuid::new_v4());
            match self.engine.run_scan_pass().instrument(span.clone()).await {
                Ok(PassOutcome::Skipped) => {}
                Ok(outcome) => {
                    span.in_scope(|| info!(outcome = outcome.label(), dispatched = outcome.dispatched(), "Scan pass finished"));
                }
                Err(e) if e.is_fatal() => {
                    span.in_scope(|| {
                        error!(error = %e, error_chain = ?e, stage = e.stage(), "Fatal scan error, stopping trigger loop")
                    });
                    return Err(e);
                }
                Err(e) => {
                    span.in_scope(|| warn!(error = %e, stage = e.stage(), "Scan pass aborted, retrying on next trigger"));
                }
            }
        }
    }
}
