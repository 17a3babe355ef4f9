use crate::config::Config;
use crate::core::client::database::DatabaseError;
use crate::core::client::frontier::FrontierError;
use crate::core::client::queue::QueueError;
use crate::error::ScanError;
use crate::types::direction::ScanDirection;
use crate::types::work_item::WorkItem;
use crate::utils::metrics::PRODUCER_METRICS;
use opentelemetry::KeyValue;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How a scan pass ended when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// `max_batch` blocks were dispatched, the bound was not reached
    Completed { dispatched: u64 },
    /// The next candidate lies past the frontier (forward) or the floor (backward).
    /// `candidate` is `None` when a backward scan would step below block 0.
    BoundaryStopped { dispatched: u64, candidate: Option<u64> },
    /// Another pass was still running
    Skipped,
}

impl PassOutcome {
    pub fn dispatched(&self) -> u64 {
        match self {
            PassOutcome::Completed { dispatched } | PassOutcome::BoundaryStopped { dispatched, .. } => *dispatched,
            PassOutcome::Skipped => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PassOutcome::Completed { .. } => "completed",
            PassOutcome::BoundaryStopped { .. } => "boundary_stopped",
            PassOutcome::Skipped => "skipped",
        }
    }
}

/// Resets the in-progress flag however the pass ends
struct PassGuard<'a>(&'a AtomicBool);

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Awaits `fut` for at most `limit`, mapping expiry through `on_timeout`
async fn bounded<T, E, F>(limit: Duration, fut: F, on_timeout: fn(Duration) -> E) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(on_timeout(limit)),
    }
}

/// Cursor advancement engine for a single scan direction.
///
/// A pass reads the frontier once, then repeatedly reads the cursor, derives the next
/// candidate block, sends it and persists it. The cursor is written only after the queue
/// accepted the block, so a failure at any point leaves the failed block as the next
/// candidate of the following pass.
pub struct ScanEngine {
    config: Arc<Config>,
    in_progress: AtomicBool,
}

impl ScanEngine {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config, in_progress: AtomicBool::new(false) }
    }

    pub fn direction(&self) -> ScanDirection {
        self.config.scan_params().direction
    }

    pub fn is_running(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// run_scan_pass - Dispatch up to `max_batch` blocks.
    ///
    /// Returns `Skipped` without touching any collaborator when a pass is already running.
    /// Blocks dispatched before an error stay committed.
    pub async fn run_scan_pass(&self) -> Result<PassOutcome, ScanError> {
        let direction = self.direction();
        if self.in_progress.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_err() {
            warn!(direction = %direction, "Scan pass already in progress, skipping trigger");
            PRODUCER_METRICS.scan_passes.add(1, &[
                KeyValue::new("direction", direction.to_string()),
                KeyValue::new("outcome", PassOutcome::Skipped.label()),
            ]);
            return Ok(PassOutcome::Skipped);
        }
        let _guard = PassGuard(&self.in_progress);

        let result = self.scan(direction).await;
        let outcome_label = match &result {
            Ok(outcome) => outcome.label(),
            Err(_) => "aborted",
        };
        PRODUCER_METRICS.scan_passes.add(1, &[
            KeyValue::new("direction", direction.to_string()),
            KeyValue::new("outcome", outcome_label),
        ]);
        result
    }

    async fn scan(&self, direction: ScanDirection) -> Result<PassOutcome, ScanError> {
        let params = self.config.scan_params();

        let frontier = bounded(params.call_timeout, self.config.frontier().latest_block_number(), FrontierError::Timeout)
            .await
            .map_err(|source| ScanError::FrontierUnavailable { direction, source })?;
        debug!(direction = %direction, frontier, "Frontier fetched");

        let mut dispatched = 0;
        while dispatched < params.max_batch {
            let cursor = bounded(params.call_timeout, self.config.cursor_store().get_cursor(direction), DatabaseError::Timeout)
                .await
                .map_err(|source| ScanError::Store { direction, operation: "get_cursor", block_num: None, source })?;

            let (candidate, seed) = match cursor {
                None => (params.start_block, true),
                Some(record) => match direction.step(record.block_num) {
                    Some(next) => (next, false),
                    None if direction == ScanDirection::Forward => {
                        return Err(ScanError::CursorOverflow { direction, block_num: record.block_num });
                    }
                    None => {
                        info!(direction = %direction, dispatched, "Cursor at block 0, nothing left below");
                        return Ok(PassOutcome::BoundaryStopped { dispatched, candidate: None });
                    }
                },
            };

            if direction.is_past_boundary(candidate, frontier, params.end_block) {
                info!(
                    direction = %direction,
                    block_num = candidate,
                    frontier,
                    end_block = params.end_block,
                    dispatched,
                    "Boundary reached, stopping pass"
                );
                return Ok(PassOutcome::BoundaryStopped { dispatched, candidate: Some(candidate) });
            }

            self.dispatch(direction, candidate).await?;
            self.persist(direction, candidate, seed).await?;
            dispatched += 1;

            PRODUCER_METRICS.blocks_dispatched.add(1, &[KeyValue::new("direction", direction.to_string())]);
            PRODUCER_METRICS.cursor_block.record(candidate, &[KeyValue::new("direction", direction.to_string())]);
        }

        info!(direction = %direction, dispatched, "Batch limit reached");
        Ok(PassOutcome::Completed { dispatched })
    }

    async fn dispatch(&self, direction: ScanDirection, block_num: u64) -> Result<(), ScanError> {
        let params = self.config.scan_params();
        let start = Instant::now();
        bounded(params.call_timeout, self.config.queue().send_work_item(WorkItem::new(block_num)), QueueError::Timeout)
            .await
            .map_err(|source| ScanError::SendFailed { direction, block_num, source })?;

        PRODUCER_METRICS
            .dispatch_latency
            .record(start.elapsed().as_secs_f64(), &[KeyValue::new("direction", direction.to_string())]);
        debug!(direction = %direction, block_num, "Block dispatched");
        Ok(())
    }

    /// Record `block_num` as the last dispatched block. The first block of a fresh cursor
    /// creates the record.
    async fn persist(&self, direction: ScanDirection, block_num: u64, seed: bool) -> Result<(), ScanError> {
        let params = self.config.scan_params();
        let store = self.config.cursor_store();
        let (operation, result) = if seed {
            let insert = bounded(params.call_timeout, store.insert_cursor(direction, block_num), DatabaseError::Timeout);
            ("insert_cursor", insert.await.map(|_| ()))
        } else {
            ("update_cursor", bounded(params.call_timeout, store.update_cursor(direction, block_num), DatabaseError::Timeout).await)
        };
        result.map_err(|source| ScanError::Store { direction, operation, block_num: Some(block_num), source })
    }
}
