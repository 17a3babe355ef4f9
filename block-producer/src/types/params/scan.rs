use crate::cli::scan::ScanCliArgs;
use crate::types::constant::{DEFAULT_MAX_BATCH, DEFAULT_TRIGGER_INTERVAL_SECS};
use crate::types::direction::ScanDirection;
use crate::ProducerError;
use std::time::Duration;

/// ScanParams - Static parameters of the scan engine, fixed for the lifetime of the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanParams {
    pub direction: ScanDirection,
    pub start_block: u64,
    pub end_block: u64,
    pub trigger_interval: Duration,
    pub max_batch: u64,
    pub call_timeout: Duration,
}

impl ScanParams {
    pub fn new(direction: ScanDirection, start_block: u64, end_block: u64) -> Self {
        Self {
            direction,
            start_block,
            end_block,
            trigger_interval: Duration::from_secs(DEFAULT_TRIGGER_INTERVAL_SECS),
            max_batch: DEFAULT_MAX_BATCH,
            call_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_max_batch(mut self, max_batch: u64) -> Self {
        self.max_batch = max_batch;
        self
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    pub fn with_trigger_interval(mut self, trigger_interval: Duration) -> Self {
        self.trigger_interval = trigger_interval;
        self
    }

    /// Rejects combinations the engine cannot make progress with
    pub fn validate(&self) -> Result<(), ProducerError> {
        if self.max_batch == 0 {
            return Err(ProducerError::ConfigError("max_batch must be greater than 0".to_string()));
        }
        if self.trigger_interval.is_zero() {
            return Err(ProducerError::ConfigError("trigger interval must be greater than 0".to_string()));
        }
        if self.call_timeout.is_zero() {
            return Err(ProducerError::ConfigError("call timeout must be greater than 0".to_string()));
        }
        if self.direction == ScanDirection::Backward && self.end_block > self.start_block {
            return Err(ProducerError::ConfigError(format!(
                "backward scan needs end_block ({}) <= start_block ({})",
                self.end_block, self.start_block
            )));
        }
        Ok(())
    }
}

impl TryFrom<&ScanCliArgs> for ScanParams {
    type Error = ProducerError;

    fn try_from(args: &ScanCliArgs) -> Result<Self, Self::Error> {
        let params = ScanParams::new(args.direction, args.start_block, args.end_block)
            .with_max_batch(args.max_batch)
            .with_trigger_interval(Duration::from_secs(args.trigger_interval_seconds))
            .with_call_timeout(Duration::from_secs(args.call_timeout_seconds));
        params.validate()?;
        Ok(params)
    }
}
