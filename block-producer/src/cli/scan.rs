use crate::types::constant::{DEFAULT_MAX_BATCH, DEFAULT_TRIGGER_INTERVAL_SECS};
use crate::types::direction::ScanDirection;
use clap::Args;

fn parse_positive_u64(s: &str) -> Result<u64, String> {
    let value: u64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if value == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(value)
}

#[derive(Debug, Clone, Args)]
pub struct ScanCliArgs {
    /// Scan direction: forward (alias up) walks to the frontier, backward (alias down) walks to the end block.
    #[arg(env = "BLOCK_PRODUCER_DIRECTION", long, default_value = "forward")]
    pub direction: ScanDirection,

    /// First block dispatched when no cursor has been persisted yet.
    #[arg(env = "BLOCK_PRODUCER_START_BLOCK", long)]
    pub start_block: u64,

    /// Lowest block a backward scan dispatches (inclusive).
    #[arg(env = "BLOCK_PRODUCER_END_BLOCK", long, default_value = "0")]
    pub end_block: u64,

    /// Seconds between two scan passes.
    #[arg(env = "BLOCK_PRODUCER_TRIGGER_INTERVAL_SECONDS", long, default_value_t = DEFAULT_TRIGGER_INTERVAL_SECS, value_parser = parse_positive_u64)]
    pub trigger_interval_seconds: u64,

    /// Maximum number of blocks dispatched by a single pass.
    #[arg(env = "BLOCK_PRODUCER_MAX_BATCH", long, default_value_t = DEFAULT_MAX_BATCH, value_parser = parse_positive_u64)]
    pub max_batch: u64,

    /// Timeout applied to every frontier, store and queue call.
    #[arg(env = "BLOCK_PRODUCER_CALL_TIMEOUT_SECONDS", long, default_value = "30", value_parser = parse_positive_u64)]
    pub call_timeout_seconds: u64,
}
