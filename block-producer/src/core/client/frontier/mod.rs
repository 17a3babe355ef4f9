pub mod error;
pub mod json_rpc;

use async_trait::async_trait;
pub use error::FrontierError;

/// Upstream source reporting the highest block known to exist
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FrontierClient: Send + Sync {
    /// latest_block_number - The current frontier, confirmations already applied
    async fn latest_block_number(&self) -> Result<u64, FrontierError>;
}
