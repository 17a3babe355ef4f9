pub mod error;
pub mod sqs;

use crate::types::work_item::WorkItem;
use async_trait::async_trait;
pub use error::QueueError;

/// Trait defining queue operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// send_work_item - Hand a work item to the queue.
    /// Resolves once the transport has accepted the message or failed to.
    async fn send_work_item(&self, item: WorkItem) -> Result<(), QueueError>;

    /// Perform a health check on the queue service
    ///
    /// This method verifies that the queue service (e.g., AWS SQS) is accessible
    /// and the configured queue exists.
    async fn health_check(&self) -> Result<(), QueueError>;
}
