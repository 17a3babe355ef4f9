pub mod scan;

use thiserror::Error;

use crate::core::client::database::DatabaseError;
use crate::core::client::frontier::FrontierError;
use crate::core::client::queue::QueueError;
pub use scan::ScanError;

/// Result type for producer operations
pub type ProducerResult<T> = Result<T, ProducerError>;

/// Error types for the producer
#[derive(Error, Debug)]
pub enum ProducerError {
    #[error("Queue error: {0}")]
    QueueError(#[from] QueueError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Frontier error: {0}")]
    FrontierError(#[from] FrontierError),

    #[error("Scan error: {0}")]
    ScanError(#[from] ScanError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Worker error
    #[error("Worker error: {0}")]
    WorkerError(String),

    #[error("Producer Error: {0}")]
    AnyhowError(#[from] anyhow::Error),
}
