use crate::core::client::database::DatabaseError;
use crate::core::client::frontier::FrontierError;
use crate::core::client::queue::QueueError;
use crate::types::direction::ScanDirection;
use thiserror::Error;

/// Reasons a scan pass ends early.
///
/// Every variant leaves the persisted cursor at the last block that was actually sent,
/// so the next trigger resumes from there.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Frontier unavailable for {direction} scan: {source}")]
    FrontierUnavailable {
        direction: ScanDirection,
        #[source]
        source: FrontierError,
    },

    #[error("Cursor store failed during {operation} for {direction} scan at block {block_num:?}: {source}")]
    Store {
        direction: ScanDirection,
        operation: &'static str,
        block_num: Option<u64>,
        #[source]
        source: DatabaseError,
    },

    #[error("Failed to send block {block_num} for {direction} scan: {source}")]
    SendFailed {
        direction: ScanDirection,
        block_num: u64,
        #[source]
        source: QueueError,
    },

    #[error("Cursor for {direction} scan cannot step past block {block_num}")]
    CursorOverflow { direction: ScanDirection, block_num: u64 },
}

impl ScanError {
    /// Fatal errors stop the trigger loop, retrying on the next trigger cannot fix them
    pub fn is_fatal(&self) -> bool {
        match self {
            ScanError::CursorOverflow { .. } => true,
            ScanError::Store { source, .. } => source.is_fatal(),
            ScanError::FrontierUnavailable { .. } | ScanError::SendFailed { .. } => false,
        }
    }

    /// Short label used for logs and metric attributes
    pub fn stage(&self) -> &'static str {
        match self {
            ScanError::FrontierUnavailable { .. } => "frontier",
            ScanError::Store { .. } => "store",
            ScanError::SendFailed { .. } => "send",
            ScanError::CursorOverflow { .. } => "overflow",
        }
    }
}
