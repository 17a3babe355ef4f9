pub mod error;
pub mod mongodb;

use crate::types::cursor::{CursorRecord, CursorStatus};
use crate::types::direction::ScanDirection;
use async_trait::async_trait;
pub use error::DatabaseError;

/// Durable store holding exactly one cursor record per scan direction
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CursorStore: Send + Sync {
    /// get_cursor - Read the cursor of a direction, `None` if it was never stored
    async fn get_cursor(&self, direction: ScanDirection) -> Result<Option<CursorRecord>, DatabaseError>;

    /// insert_cursor - Create the cursor with status `active`.
    /// Fails with `AlreadyExists` when a record for the direction is present.
    async fn insert_cursor(&self, direction: ScanDirection, block_num: u64) -> Result<CursorRecord, DatabaseError>;

    /// update_cursor - Overwrite the block number of an existing cursor.
    /// Fails with `NotFound` when no record exists.
    async fn update_cursor(&self, direction: ScanDirection, block_num: u64) -> Result<(), DatabaseError>;

    /// update_status - Overwrite the lifecycle status of an existing cursor
    async fn update_status(&self, direction: ScanDirection, status: CursorStatus) -> Result<(), DatabaseError>;

    /// remove_cursor - Administrative delete, returns whether a record was removed
    async fn remove_cursor(&self, direction: ScanDirection) -> Result<bool, DatabaseError>;

    /// Perform a health check on the backing store
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
