use mongodb::bson;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("No cursor stored for key: {0}")]
    NotFound(String),

    #[error("Cursor already stored for key: {0}")]
    AlreadyExists(String),

    #[error("Stored document has an unknown cursor key: {0}")]
    UnknownKey(String),

    #[error("Block number {0} does not fit the storage range")]
    BlockNumberOutOfRange(u64),

    #[error("Stored block number {0} is negative")]
    NegativeBlockNumber(i64),

    #[error("Database call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Mongo error: {0}")]
    MongoError(#[from] mongodb::error::Error),

    #[error("Failed to serialize document: {0}")]
    FailedToSerializeDocument(#[from] bson::ser::Error),

    #[error("Failed to deserialize document: {0}")]
    FailedToDeserializeDocument(#[from] bson::de::Error),
}

impl DatabaseError {
    /// Errors that retrying on the next trigger can never fix
    pub fn is_fatal(&self) -> bool {
        matches!(self, DatabaseError::BlockNumberOutOfRange(_) | DatabaseError::UnknownKey(_))
    }
}
