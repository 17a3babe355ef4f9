use super::error::DatabaseError;
use crate::core::client::database::CursorStore;
use crate::types::cursor::{CursorRecord, CursorStatus};
use crate::types::direction::ScanDirection;
use crate::types::params::database::DatabaseArgs;
use crate::utils::metrics::PRODUCER_METRICS;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use mongodb::bson::{self, doc, Document};
use mongodb::options::{IndexOptions, UpdateOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use opentelemetry::KeyValue;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Shape of a cursor record inside the collection.
///
/// BSON has no unsigned 64-bit integer, so block numbers are stored as `i64` and
/// anything above `i64::MAX` is rejected before it reaches the driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CursorDocument {
    message_id: String,
    block_num: i64,
    status: CursorStatus,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    updated_at: DateTime<Utc>,
}

impl TryFrom<&CursorRecord> for CursorDocument {
    type Error = DatabaseError;

    fn try_from(record: &CursorRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            message_id: record.direction.storage_key().to_string(),
            block_num: to_stored_block_num(record.block_num)?,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

impl TryFrom<CursorDocument> for CursorRecord {
    type Error = DatabaseError;

    fn try_from(document: CursorDocument) -> Result<Self, Self::Error> {
        let direction = ScanDirection::from_storage_key(&document.message_id)
            .ok_or_else(|| DatabaseError::UnknownKey(document.message_id.clone()))?;
        let block_num =
            u64::try_from(document.block_num).map_err(|_| DatabaseError::NegativeBlockNumber(document.block_num))?;
        Ok(Self {
            direction,
            block_num,
            status: document.status,
            created_at: document.created_at,
            updated_at: document.updated_at,
        })
    }
}

fn to_stored_block_num(block_num: u64) -> Result<i64, DatabaseError> {
    i64::try_from(block_num).map_err(|_| DatabaseError::BlockNumberOutOfRange(block_num))
}

fn key_filter(direction: ScanDirection) -> Document {
    doc! { "message_id": direction.storage_key() }
}

/// MongoDB backed cursor store
pub struct MongoCursorStore {
    client: Client,
    database: Arc<Database>,
    collection_name: String,
}

impl MongoCursorStore {
    pub async fn new(args: &DatabaseArgs) -> Result<Self, DatabaseError> {
        let client = Client::with_uri_str(&args.connection_uri).await?;
        let database = Arc::new(client.database(&args.database_name));
        Ok(Self { client, database, collection_name: args.collection_name.clone() })
    }

    /// Mongodb client uses Arc internally, reducing the cost of clone.
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    fn collection(&self) -> Collection<CursorDocument> {
        self.database.collection(&self.collection_name)
    }

    /// ensure_indexes - Create the unique index guaranteeing one record per cursor key.
    /// Safe to call on every startup, MongoDB ignores identical index definitions.
    pub async fn ensure_indexes(&self) -> Result<(), DatabaseError> {
        let index = IndexModel::builder()
            .keys(doc! { "message_id": 1 })
            .options(IndexOptions::builder().unique(true).name("message_id_unique".to_string()).build())
            .build();
        self.collection().create_index(index, None).await?;
        debug!(collection = %self.collection_name, "Cursor indexes ensured");
        Ok(())
    }
}

/// Runs a store call and records its latency under `db_operation_name`
async fn record_metrics<T, F, Fut>(operation: &'static str, f: F) -> Result<T, DatabaseError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, DatabaseError>>,
{
    let start = Instant::now();
    let result = f().await;
    let duration = start.elapsed();
    debug!(duration = %duration.as_millis(), operation, "Cursor store call finished");
    let attributes = [KeyValue::new("db_operation_name", operation)];
    PRODUCER_METRICS.db_calls_response_time.record(duration.as_secs_f64(), &attributes);
    result
}

#[async_trait]
impl CursorStore for MongoCursorStore {
    async fn get_cursor(&self, direction: ScanDirection) -> Result<Option<CursorRecord>, DatabaseError> {
        record_metrics("get_cursor", || async move {
            match self.collection().find_one(key_filter(direction), None).await? {
                Some(document) => Ok(Some(CursorRecord::try_from(document)?)),
                None => Ok(None),
            }
        })
        .await
    }

    /// insert_cursor - Insert through an upsert with `$setOnInsert`, so an existing record is
    /// left untouched and reported as `AlreadyExists`.
    async fn insert_cursor(&self, direction: ScanDirection, block_num: u64) -> Result<CursorRecord, DatabaseError> {
        record_metrics("insert_cursor", || async move {
            let record = CursorRecord::new(direction, block_num);
            let document = bson::to_document(&CursorDocument::try_from(&record)?)?;
            let options = UpdateOptions::builder().upsert(true).build();
            let update = doc! {
                // only set when the document is inserted for the first time
                "$setOnInsert": document
            };

            let result = self.collection().update_one(key_filter(direction), update, options).await?;
            if result.matched_count == 0 {
                Ok(record)
            } else {
                Err(DatabaseError::AlreadyExists(direction.storage_key().to_string()))
            }
        })
        .await
    }

    async fn update_cursor(&self, direction: ScanDirection, block_num: u64) -> Result<(), DatabaseError> {
        record_metrics("update_cursor", || async move {
            let stored_block_num = to_stored_block_num(block_num)?;
            let update = doc! {
                "$set": {
                    "block_num": stored_block_num,
                    "updated_at": bson::DateTime::now(),
                }
            };
            let result = self.collection().update_one(key_filter(direction), update, None).await?;
            if result.matched_count == 0 {
                return Err(DatabaseError::NotFound(direction.storage_key().to_string()));
            }
            Ok(())
        })
        .await
    }

    async fn update_status(&self, direction: ScanDirection, status: CursorStatus) -> Result<(), DatabaseError> {
        record_metrics("update_status", || async move {
            let update = doc! {
                "$set": {
                    "status": status.to_string(),
                    "updated_at": bson::DateTime::now(),
                }
            };
            let result = self.collection().update_one(key_filter(direction), update, None).await?;
            if result.matched_count == 0 {
                return Err(DatabaseError::NotFound(direction.storage_key().to_string()));
            }
            Ok(())
        })
        .await
    }

    async fn remove_cursor(&self, direction: ScanDirection) -> Result<bool, DatabaseError> {
        record_metrics("remove_cursor", || async move {
            let result = self.collection().delete_one(key_filter(direction), None).await?;
            Ok(result.deleted_count > 0)
        })
        .await
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        record_metrics("health_check", || async move {
            self.database.run_command(doc! { "ping": 1 }, None).await?;
            Ok(())
        })
        .await
    }
}
