use crate::config::Config;
use crate::core::client::database::{CursorStore, DatabaseError};
use crate::core::client::frontier::{FrontierClient, FrontierError};
use crate::core::client::queue::{QueueClient, QueueError};
use crate::types::cursor::{CursorRecord, CursorStatus};
use crate::types::direction::ScanDirection;
use crate::types::params::ScanParams;
use crate::types::work_item::WorkItem;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Cursor store keeping records in a map, with the same contract as the Mongo store
#[derive(Default)]
pub struct InMemoryCursorStore {
    records: Mutex<HashMap<ScanDirection, CursorRecord>>,
}

impl InMemoryCursorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cursor(direction: ScanDirection, block_num: u64) -> Self {
        let store = Self::new();
        store.records.lock().unwrap().insert(direction, CursorRecord::new(direction, block_num));
        store
    }

    pub fn block_num(&self, direction: ScanDirection) -> Option<u64> {
        self.records.lock().unwrap().get(&direction).map(|record| record.block_num)
    }
}

#[async_trait]
impl CursorStore for InMemoryCursorStore {
    async fn get_cursor(&self, direction: ScanDirection) -> Result<Option<CursorRecord>, DatabaseError> {
        Ok(self.records.lock().unwrap().get(&direction).cloned())
    }

    async fn insert_cursor(&self, direction: ScanDirection, block_num: u64) -> Result<CursorRecord, DatabaseError> {
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&direction) {
            return Err(DatabaseError::AlreadyExists(direction.storage_key().to_string()));
        }
        let record = CursorRecord::new(direction, block_num);
        records.insert(direction, record.clone());
        Ok(record)
    }

    async fn update_cursor(&self, direction: ScanDirection, block_num: u64) -> Result<(), DatabaseError> {
        let mut records = self.records.lock().unwrap();
        let record =
            records.get_mut(&direction).ok_or_else(|| DatabaseError::NotFound(direction.storage_key().to_string()))?;
        record.block_num = block_num;
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn update_status(&self, direction: ScanDirection, status: CursorStatus) -> Result<(), DatabaseError> {
        let mut records = self.records.lock().unwrap();
        let record =
            records.get_mut(&direction).ok_or_else(|| DatabaseError::NotFound(direction.storage_key().to_string()))?;
        record.status = status;
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn remove_cursor(&self, direction: ScanDirection) -> Result<bool, DatabaseError> {
        Ok(self.records.lock().unwrap().remove(&direction).is_some())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Queue recording every accepted work item, failing for blocks listed in `fail_on`
#[derive(Default)]
pub struct RecordingQueue {
    sent: Mutex<Vec<WorkItem>>,
    fail_on: Mutex<HashSet<u64>>,
}

impl RecordingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(&self, block_num: u64) {
        self.fail_on.lock().unwrap().insert(block_num);
    }

    pub fn recover(&self, block_num: u64) {
        self.fail_on.lock().unwrap().remove(&block_num);
    }

    pub fn sent_blocks(&self) -> Vec<u64> {
        self.sent.lock().unwrap().iter().map(|item| item.block_num).collect()
    }
}

#[async_trait]
impl QueueClient for RecordingQueue {
    async fn send_work_item(&self, item: WorkItem) -> Result<(), QueueError> {
        if self.fail_on.lock().unwrap().contains(&item.block_num) {
            return Err(QueueError::FailedToGetQueueUrl("unreachable".to_string()));
        }
        self.sent.lock().unwrap().push(item);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), QueueError> {
        Ok(())
    }
}

/// Frontier reporting a fixed block number
pub struct StaticFrontier(pub u64);

#[async_trait]
impl FrontierClient for StaticFrontier {
    async fn latest_block_number(&self) -> Result<u64, FrontierError> {
        Ok(self.0)
    }
}

/// Frontier that answers only after `release` is notified
pub struct GatedFrontier {
    pub value: u64,
    pub release: Notify,
}

#[async_trait]
impl FrontierClient for GatedFrontier {
    async fn latest_block_number(&self) -> Result<u64, FrontierError> {
        self.release.notified().await;
        Ok(self.value)
    }
}

/// Frontier that never answers within any sensible timeout
pub struct StalledFrontier;

#[async_trait]
impl FrontierClient for StalledFrontier {
    async fn latest_block_number(&self) -> Result<u64, FrontierError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(0)
    }
}

pub fn build_config(
    params: ScanParams,
    store: Arc<dyn CursorStore>,
    queue: Arc<dyn QueueClient>,
    frontier: Arc<dyn FrontierClient>,
) -> Arc<Config> {
    Arc::new(Config::new(params, store, queue, frontier))
}

/// In-memory collaborators plus the config built from them
pub struct TestHarness {
    pub store: Arc<InMemoryCursorStore>,
    pub queue: Arc<RecordingQueue>,
    pub config: Arc<Config>,
}

impl TestHarness {
    pub fn new(params: ScanParams, store: InMemoryCursorStore, frontier: u64) -> Self {
        let store = Arc::new(store);
        let queue = Arc::new(RecordingQueue::new());
        let config = build_config(params, store.clone(), queue.clone(), Arc::new(StaticFrontier(frontier)));
        Self { store, queue, config }
    }
}
