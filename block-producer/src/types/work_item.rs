use serde::{Deserialize, Serialize};

/// Body of the message consumed downstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemBody {
    pub block_num: u64,
}

/// A single block handed to the queue.
///
/// The message id, deduplication key and ordering group are all the decimal block
/// number, so repeated dispatches of one block collapse inside the queue's dedup window
/// and every block is its own ordering group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub block_num: u64,
}

impl WorkItem {
    pub fn new(block_num: u64) -> Self {
        Self { block_num }
    }

    pub fn id(&self) -> String {
        self.block_num.to_string()
    }

    pub fn dedup_key(&self) -> String {
        self.block_num.to_string()
    }

    pub fn group_key(&self) -> String {
        self.block_num.to_string()
    }

    pub fn body(&self) -> WorkItemBody {
        WorkItemBody { block_num: self.block_num }
    }

    /// JSON payload sent as the message body: `{"blockNum": <n>}`
    pub fn payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.body())
    }
}
