// Client abstractions module - contains all client interface traits

pub mod database;
pub mod frontier;
pub mod queue;

// Re-export commonly used types
pub use database::{mongodb::MongoCursorStore, CursorStore};
pub use frontier::{json_rpc::JsonRpcFrontierClient, FrontierClient};
pub use queue::{sqs::SQS, QueueClient};
