use crate::types::constant::CURSORS_COLLECTION;
use clap::Args;

/// Parameters used to config MongoDB.
#[derive(Debug, Clone, Args)]
pub struct MongoDBCliArgs {
    /// The connection string to the MongoDB server.
    #[arg(env = "BLOCK_PRODUCER_MONGODB_CONNECTION_URL", long, default_value = "mongodb://localhost:27017")]
    pub mongodb_connection_url: String,

    /// The name of the database.
    #[arg(env = "BLOCK_PRODUCER_DATABASE_NAME", long, default_value = "block_producer")]
    pub mongodb_database_name: String,

    /// The collection holding one cursor record per scan direction.
    #[arg(env = "BLOCK_PRODUCER_CURSOR_COLLECTION", long, default_value = CURSORS_COLLECTION)]
    pub mongodb_collection_name: String,
}
