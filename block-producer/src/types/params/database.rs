use crate::cli::database::mongodb::MongoDBCliArgs;

/// DatabaseArgs - Arguments used to connect to the cursor store
#[derive(Debug, Clone)]
pub struct DatabaseArgs {
    pub connection_uri: String,
    pub database_name: String,
    pub collection_name: String,
}

impl From<&MongoDBCliArgs> for DatabaseArgs {
    fn from(args: &MongoDBCliArgs) -> Self {
        Self {
            connection_uri: args.mongodb_connection_url.clone(),
            database_name: args.mongodb_database_name.clone(),
            collection_name: args.mongodb_collection_name.clone(),
        }
    }
}
