pub mod database;
pub mod frontier;
pub mod scan;

use crate::cli::provider::aws::AWSConfigCliArgs;
use crate::cli::queue::aws_sqs::AWSSQSCliArgs;

pub use database::DatabaseArgs;
pub use frontier::FrontierArgs;
pub use scan::ScanParams;

/// QueueArgs - Arguments used to reach the work item queue
#[derive(Debug, Clone)]
pub struct QueueArgs {
    pub queue_name: String,
}

impl From<&AWSSQSCliArgs> for QueueArgs {
    fn from(args: &AWSSQSCliArgs) -> Self {
        Self { queue_name: args.sqs_queue_name.clone() }
    }
}

/// AWSArgs - Arguments used to build the shared AWS SDK config
#[derive(Debug, Clone, Default)]
pub struct AWSArgs {
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
}

impl From<&AWSConfigCliArgs> for AWSArgs {
    fn from(args: &AWSConfigCliArgs) -> Self {
        Self { region: args.aws_region.clone(), endpoint_url: args.aws_endpoint_url.clone() }
    }
}
