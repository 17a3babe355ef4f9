use crate::cli::RunCmd;
use crate::core::client::database::CursorStore;
use crate::core::client::frontier::FrontierClient;
use crate::core::client::queue::QueueClient;
use crate::core::client::{JsonRpcFrontierClient, MongoCursorStore, SQS};
use crate::types::params::{AWSArgs, DatabaseArgs, FrontierArgs, QueueArgs, ScanParams};
use crate::ProducerResult;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use std::sync::Arc;
use tracing::{debug, info};

/// Process-wide configuration and the clients built from it.
///
/// Built once at startup and shared as `Arc<Config>`; nothing in it is torn down while
/// the producer runs.
pub struct Config {
    scan_params: ScanParams,
    cursor_store: Arc<dyn CursorStore>,
    queue: Arc<dyn QueueClient>,
    frontier: Arc<dyn FrontierClient>,
}

impl Config {
    pub fn new(
        scan_params: ScanParams,
        cursor_store: Arc<dyn CursorStore>,
        queue: Arc<dyn QueueClient>,
        frontier: Arc<dyn FrontierClient>,
    ) -> Self {
        Self { scan_params, cursor_store, queue, frontier }
    }

    /// from_run_cmd - Validate the run arguments and connect every client
    pub async fn from_run_cmd(run_cmd: &RunCmd) -> ProducerResult<Self> {
        let scan_params = ScanParams::try_from(&run_cmd.scan_args)?;
        let database_args = DatabaseArgs::from(&run_cmd.mongodb_args);
        let queue_args = QueueArgs::from(&run_cmd.aws_sqs_args);
        let frontier_args = FrontierArgs::from(&run_cmd.frontier_args);
        let aws_args = AWSArgs::from(&run_cmd.aws_config_args);

        info!(
            direction = %scan_params.direction,
            start_block = scan_params.start_block,
            end_block = scan_params.end_block,
            max_batch = scan_params.max_batch,
            trigger_interval_secs = scan_params.trigger_interval.as_secs(),
            "Scan parameters loaded"
        );

        let cursor_store = MongoCursorStore::new(&database_args).await?;
        cursor_store.ensure_indexes().await?;
        debug!(database = %database_args.database_name, collection = %database_args.collection_name, "Cursor store ready");

        let aws_config = load_aws_config(&aws_args).await;
        let queue = SQS::new(&aws_config, &queue_args);
        let frontier = JsonRpcFrontierClient::new(&frontier_args)?;

        Ok(Self::new(scan_params, Arc::new(cursor_store), Arc::new(queue), Arc::new(frontier)))
    }

    /// health_check - Fail fast at startup when the store or the queue is unreachable
    pub async fn health_check(&self) -> ProducerResult<()> {
        self.cursor_store.health_check().await?;
        self.queue.health_check().await?;
        info!("Cursor store and queue are reachable");
        Ok(())
    }

    pub fn scan_params(&self) -> &ScanParams {
        &self.scan_params
    }

    pub fn cursor_store(&self) -> &dyn CursorStore {
        self.cursor_store.as_ref()
    }

    pub fn queue(&self) -> &dyn QueueClient {
        self.queue.as_ref()
    }

    pub fn frontier(&self) -> &dyn FrontierClient {
        self.frontier.as_ref()
    }
}

/// Build the shared AWS SDK configuration, honouring an explicit region and endpoint
pub async fn load_aws_config(args: &AWSArgs) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &args.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint_url) = &args.endpoint_url {
        loader = loader.endpoint_url(endpoint_url);
    }
    loader.load().await
}
