use crate::core::client::queue::{QueueClient, QueueError};
use crate::types::constant::{PRODUCER_VERSION, PRODUCER_VERSION_ATTRIBUTE};
use crate::types::params::QueueArgs;
use crate::types::work_item::WorkItem;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sqs::types::MessageAttributeValue;
use aws_sdk_sqs::Client;
use tokio::sync::OnceCell;

/// SQS FIFO producer for work items.
///
/// The queue url is looked up by name on first use and reused for the lifetime of the client.
#[derive(Debug)]
pub struct SQS {
    client: Client,
    queue_name: String,
    queue_url: OnceCell<String>,
}

impl SQS {
    /// new - Create a new SQS client from the shared AWS configuration.
    /// # Arguments
    /// * `aws_config` - The AWS configuration.
    /// * `args` - The queue arguments.
    pub fn new(aws_config: &SdkConfig, args: &QueueArgs) -> Self {
        let sqs_config_builder = aws_sdk_sqs::config::Builder::from(aws_config);
        let client = Client::from_conf(sqs_config_builder.build());
        Self { client, queue_name: args.queue_name.clone(), queue_url: OnceCell::new() }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// queue_url - Resolve the queue URL from its name, cached after the first success
    pub async fn queue_url(&self) -> Result<&str, QueueError> {
        let url = self
            .queue_url
            .get_or_try_init(|| async {
                let output = self.client.get_queue_url().queue_name(&self.queue_name).send().await?;
                let url = output
                    .queue_url()
                    .ok_or_else(|| QueueError::FailedToGetQueueUrl(self.queue_name.clone()))?
                    .to_string();
                tracing::debug!(queue = %self.queue_name, queue_url = %url, "Resolved queue url");
                Ok::<String, QueueError>(url)
            })
            .await?;
        Ok(url.as_str())
    }
}

#[async_trait]
impl QueueClient for SQS {
    /// **send_work_item** - Send a block to the FIFO queue.
    /// The message group and deduplication id are both the block number, and the
    /// producer version travels as a message attribute.
    async fn send_work_item(&self, item: WorkItem) -> Result<(), QueueError> {
        let queue_url = self.queue_url().await?;
        let payload = item.payload()?;

        let version_attribute = MessageAttributeValue::builder()
            .data_type("String")
            .string_value(PRODUCER_VERSION)
            .build()
            .map_err(|e| QueueError::MessageAttributeError(e.to_string()))?;

        self.client
            .send_message()
            .queue_url(queue_url)
            .message_body(payload)
            .message_group_id(item.group_key())
            .message_deduplication_id(item.dedup_key())
            .message_attributes(PRODUCER_VERSION_ATTRIBUTE, version_attribute)
            .send()
            .await?;

        tracing::debug!(queue = %self.queue_name, block_num = item.block_num, "Sent work item to queue");
        Ok(())
    }

    async fn health_check(&self) -> Result<(), QueueError> {
        self.queue_url().await.map(|_| ())
    }
}
