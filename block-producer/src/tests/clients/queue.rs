use crate::config::load_aws_config;
use crate::core::client::queue::QueueClient;
use crate::core::client::SQS;
use crate::types::constant::{PRODUCER_VERSION, PRODUCER_VERSION_ATTRIBUTE};
use crate::types::params::{AWSArgs, QueueArgs};
use crate::types::work_item::WorkItem;
use aws_sdk_sqs::types::{MessageSystemAttributeName, QueueAttributeName};
use rstest::*;
use std::collections::HashMap;

/// Sends a work item to a freshly created FIFO queue on the endpoint in `AWS_ENDPOINT_URL`
/// (localstack) and reads it back.
#[rstest]
#[tokio::test]
#[ignore] // Requires localstack or AWS credentials
async fn test_send_work_item_sets_fifo_keys_and_version() {
    let aws_args = AWSArgs {
        region: Some(std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string())),
        endpoint_url: Some(std::env::var("AWS_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4566".to_string())),
    };
    let aws_config = load_aws_config(&aws_args).await;
    let queue_name = format!("block-producer-test-{}.fifo", uuid::Uuid::new_v4().simple());

    let sqs = SQS::new(&aws_config, &QueueArgs { queue_name: queue_name.clone() });
    let attributes = HashMap::from([(QueueAttributeName::FifoQueue, "true".to_string())]);
    sqs.client().create_queue().queue_name(&queue_name).set_attributes(Some(attributes)).send().await.unwrap();

    sqs.health_check().await.unwrap();
    sqs.send_work_item(WorkItem::new(105)).await.unwrap();

    let queue_url = sqs.queue_url().await.unwrap().to_string();
    let received = sqs
        .client()
        .receive_message()
        .queue_url(&queue_url)
        .message_attribute_names("All")
        .message_system_attribute_names(MessageSystemAttributeName::All)
        .send()
        .await
        .unwrap();
    let message = received.messages().first().unwrap();

    assert_eq!(message.body(), Some(r#"{"blockNum":105}"#));
    let version = message.message_attributes().unwrap().get(PRODUCER_VERSION_ATTRIBUTE).unwrap();
    assert_eq!(version.string_value(), Some(PRODUCER_VERSION));
    let system_attributes = message.attributes().unwrap();
    assert_eq!(system_attributes.get(&MessageSystemAttributeName::MessageGroupId).map(String::as_str), Some("105"));
    assert_eq!(
        system_attributes.get(&MessageSystemAttributeName::MessageDeduplicationId).map(String::as_str),
        Some("105")
    );

    sqs.client().delete_queue().queue_url(&queue_url).send().await.unwrap();
}
