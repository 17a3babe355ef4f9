use aws_sdk_sqs::error::SdkError;
use aws_sdk_sqs::operation::get_queue_url::GetQueueUrlError;
use aws_sdk_sqs::operation::send_message::SendMessageError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Failed to get queue url for queue: {0}")]
    FailedToGetQueueUrl(String),

    #[error("Failed to build message attribute: {0}")]
    MessageAttributeError(String),

    #[error("Failed to serialize work item: {0}")]
    FailedToSerializeWorkItem(#[from] serde_json::Error),

    #[error("Failed to resolve queue url: {0}")]
    GetQueueUrlError(#[from] SdkError<GetQueueUrlError>),

    #[error("Failed to send message: {0}")]
    SendMessageError(#[from] SdkError<SendMessageError>),

    #[error("Queue call timed out after {0:?}")]
    Timeout(Duration),
}
