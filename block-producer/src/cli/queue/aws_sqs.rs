use clap::Args;

/// Parameters used to config AWS SQS.
#[derive(Debug, Clone, Args)]
pub struct AWSSQSCliArgs {
    /// The name of the FIFO queue work items are sent to.
    /// i.e blocks.fifo
    #[arg(env = "BLOCK_PRODUCER_AWS_SQS_QUEUE_NAME", long)]
    pub sqs_queue_name: String,
}
