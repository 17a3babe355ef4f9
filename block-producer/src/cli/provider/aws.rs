use clap::Args;

/// Parameters used to config AWS.
#[derive(Debug, Clone, Args)]
pub struct AWSConfigCliArgs {
    /// The AWS region. Falls back to the default provider chain when absent.
    #[arg(env = "AWS_REGION", long)]
    pub aws_region: Option<String>,

    /// Custom endpoint for every AWS service, used to point at localstack.
    #[arg(env = "AWS_ENDPOINT_URL", long)]
    pub aws_endpoint_url: Option<String>,
}
