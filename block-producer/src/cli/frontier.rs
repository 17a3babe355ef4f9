use clap::Args;
use url::Url;

/// Parameters used to reach the upstream frontier source.
#[derive(Debug, Clone, Args)]
pub struct FrontierCliArgs {
    /// JSON-RPC endpoint answering `eth_blockNumber`.
    #[arg(env = "BLOCK_PRODUCER_RPC_URL", long)]
    pub rpc_url: Url,

    /// Number of blocks below the reported head that are treated as the frontier.
    #[arg(env = "BLOCK_PRODUCER_CONFIRMATIONS", long, default_value = "0")]
    pub confirmations: u64,
}
