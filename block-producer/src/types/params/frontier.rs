use crate::cli::frontier::FrontierCliArgs;
use url::Url;

/// FrontierArgs - Arguments used to query the latest block upstream
#[derive(Debug, Clone)]
pub struct FrontierArgs {
    pub rpc_url: Url,
    pub confirmations: u64,
}

impl From<&FrontierCliArgs> for FrontierArgs {
    fn from(args: &FrontierCliArgs) -> Self {
        Self { rpc_url: args.rpc_url.clone(), confirmations: args.confirmations }
    }
}
