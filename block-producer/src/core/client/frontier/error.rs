use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontierError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Failed to decode block number: {0}")]
    Decode(String),

    #[error("Frontier call timed out after {0:?}")]
    Timeout(Duration),
}
