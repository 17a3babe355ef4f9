pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod types;
pub mod utils;
pub mod worker;

#[cfg(test)]
pub mod tests;

// Re-export commonly used item
pub use error::{ProducerError, ProducerResult};
