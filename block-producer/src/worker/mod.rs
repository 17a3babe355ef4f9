pub mod controller;
pub mod scan;

use crate::config::Config;
use crate::error::ScanError;
use controller::TriggerLoop;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Spawns the trigger loop in the background.
///
/// A fatal loop exit notifies `shutdown_trigger` so the process winds down instead of
/// idling without a producer. Cancel `cancellation_token` to stop the loop, then await
/// the handle.
///
/// # Arguments
/// * `config` - The shared configuration
/// * `cancellation_token` - Stops the loop between passes
/// * `shutdown_trigger` - Notified when the loop ends with a fatal error
pub fn initialize_worker(
    config: Arc<Config>,
    cancellation_token: CancellationToken,
    shutdown_trigger: Arc<Notify>,
) -> JoinHandle<Result<(), ScanError>> {
    let trigger_loop = TriggerLoop::new(config, cancellation_token);
    info!("Starting trigger loop");

    tokio::spawn(async move {
        let result = trigger_loop.run().await;
        if result.is_err() {
            shutdown_trigger.notify_one();
        }
        result
    })
}
