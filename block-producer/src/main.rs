use block_producer::cli::{Cli, Commands, CursorCmd, RunCmd};
use block_producer::config::Config;
use block_producer::core::client::database::CursorStore;
use block_producer::core::client::MongoCursorStore;
use block_producer::types::cursor::CursorStatus;
use block_producer::types::params::DatabaseArgs;
use block_producer::utils::logging::init_logging;
use block_producer::utils::signal_handler::{ShutdownSignal, SignalHandler};
use block_producer::worker::initialize_worker;
use block_producer::{ProducerError, ProducerResult};
use clap::Parser as _;
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Upper bound on waiting for an in-flight pass after a shutdown signal
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();
    info!("Starting block producer");
    let cli = Cli::parse();

    let (action, result) = match &cli.command {
        Commands::Run { run_command } => ("run block producer", run_producer(run_command).await),
        Commands::Reset { cursor_command } => ("reset cursor", reset_cursor(cursor_command).await),
        Commands::Status { cursor_command } => ("read cursor status", show_cursor(cursor_command).await),
        Commands::SetStatus { cursor_command, status } => {
            ("set cursor status", set_cursor_status(cursor_command, *status).await)
        }
    };

    if let Err(e) = result {
        error!(error = %e, error_chain = ?e, "Failed to {}", action);
        panic!("Failed to {}: {}", action, e);
    }
}

async fn run_producer(run_cmd: &RunCmd) -> ProducerResult<()> {
    let config = Arc::new(Config::from_run_cmd(run_cmd).await?);
    debug!("Configuration initialized");
    config.health_check().await?;

    let mut signal_handler = SignalHandler::new();
    let cancellation_token = CancellationToken::new();
    let worker_handle =
        initialize_worker(config.clone(), cancellation_token.clone(), signal_handler.get_shutdown_trigger());

    let signal = signal_handler.wait_for_shutdown().await?;
    cancellation_token.cancel();

    signal_handler
        .handle_graceful_shutdown(
            || async move {
                worker_handle.await.map_err(|e| anyhow::anyhow!("Trigger loop task failed: {}", e))??;
                Ok(())
            },
            SHUTDOWN_TIMEOUT,
        )
        .await?;

    if signal == ShutdownSignal::Internal {
        return Err(ProducerError::WorkerError("Trigger loop requested shutdown".to_string()));
    }
    info!("Block producer stopped");
    Ok(())
}

async fn connect_store(cursor_cmd: &CursorCmd) -> ProducerResult<MongoCursorStore> {
    let database_args = DatabaseArgs::from(&cursor_cmd.mongodb_args);
    Ok(MongoCursorStore::new(&database_args).await?)
}

async fn reset_cursor(cursor_cmd: &CursorCmd) -> ProducerResult<()> {
    let store = connect_store(cursor_cmd).await?;
    let direction = cursor_cmd.direction;
    if store.remove_cursor(direction).await? {
        info!(direction = %direction, key = direction.storage_key(), "Cursor removed");
    } else {
        warn!(direction = %direction, key = direction.storage_key(), "No cursor stored, nothing to reset");
    }
    Ok(())
}

async fn show_cursor(cursor_cmd: &CursorCmd) -> ProducerResult<()> {
    let store = connect_store(cursor_cmd).await?;
    let direction = cursor_cmd.direction;
    match store.get_cursor(direction).await? {
        Some(record) => info!(
            direction = %record.direction,
            key = direction.storage_key(),
            block_num = record.block_num,
            status = %record.status,
            created_at = %record.created_at,
            updated_at = %record.updated_at,
            "Stored cursor"
        ),
        None => info!(direction = %direction, key = direction.storage_key(), "No cursor stored"),
    }
    Ok(())
}

async fn set_cursor_status(cursor_cmd: &CursorCmd, status: CursorStatus) -> ProducerResult<()> {
    let store = connect_store(cursor_cmd).await?;
    store.update_status(cursor_cmd.direction, status).await?;
    info!(direction = %cursor_cmd.direction, status = %status, "Cursor status updated");
    Ok(())
}
