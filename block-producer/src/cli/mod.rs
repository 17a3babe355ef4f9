use crate::types::cursor::CursorStatus;
use crate::types::direction::ScanDirection;
use clap::{Parser, Subcommand};

pub mod database;
pub mod frontier;
pub mod provider;
pub mod queue;
pub mod scan;

#[derive(Parser, Debug)]
#[command(
    name = "block-producer",
    about = "Block Producer - enqueue one deduplicated work item per block",
    long_about = "Block Producer advances a persisted cursor over block heights and sends every newly reached \
    block to an SQS FIFO queue.\n\n\
    Quick Start:\n  \
    block-producer run --start-block 100 --rpc-url http://localhost:8545 --sqs-queue-name blocks.fifo",
    after_help = "Examples:\n  \
    block-producer run --direction forward --start-block 100 --rpc-url http://localhost:8545 --sqs-queue-name blocks.fifo\n  \
    block-producer run --direction backward --start-block 100 --end-block 0 --rpc-url http://localhost:8545 --sqs-queue-name blocks.fifo\n  \
    block-producer status --direction forward\n  \
    block-producer reset --direction forward"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the producer loop
    Run {
        #[command(flatten)]
        run_command: Box<RunCmd>,
    },
    /// Delete the persisted cursor of a direction so the next run starts from the start block
    Reset {
        #[command(flatten)]
        cursor_command: Box<CursorCmd>,
    },
    /// Show the persisted cursor of a direction
    Status {
        #[command(flatten)]
        cursor_command: Box<CursorCmd>,
    },
    /// Change the lifecycle status stored on a direction's cursor
    SetStatus {
        #[command(flatten)]
        cursor_command: Box<CursorCmd>,

        /// New status: active or paused
        #[arg(long)]
        status: CursorStatus,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct RunCmd {
    #[clap(flatten)]
    pub scan_args: scan::ScanCliArgs,

    #[clap(flatten)]
    pub frontier_args: frontier::FrontierCliArgs,

    #[clap(flatten)]
    pub mongodb_args: database::mongodb::MongoDBCliArgs,

    #[clap(flatten)]
    pub aws_config_args: provider::aws::AWSConfigCliArgs,

    #[clap(flatten)]
    pub aws_sqs_args: queue::aws_sqs::AWSSQSCliArgs,
}

/// Administrative commands operating on a single cursor record
#[derive(Parser, Debug, Clone)]
pub struct CursorCmd {
    /// Direction whose cursor is addressed
    #[arg(env = "BLOCK_PRODUCER_DIRECTION", long, default_value = "forward")]
    pub direction: ScanDirection,

    #[clap(flatten)]
    pub mongodb_args: database::mongodb::MongoDBCliArgs,
}
