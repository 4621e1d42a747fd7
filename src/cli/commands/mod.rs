//! Command implementations for the detchannelmaps CLI
//!
//! Each command is implemented in its own module:
//! - `hardware`: hardware map loading and queries
//! - `channel`: channel map construction and queries

pub mod channel;
pub mod hardware;
pub mod shared;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner
///
/// Sets up logging, then dispatches to the subcommand handler.
pub fn run(args: Args) -> Result<()> {
    shared::setup_logging(&args)?;

    match &args.command {
        Commands::Hardware(hardware_args) => hardware::run_hardware(hardware_args, args.format),
        Commands::Channel(channel_args) => channel::run_channel(channel_args, args.format),
    }
}
