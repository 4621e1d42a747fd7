//! Helpers shared by the CLI commands

use crate::cli::args::{Args, OutputFormat};
use crate::constants::LOG_TARGET;
use crate::{Error, Result};
use serde::Serialize;
use tracing::debug;

/// Set up structured logging on stderr
///
/// `RUST_LOG` overrides the level implied by `-v`/`-q`.
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Render a value as JSON or with its human-readable formatter
pub fn render<T: Serialize>(
    format: OutputFormat,
    value: &T,
    human: impl FnOnce(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| Error::json("Failed to serialize output", e)),
        OutputFormat::Human => Ok(human(value)),
    }
}
