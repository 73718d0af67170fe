//! Command implementations for the CR30 processor CLI
//!
//! Dispatches parsed arguments to the command handlers and owns the
//! logging bootstrap shared by all commands.

pub mod convert;

use crate::app::services::ti3_writer::WriteSummary;
use crate::cli::args::{Args, Commands};
use crate::Result;
use tracing::debug;

/// Main command runner for the CR30 processor
pub fn run(args: Args) -> Result<WriteSummary> {
    match args.get_command() {
        Commands::Convert(convert_args) => convert::run_convert(convert_args),
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cr30_processor={}", log_level)));

    // try_init so repeated calls (e.g. from tests) are no-ops
    if quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .ok();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}
