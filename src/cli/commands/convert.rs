//! Convert command: CR30 CSV + TI2/TI1 layout -> TI3

use colored::*;
use tracing::{info, warn};

use crate::app::services::layout_parser::LayoutParser;
use crate::app::services::measurement_parser::MeasurementParser;
use crate::app::services::ti3_writer::{Ti3Writer, WriteSummary};
use crate::cli::args::ConvertArgs;
use crate::cli::commands::setup_logging;
use crate::{Error, Result};

/// Execute the convert command
pub fn run_convert(args: ConvertArgs) -> Result<WriteSummary> {
    setup_logging(args.get_log_level(), args.quiet)?;
    args.validate()?;

    // Fail fast on missing inputs before any parsing work
    if !args.csv_path.is_file() {
        return Err(Error::input_not_found(args.csv_path.display().to_string()));
    }
    if !args.layout_path.is_file() {
        return Err(Error::input_not_found(
            args.layout_path.display().to_string(),
        ));
    }

    let config = args.to_config();

    let parse_result = MeasurementParser::new().parse_file(&args.csv_path)?;
    let measurements = parse_result.set;
    info!(
        "Parsed {} measurement rows ({} skipped, {} spectral columns)",
        parse_result.stats.rows_parsed,
        parse_result.stats.rows_skipped,
        parse_result.stats.spectral_columns
    );

    let layout = LayoutParser::new().parse_file(&args.layout_path)?;

    if layout.sample_count() != measurements.len() {
        warn!(
            "Row count mismatch: layout has {} samples, CSV has {} rows; \
             writing {} sets",
            layout.sample_count(),
            measurements.len(),
            layout.sample_count().min(measurements.len())
        );
    }

    let summary = Ti3Writer::new(config).write(&args.out_path, &layout, &measurements)?;

    if !args.quiet {
        println!(
            "{} {} ({} sets, {}, spectral: {})",
            "✓ Wrote".bright_green().bold(),
            args.out_path.display().to_string().bright_white().bold(),
            summary.sets_written,
            summary.color_rep,
            if summary.spectral_written { "yes" } else { "no" }
        );
    }

    Ok(summary)
}
