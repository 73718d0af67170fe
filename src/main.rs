use clap::Parser;
use cr30_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_summary) => {
            // Success - the command has already reported its outcome
            process::exit(0);
        }
        Err(error) => {
            // anyhow's alternate format renders the full source chain
            eprintln!("Error: {:#}", anyhow::Error::new(error));
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("CR30 Processor - CHNSpec CR30 Measurement Converter");
    println!("===================================================");
    println!();
    println!("Convert CHNSpec CR30 spectrophotometer CSV exports into Argyll/CGATS");
    println!("TI3 measurement files using a TI2/TI1 target layout for patch order.");
    println!();
    println!("USAGE:");
    println!("    cr30-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    convert     Convert a CR30 CSV plus target layout to TI3 (main command)");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Convert with defaults (pass-through colorimetry):");
    println!("    cr30-processor convert --csv chart.csv --layout chart.ti2 --out chart.ti3");
    println!();
    println!("    # Spectral-preferring output for profiling workflows:");
    println!("    cr30-processor convert --csv chart.csv --layout chart.ti1 --out chart.ti3 \\");
    println!("                           --policy prefer-spectral");
    println!();
    println!("    # Promote additional layout header keys:");
    println!("    cr30-processor convert --csv chart.csv --layout chart.ti2 --out chart.ti3 \\");
    println!("                           --promote-key CHART_ID --promote-key TARGET_INSTRUMENT");
    println!();
    println!("For detailed help on any command, use:");
    println!("    cr30-processor <COMMAND> --help");
}
