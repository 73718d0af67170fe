//! Command-line argument definitions for the CR30 processor
//!
//! Defines the complete CLI interface using the clap derive API.

use crate::config::{ColorimetricPolicy, ConversionConfig};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the CR30 measurement converter
///
/// Converts CHNSpec CR30 spectrophotometer CSV exports into Argyll/CGATS
/// TI3 measurement files, pairing each CSV row with the matching patch of
/// a TI2/TI1 target layout by strict index order.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cr30-processor",
    version,
    about = "Convert CHNSpec CR30 CSV measurements to Argyll CGATS TI3 format",
    long_about = "Converts CHNSpec CR30 spectrophotometer CSV exports into Argyll/CGATS TI3 \
                  measurement files. The TI2/TI1 target layout is authoritative for device \
                  values and patch order; CSV rows are paired with layout patches strictly \
                  by position. Handles decimal-comma numbers, mixed text encodings, patch \
                  location reconstruction, and spectral band alignment."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the CR30 processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert a CR30 CSV plus target layout into a TI3 file (main command)
    Convert(ConvertArgs),
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// CR30 measurement CSV export
    ///
    /// Semicolon-separated export from the CHNSpec instrument software.
    /// Decimal commas and non-UTF-8 encodings are handled automatically.
    #[arg(
        long = "csv",
        value_name = "FILE",
        help = "CR30 measurement CSV export"
    )]
    pub csv_path: PathBuf,

    /// TI2/TI1 target layout file
    ///
    /// Authoritative source for device channel values and patch order.
    #[arg(
        long = "layout",
        value_name = "FILE",
        help = "TI2/TI1 target layout file"
    )]
    pub layout_path: PathBuf,

    /// Output TI3 path
    ///
    /// Parent directories are created if missing.
    #[arg(short = 'o', long = "out", value_name = "FILE", help = "Output TI3 path")]
    pub out_path: PathBuf,

    /// DEVICE_CLASS header value written to the TI3
    #[arg(
        long = "device-class",
        value_name = "CLASS",
        default_value = "OUTPUT",
        help = "DEVICE_CLASS header value (OUTPUT, DISPLAY, INPUT)"
    )]
    pub device_class: String,

    /// Colorimetric field-selection policy
    ///
    /// `pass-through` writes XYZ and/or Lab whenever the CSV carries them.
    /// `prefer-spectral` suppresses XYZ/Lab when spectral data is present
    /// and otherwise picks a single PCS, back-filling XYZ from Lab.
    #[arg(
        long = "policy",
        value_enum,
        default_value = "pass-through",
        help = "Colorimetric field-selection policy"
    )]
    pub policy: PolicyArg,

    /// Prefer Lab over XYZ when the prefer-spectral policy picks a single PCS
    #[arg(
        long = "prefer-lab",
        help = "Prefer Lab over XYZ when choosing a single PCS"
    )]
    pub prefer_lab: bool,

    /// Layout header keys to promote verbatim into the TI3 header
    ///
    /// Repeatable. Replaces the default allow-list
    /// (COMP_GREY_STEPS, PAPER_SIZE, CHART_ID) when given.
    #[arg(
        long = "promote-key",
        value_name = "KEY",
        help = "Layout header key to promote into the TI3 header (repeatable)"
    )]
    pub promote_keys: Vec<String>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// CLI surface for [`ColorimetricPolicy`]
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Write XYZ/Lab whenever present; never convert
    PassThrough,
    /// Spectral suppresses XYZ/Lab; otherwise pick a single PCS
    PreferSpectral,
}

impl From<PolicyArg> for ColorimetricPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::PassThrough => ColorimetricPolicy::PassThrough,
            PolicyArg::PreferSpectral => ColorimetricPolicy::PreferSpectral,
        }
    }
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl ConvertArgs {
    /// Validate the convert command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.device_class.trim().is_empty() {
            return Err(Error::configuration("Device class cannot be empty"));
        }

        if let Some(key) = self
            .promote_keys
            .iter()
            .find(|k| k.trim().is_empty() || !k.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'))
        {
            return Err(Error::configuration(format!(
                "Invalid header key '{}': expected uppercase letters, digits, and underscores",
                key
            )));
        }

        Ok(())
    }

    /// Build the conversion configuration from the parsed flags
    pub fn to_config(&self) -> ConversionConfig {
        let mut config = ConversionConfig {
            device_class: self.device_class.clone(),
            policy: self.policy.into(),
            prefer_xyz_over_lab: !self.prefer_lab,
            ..Default::default()
        };
        if !self.promote_keys.is_empty() {
            config.promoted_header_keys = self.promote_keys.clone();
        }
        config
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert_args(extra: &[&str]) -> ConvertArgs {
        let mut argv = vec![
            "cr30-processor",
            "convert",
            "--csv",
            "m.csv",
            "--layout",
            "t.ti2",
            "--out",
            "o.ti3",
        ];
        argv.extend(extra);
        let args = Args::parse_from(argv);
        match args.get_command() {
            Commands::Convert(c) => c,
        }
    }

    #[test]
    fn test_defaults() {
        let args = convert_args(&[]);
        assert!(args.validate().is_ok());

        let config = args.to_config();
        assert_eq!(config.device_class, "OUTPUT");
        assert_eq!(config.policy, ColorimetricPolicy::PassThrough);
        assert!(config.prefer_xyz_over_lab);
        assert!(config.promotes_key("PAPER_SIZE"));
    }

    #[test]
    fn test_policy_and_prefer_lab_flags() {
        let args = convert_args(&["--policy", "prefer-spectral", "--prefer-lab"]);

        let config = args.to_config();
        assert_eq!(config.policy, ColorimetricPolicy::PreferSpectral);
        assert!(!config.prefer_xyz_over_lab);
    }

    #[test]
    fn test_promote_keys_replace_defaults() {
        let args = convert_args(&["--promote-key", "CHART_ID", "--promote-key", "TARGET_INSTRUMENT"]);
        assert!(args.validate().is_ok());

        let config = args.to_config();
        assert!(config.promotes_key("CHART_ID"));
        assert!(config.promotes_key("TARGET_INSTRUMENT"));
        assert!(!config.promotes_key("PAPER_SIZE"));
    }

    #[test]
    fn test_invalid_promote_key_rejected() {
        let args = convert_args(&["--promote-key", "lower case"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(convert_args(&[]).get_log_level(), "warn");
        assert_eq!(convert_args(&["-v"]).get_log_level(), "info");
        assert_eq!(convert_args(&["-vv"]).get_log_level(), "debug");
        assert_eq!(convert_args(&["-vvv"]).get_log_level(), "trace");
        assert_eq!(convert_args(&["-q"]).get_log_level(), "error");
    }
}
