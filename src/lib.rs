//! CR30 Processor Library
//!
//! A Rust library for converting CHNSpec CR30 spectrophotometer CSV exports
//! into Argyll/CGATS TI3 measurement files, using a TI2/TI1 target layout as
//! the authoritative source for device values and patch order.
//!
//! This library provides tools for:
//! - Parsing CR30 CSV exports with encoding fallback and decimal-comma support
//! - Parsing TI2/TI1 layout files (device channels, sample table, patch locations)
//! - Deterministic SAMPLE_LOC reconstruction from layout header metadata
//! - Writing TI3 files with strict index pairing and spectral band intersection

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod layout_parser;
        pub mod location_deriver;
        pub mod measurement_parser;
        pub mod ti3_writer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{DeviceSample, LayoutDocument, LocationEntry, MeasurementRecord, MeasurementSet};
pub use config::{ColorimetricPolicy, ConversionConfig};

/// Result type alias for the CR30 processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for CR30 conversion operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required input file does not exist
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Measurement CSV parsing error
    #[error("Measurement CSV error in file '{file}': {message}")]
    MeasurementParse { file: String, message: String },

    /// Layout (TI2/TI1) parsing error
    #[error("Layout file error in file '{file}': {message}")]
    LayoutParse { file: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an input-not-found error
    pub fn input_not_found(path: impl Into<String>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a measurement CSV parsing error
    pub fn measurement_parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MeasurementParse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a layout parsing error
    pub fn layout_parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LayoutParse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
