//! CR30 measurement CSV parser
//!
//! Tolerant parser for CHNSpec CR30 ColorQC export files: semicolon
//! separated, decimal-comma aware, and readable under several text
//! encodings. Produces an ordered [`crate::app::models::MeasurementSet`]
//! whose row order is the pairing key against the layout's sample table.
//!
//! ## Architecture
//!
//! - [`parser`] - Core parsing orchestration and file handling
//! - [`encoding`] - Text decoding with encoding fallback
//! - [`column_mapping`] - Header normalization and spectral column discovery
//! - [`field_parsers`] - Numeric and light-source field parsing
//! - [`stats`] - Parsing statistics and result structures

pub mod column_mapping;
pub mod encoding;
pub mod field_parsers;
pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::ColumnMap;
pub use parser::MeasurementParser;
pub use stats::{ParseResult, ParseStats};
