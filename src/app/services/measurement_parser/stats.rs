//! Parsing statistics and result structures

use crate::app::models::MeasurementSet;

/// Statistics collected while parsing a CR30 CSV file
#[derive(Debug, Clone, Default)]
pub struct ParseStats {
    /// Non-blank data lines seen (header excluded)
    pub total_rows: usize,

    /// Rows accepted as measurement records
    pub rows_parsed: usize,

    /// Rows discarded for lacking all colorimetric data
    pub rows_skipped: usize,

    /// Spectral band columns discovered in the header
    pub spectral_columns: usize,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Complete result of parsing a CR30 CSV file
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub set: MeasurementSet,
    pub stats: ParseStats,
}
