//! Core CR30 CSV parser implementation
//!
//! Orchestrates decoding, header analysis, and row extraction. Row-level
//! anomalies are tolerated: a data row is kept only if it carries at least
//! one of L or X, which is the sole filter separating measurement rows from
//! extraneous export rows.

use std::path::Path;
use tracing::{debug, info};

use super::column_mapping::ColumnMap;
use super::encoding::read_text_with_fallback;
use super::field_parsers::{get_decimal_field, get_string_field, parse_light_source};
use super::stats::{ParseResult, ParseStats};
use crate::app::models::{MeasurementRecord, MeasurementSet};
use crate::constants::CSV_DELIMITER;
use crate::{Error, Result};

/// Parser for CHNSpec CR30 ColorQC CSV exports
#[derive(Debug, Default)]
pub struct MeasurementParser;

impl MeasurementParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a CR30 CSV file into an ordered measurement set
    pub fn parse_file(&self, path: &Path) -> Result<ParseResult> {
        info!("Parsing CR30 CSV file: {}", path.display());

        let text = read_text_with_fallback(path)?;
        if text.trim().is_empty() {
            return Err(Error::measurement_parse(
                path.display().to_string(),
                "Empty CSV file",
            ));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(CSV_DELIMITER)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers().map_err(|e| {
            Error::measurement_parse(
                path.display().to_string(),
                format!("Failed to read CSV header: {}", e),
            )
        })?;

        let mapping = ColumnMap::analyze(headers);
        debug!(
            "Column map: lab={:?}/{:?}/{:?} xyz={:?}/{:?}/{:?} spectral_bands={}",
            mapping.l,
            mapping.a,
            mapping.b,
            mapping.x,
            mapping.y,
            mapping.z,
            mapping.spectral_band_count()
        );

        let mut stats = ParseStats::new();
        stats.spectral_columns = mapping.spectral_band_count();

        let mut set = MeasurementSet::default();

        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                // Malformed lines are export noise, never fatal
                Err(e) => {
                    debug!("Skipped unreadable CSV line: {}", e);
                    stats.total_rows += 1;
                    stats.rows_skipped += 1;
                    continue;
                }
            };

            if record.iter().all(|f| f.trim().is_empty()) {
                continue;
            }
            stats.total_rows += 1;

            match self.parse_row(&record, &mapping) {
                Some(row) => {
                    // First recognizable descriptor fixes illuminant/observer
                    if set.illuminant.is_none() {
                        if let Some((code, degrees)) = parse_light_source(&row.light_source_angle) {
                            set.illuminant = Some(code);
                            set.observer_deg = Some(degrees);
                        }
                    }
                    set.records.push(row);
                    stats.rows_parsed += 1;
                }
                None => {
                    stats.rows_skipped += 1;
                }
            }
        }

        info!(
            "Parsed {} measurement rows ({} skipped) from {}",
            stats.rows_parsed,
            stats.rows_skipped,
            path.display()
        );

        Ok(ParseResult { set, stats })
    }

    /// Parse one data row; `None` when the row carries neither Lab nor XYZ
    fn parse_row(&self, record: &csv::StringRecord, mapping: &ColumnMap) -> Option<MeasurementRecord> {
        let l = get_decimal_field(record, mapping.l);
        let x = get_decimal_field(record, mapping.x);

        // No L and no X means this is not a measurement row
        if l.is_none() && x.is_none() {
            return None;
        }

        let mut spectral = std::collections::BTreeMap::new();
        for &(index, nm) in &mapping.spectral {
            if let Some(value) = get_decimal_field(record, Some(index)) {
                spectral.insert(nm, value);
            }
        }

        Some(MeasurementRecord {
            name: get_string_field(record, mapping.name),
            date: get_string_field(record, mapping.date),
            test_mode: get_string_field(record, mapping.test_mode),
            light_source_angle: get_string_field(record, mapping.light_source_angle),
            l,
            a: get_decimal_field(record, mapping.a),
            b: get_decimal_field(record, mapping.b),
            x,
            y: get_decimal_field(record, mapping.y),
            z: get_decimal_field(record, mapping.z),
            spectral,
        })
    }
}
