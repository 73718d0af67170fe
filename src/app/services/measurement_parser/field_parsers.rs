//! Field parsing utilities for CR30 CSV records
//!
//! Numeric tokens use either `.` or `,` as the decimal separator depending
//! on the export locale; empty, "nan", and "null" tokens mean missing, and
//! any other unparsable token is also treated as missing rather than an
//! error (export noise is tolerated by design).

use csv::StringRecord;
use regex::Regex;
use std::sync::OnceLock;

/// Parse a decimal token, substituting a decimal comma.
///
/// Returns `None` for empty / "nan" / "null" / unparsable tokens.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let s = raw.trim().replace(',', ".");
    if s.is_empty() {
        return None;
    }
    let lower = s.to_lowercase();
    if lower == "nan" || lower == "null" {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Parse a light-source/angle descriptor like "D50/10°" or "D65/2".
///
/// Returns the upper-cased illuminant code and the observer angle.
pub fn parse_light_source(descriptor: &str) -> Option<(String, u32)> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9]+)\s*/\s*(\d+)\s*°?").expect("static light-source regex")
    });

    let caps = re.captures(descriptor.trim())?;
    let code = caps.get(1)?.as_str().to_uppercase();
    let degrees = caps.get(2)?.as_str().parse::<u32>().ok()?;
    Some((code, degrees))
}

/// Get a field from a record by optional column index, trimmed
pub fn get_field<'a>(record: &'a StringRecord, index: Option<usize>) -> Option<&'a str> {
    index.and_then(|i| record.get(i)).map(|s| s.trim())
}

/// Get a field as an owned string, empty when the column is absent
pub fn get_string_field(record: &StringRecord, index: Option<usize>) -> String {
    get_field(record, index).unwrap_or_default().to_string()
}

/// Parse a decimal field by optional column index
pub fn get_decimal_field(record: &StringRecord, index: Option<usize>) -> Option<f64> {
    get_field(record, index).and_then(parse_decimal)
}
