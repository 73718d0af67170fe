//! Layout header key-value extraction
//!
//! The provenance region of a TI2/TI1 file consists of `KEY value` or
//! `KEY "value"` lines. Values are read with one layer of quotes stripped;
//! for header promotion the raw remainder (quotes included) is wanted
//! instead, so both forms are provided.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

fn key_value_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^([A-Z0-9_]+)\s+"?([^"]+)"?\s*$"#).expect("static header key-value regex")
    })
}

fn key_raw_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Z0-9_]+)\s+(.*)$").expect("static header key-raw regex"))
}

/// Split a header line into (key, unquoted value)
pub fn split_key_value(line: &str) -> Option<(String, String)> {
    let caps = key_value_re().captures(line.trim())?;
    Some((caps[1].to_string(), caps[2].trim().to_string()))
}

/// Split a header line into (key, raw remainder with quoting preserved)
pub fn split_key_raw(line: &str) -> Option<(String, String)> {
    let caps = key_raw_re().captures(line.trim())?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Parsed view of the layout's provenance header lines
#[derive(Debug, Clone, Default)]
pub struct LayoutHeader {
    map: HashMap<String, String>,
}

impl LayoutHeader {
    /// Build the key-value map from retained header lines
    pub fn parse(lines: &[String]) -> Self {
        let mut map = HashMap::new();
        for line in lines {
            if let Some((key, value)) = split_key_value(line) {
                map.insert(key, value);
            }
        }
        Self { map }
    }

    /// Unquoted value for a header key
    pub fn value(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    /// Positive integer value, tolerating a floating-point textual form
    /// ("8" and "8.0" both yield 8). Zero, negatives, and fractional values
    /// yield `None`.
    pub fn positive_int(&self, key: &str) -> Option<u32> {
        let raw = self.value(key)?.trim();
        if raw.is_empty() {
            return None;
        }
        let parsed = raw.parse::<f64>().ok()?;
        if !parsed.is_finite() || parsed <= 0.0 || parsed.fract() != 0.0 {
            return None;
        }
        Some(parsed as u32)
    }
}
