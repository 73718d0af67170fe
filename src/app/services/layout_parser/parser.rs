//! Core TI2/TI1 parser implementation
//!
//! Locates the data-format and data blocks, selects device channel fields,
//! and extracts the sample table. Stray lines inside the data block are
//! skipped rather than raised: real layout files carry occasional noise.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::app::models::{DeviceSample, LayoutDocument, LocationEntry};
use crate::app::services::measurement_parser::field_parsers::parse_decimal;
use crate::constants::{
    BEGIN_DATA, BEGIN_DATA_FORMAT, CANONICAL_DEVICE_FIELDS, CGATS_SIGNATURE_PREFIX,
    COLOR_REP_SCAN_LINES, END_DATA, END_DATA_FORMAT, NUMBER_OF_FIELDS_MARKER, SAMPLE_LOC_FIELD,
    is_device_field,
};
use crate::{Error, Result};

fn color_rep_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^COLOR_REP\s+"([^"]+)""#).expect("static COLOR_REP regex"))
}

/// Parser for Argyll/CGATS TI2 and TI1 target layout files
#[derive(Debug, Default)]
pub struct LayoutParser;

impl LayoutParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a layout file into a [`LayoutDocument`]
    pub fn parse_file(&self, path: &Path) -> Result<LayoutDocument> {
        info!("Parsing layout file: {}", path.display());

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read layout file {}", path.display()), e))?;

        self.parse_content(&content, &path.display().to_string())
    }

    /// Parse layout text; `source` names the file in error messages
    pub fn parse_content(&self, content: &str, source: &str) -> Result<LayoutDocument> {
        let lines: Vec<&str> = content.lines().collect();

        let color_rep = lines
            .iter()
            .take(COLOR_REP_SCAN_LINES)
            .find_map(|line| color_rep_re().captures(line))
            .map(|caps| caps[1].to_string());

        let (fmt_start, fmt_end) = locate_format_block(&lines, source)?;
        let header_lines = collect_header_lines(&lines, fmt_start);

        let fields: Vec<String> = lines[fmt_start..fmt_end]
            .iter()
            .flat_map(|line| line.split_whitespace())
            .map(|token| token.to_string())
            .collect();

        let device_fields = select_device_fields(&fields);
        if device_fields.is_empty() {
            warn!("Layout declares no recognizable device channel fields");
        }

        // Positions in the full declared field list, not a device-only re-index
        let device_positions: Vec<Option<usize>> = device_fields
            .iter()
            .map(|name| fields.iter().position(|f| f == name))
            .collect();
        let loc_position = fields.iter().position(|f| f == SAMPLE_LOC_FIELD);

        let mut samples: Vec<DeviceSample> = Vec::new();
        let mut locations: Vec<LocationEntry> = Vec::new();

        let mut in_data = false;
        for line in &lines {
            let trimmed = line.trim();
            if trimmed == BEGIN_DATA {
                in_data = true;
                continue;
            }
            if trimmed == END_DATA {
                break;
            }
            if !in_data || trimmed.is_empty() {
                continue;
            }

            let tokens: Vec<&str> = trimmed.split_whitespace().collect();
            // Stray non-numeric lines are tolerated, not errors
            let id = match tokens[0].parse::<u32>() {
                Ok(id) => id,
                Err(_) => {
                    debug!("Skipping non-sample line in data block: {}", trimmed);
                    continue;
                }
            };

            if let Some(pos) = loc_position {
                if let Some(raw) = tokens.get(pos) {
                    locations.push(LocationEntry {
                        id,
                        label: strip_quotes(raw).to_string(),
                    });
                }
            }

            let values = device_positions
                .iter()
                .map(|pos| {
                    pos.and_then(|p| tokens.get(p))
                        .and_then(|token| parse_decimal(token))
                        .unwrap_or(0.0)
                })
                .collect();

            samples.push(DeviceSample { id, values });
        }

        samples.sort_by_key(|s| s.id);
        locations.sort_by_key(|l| l.id);

        info!(
            "Parsed layout: {} device fields, {} samples, {} explicit locations",
            device_fields.len(),
            samples.len(),
            locations.len()
        );

        Ok(LayoutDocument {
            device_fields,
            samples,
            locations,
            color_rep,
            header_lines,
        })
    }
}

/// Locate the data-format block; returns (first line inside, end marker line)
fn locate_format_block(lines: &[&str], source: &str) -> Result<(usize, usize)> {
    let mut fmt_start = None;
    let mut fmt_end = None;
    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed == BEGIN_DATA_FORMAT {
            fmt_start = Some(i + 1);
        } else if trimmed == END_DATA_FORMAT {
            fmt_end = Some(i);
            break;
        }
    }

    match (fmt_start, fmt_end) {
        (Some(start), Some(end)) if start <= end => Ok((start, end)),
        _ => Err(Error::layout_parse(source, "Missing data format block")),
    }
}

/// Retain non-blank header lines preceding the NUMBER_OF_FIELDS marker
/// (falling back to the line before the format block), excluding the file
/// signature line.
fn collect_header_lines(lines: &[&str], fmt_start: usize) -> Vec<String> {
    let mut header_end = fmt_start.saturating_sub(1);
    for i in (0..fmt_start).rev() {
        if lines[i].trim().starts_with(NUMBER_OF_FIELDS_MARKER) {
            header_end = i;
            break;
        }
    }

    lines[..header_end]
        .iter()
        .map(|line| line.trim_end())
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !line.trim().starts_with(CGATS_SIGNATURE_PREFIX))
        .map(|line| line.to_string())
        .collect()
}

/// Filter declared fields to device channels; if no prefixed field matches,
/// fall back to the canonical per-channel names in canonical order.
fn select_device_fields(fields: &[String]) -> Vec<String> {
    let prefixed: Vec<String> = fields
        .iter()
        .filter(|f| is_device_field(f))
        .cloned()
        .collect();
    if !prefixed.is_empty() {
        return prefixed;
    }

    CANONICAL_DEVICE_FIELDS
        .iter()
        .filter(|name| fields.iter().any(|f| f == *name))
        .map(|name| name.to_string())
        .collect()
}

/// Strip a single layer of surrounding double quotes
fn strip_quotes(token: &str) -> &str {
    let bytes = token.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"' {
        &token[1..token.len() - 1]
    } else {
        token
    }
}
