//! Chart location derivation
//!
//! When a layout carries no explicit SAMPLE_LOC column, patch locations can
//! still be reconstructed from the chart grid metadata: STEPS_IN_PASS gives
//! the patches per strip, PASSES_IN_STRIPS2 the strip count, and INDEX_ORDER
//! the traversal direction. Derivation only applies when the grid exactly
//! accounts for every sample; any mismatch yields no locations at all rather
//! than a partial or wrapped grid.

use tracing::{debug, warn};

use crate::app::models::{DeviceSample, LocationEntry};
use crate::app::services::layout_parser::LayoutHeader;
use crate::constants::{INDEX_ORDER_KEY, PASSES_IN_STRIPS_KEY, STEPS_IN_PASS_KEY};

/// Traversal order of sample ids across the chart grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexOrder {
    /// Consecutive ids walk along a strip before moving to the next one
    #[default]
    StripThenPatch,
    /// Consecutive ids walk down the patch position across strips
    PatchThenStrip,
}

impl IndexOrder {
    /// Parse the INDEX_ORDER header value, defaulting on anything unrecognized
    pub fn from_header_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_uppercase()) {
            Some(v) if v == "PATCH_THEN_STRIP" => Self::PatchThenStrip,
            _ => Self::StripThenPatch,
        }
    }
}

/// Derives grid locations for samples lacking an explicit SAMPLE_LOC column
#[derive(Debug, Default)]
pub struct LocationDeriver;

impl LocationDeriver {
    pub fn new() -> Self {
        Self
    }

    /// Derive one location per sample, in sample order.
    ///
    /// Returns an empty vector when the grid metadata is absent or does not
    /// exactly cover the sample count.
    pub fn derive(&self, header: &LayoutHeader, samples: &[DeviceSample]) -> Vec<LocationEntry> {
        let steps = match header.positive_int(STEPS_IN_PASS_KEY) {
            Some(n) => n as usize,
            None => {
                debug!("No usable {} in layout header", STEPS_IN_PASS_KEY);
                return Vec::new();
            }
        };
        let passes = match header.positive_int(PASSES_IN_STRIPS_KEY) {
            Some(n) => n as usize,
            None => {
                debug!("No usable {} in layout header", PASSES_IN_STRIPS_KEY);
                return Vec::new();
            }
        };

        if steps * passes != samples.len() {
            warn!(
                "Chart grid {}x{} does not cover {} samples; skipping location derivation",
                passes,
                steps,
                samples.len()
            );
            return Vec::new();
        }

        let order = IndexOrder::from_header_value(header.value(INDEX_ORDER_KEY));
        debug!(
            "Deriving locations for {} samples ({:?}, {} strips of {})",
            samples.len(),
            order,
            passes,
            steps
        );

        samples
            .iter()
            .enumerate()
            .map(|(i, sample)| {
                let (strip, patch) = match order {
                    IndexOrder::StripThenPatch => (i / steps, i % steps),
                    IndexOrder::PatchThenStrip => (i % passes, i / passes),
                };
                LocationEntry {
                    id: sample.id,
                    label: format!("{}{}", strip_label(strip), patch + 1),
                }
            })
            .collect()
    }
}

/// Bijective base-26 strip label: 0 -> "A", 25 -> "Z", 26 -> "AA"
fn strip_label(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).expect("ASCII strip label")
}
