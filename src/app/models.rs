//! Domain models for CR30 conversion
//!
//! Parsed representations of the two inputs: the CR30 measurement CSV and
//! the TI2/TI1 target layout. All structures are owned by a single
//! conversion run; nothing outlives one invocation.

use std::collections::BTreeMap;

/// One measurement row from the CR30 CSV export.
///
/// Colorimetric components are presence-tagged (`Option`) rather than
/// sentinel-valued so that a missing reading is never mistaken for zero
/// during aggregation or band intersection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementRecord {
    /// Patch name as exported (often "target"); opaque
    pub name: String,

    /// Acquisition date string; opaque
    pub date: String,

    /// Instrument test mode string; opaque
    pub test_mode: String,

    /// Light source / observer angle descriptor, e.g. "D50/10°"
    pub light_source_angle: String,

    pub l: Option<f64>,
    pub a: Option<f64>,
    pub b: Option<f64>,

    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,

    /// Reflectance (0-100) keyed by wavelength in nanometers; empty if the
    /// export carried no spectral columns
    pub spectral: BTreeMap<u32, f64>,
}

impl MeasurementRecord {
    /// Complete Lab triple, if all three components are present
    pub fn lab(&self) -> Option<(f64, f64, f64)> {
        match (self.l, self.a, self.b) {
            (Some(l), Some(a), Some(b)) => Some((l, a, b)),
            _ => None,
        }
    }

    /// Complete XYZ triple, if all three components are present
    pub fn xyz(&self) -> Option<(f64, f64, f64)> {
        match (self.x, self.y, self.z) {
            (Some(x), Some(y), Some(z)) => Some((x, y, z)),
            _ => None,
        }
    }

    pub fn has_spectral(&self) -> bool {
        !self.spectral.is_empty()
    }
}

/// Full measurement parse result: rows in original file order (array index
/// is the pairing key) plus illuminant/observer metadata inferred from the
/// first recognizable light-source descriptor.
#[derive(Debug, Clone, Default)]
pub struct MeasurementSet {
    pub records: Vec<MeasurementRecord>,

    /// Illuminant code, e.g. "D50", if derivable
    pub illuminant: Option<String>,

    /// Observer angle in degrees (2 or 10 in practice), if derivable
    pub observer_deg: Option<u32>,
}

impl MeasurementSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Any row carries an L component.
    ///
    /// Keyed off the single component, not the full triple: a row with L
    /// but no a/b still selects the Lab column group, and its incomplete
    /// triple is zero-filled at write time.
    pub fn has_lab(&self) -> bool {
        self.records.iter().any(|r| r.l.is_some())
    }

    /// Any row carries an X component.
    ///
    /// Same single-component rule as [`Self::has_lab`]: X without Y/Z
    /// selects the XYZ column group, with zero-fill for the gaps.
    pub fn has_xyz(&self) -> bool {
        self.records.iter().any(|r| r.x.is_some())
    }

    /// Any row carries spectral data
    pub fn has_spectral(&self) -> bool {
        self.records.iter().any(|r| r.has_spectral())
    }
}

/// One layout data row: sample id plus device channel values in declared
/// field order, zero-filled for declared-but-absent values.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSample {
    pub id: u32,
    pub values: Vec<f64>,
}

/// A (sample id, patch location label) pair, e.g. `(1, "A1")`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationEntry {
    pub id: u32,
    pub label: String,
}

/// Device-space family inferred from device field prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceFamily {
    Rgb,
    Cmyk,
    /// Grayscale, single-channel black, or anything unrecognized
    Other,
}

impl DeviceFamily {
    /// Detect the family from the layout's device field names
    pub fn detect(device_fields: &[String]) -> Self {
        if device_fields.iter().any(|f| f.starts_with("RGB_")) {
            DeviceFamily::Rgb
        } else if device_fields.iter().any(|f| f.starts_with("CMYK_")) {
            DeviceFamily::Cmyk
        } else {
            DeviceFamily::Other
        }
    }

    /// COLOR_REP device tag for this family
    pub fn tag(&self) -> &'static str {
        match self {
            DeviceFamily::Rgb => "RGB",
            DeviceFamily::Cmyk => "CMYK",
            DeviceFamily::Other => "DEV",
        }
    }
}

/// Parsed TI2/TI1 layout document
#[derive(Debug, Clone, Default)]
pub struct LayoutDocument {
    /// Declared device channel field names, in declaration order
    pub device_fields: Vec<String>,

    /// Device sample table, sorted ascending by sample id
    pub samples: Vec<DeviceSample>,

    /// Explicit patch locations from a SAMPLE_LOC column, sorted ascending
    /// by sample id; empty when the layout declares none
    pub locations: Vec<LocationEntry>,

    /// COLOR_REP declaration, if present
    pub color_rep: Option<String>,

    /// Raw header lines preceding the data-format block, retained verbatim
    /// for key promotion and location derivation
    pub header_lines: Vec<String>,
}

impl LayoutDocument {
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Device family implied by the declared device fields
    pub fn device_family(&self) -> DeviceFamily {
        DeviceFamily::detect(&self.device_fields)
    }
}
