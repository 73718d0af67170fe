//! Application constants for the CR30 processor
//!
//! CGATS structural markers, device channel naming, wavelength bounds, and
//! output formatting defaults shared across the parsers and the TI3 writer.

// =============================================================================
// CGATS structural markers
// =============================================================================

/// TI3 file signature line (trailing spaces are part of the format)
pub const TI3_SIGNATURE: &str = "CTI3   ";

/// File-signature prefix shared by TI1/TI2/TI3 files
pub const CGATS_SIGNATURE_PREFIX: &str = "CTI";

pub const BEGIN_DATA_FORMAT: &str = "BEGIN_DATA_FORMAT";
pub const END_DATA_FORMAT: &str = "END_DATA_FORMAT";
pub const BEGIN_DATA: &str = "BEGIN_DATA";
pub const END_DATA: &str = "END_DATA";

/// Marker bounding the provenance header region of a layout file
pub const NUMBER_OF_FIELDS_MARKER: &str = "NUMBER_OF_FIELDS";

// =============================================================================
// Layout field names and header keys
// =============================================================================

pub const SAMPLE_ID_FIELD: &str = "SAMPLE_ID";
pub const SAMPLE_LOC_FIELD: &str = "SAMPLE_LOC";

/// Recognized device-space field prefixes, in detection order
pub const DEVICE_FIELD_PREFIXES: &[&str] = &["RGB_", "CMYK_", "GRAY_", "K_"];

/// Canonical per-channel fallback when no prefixed fields are declared
pub const CANONICAL_DEVICE_FIELDS: &[&str] = &[
    "RGB_R", "RGB_G", "RGB_B", "CMYK_C", "CMYK_M", "CMYK_Y", "CMYK_K",
];

/// Layout header key holding the patch-per-strip count (columns)
pub const STEPS_IN_PASS_KEY: &str = "STEPS_IN_PASS";

/// Layout header key holding the strip count (rows)
pub const PASSES_IN_STRIPS_KEY: &str = "PASSES_IN_STRIPS2";

/// Layout header key selecting the patch traversal order
pub const INDEX_ORDER_KEY: &str = "INDEX_ORDER";

/// Number of leading layout lines scanned for a COLOR_REP declaration
pub const COLOR_REP_SCAN_LINES: usize = 80;

/// Header keys promoted verbatim from the layout into the TI3 header
pub const DEFAULT_PROMOTED_HEADER_KEYS: &[&str] = &["COMP_GREY_STEPS", "PAPER_SIZE", "CHART_ID"];

// =============================================================================
// Measurement CSV conventions
// =============================================================================

/// CR30 exports are semicolon-separated
pub const CSV_DELIMITER: u8 = b';';

/// Plausible spectral wavelength range in nanometers
pub const SPECTRAL_MIN_NM: u32 = 300;
pub const SPECTRAL_MAX_NM: u32 = 1100;

// =============================================================================
// Output formatting
// =============================================================================

/// Fixed decimal places per field group; downstream tools parse
/// fixed-precision tokens, so these are part of the output contract.
pub const DEVICE_VALUE_DECIMALS: usize = 5;
pub const XYZ_DECIMALS: usize = 6;
pub const LAB_DECIMALS: usize = 2;
pub const SPECTRAL_DECIMALS: usize = 6;

/// CREATED header timestamp format (Argyll convention)
pub const CREATED_TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

pub const DEFAULT_DEVICE_CLASS: &str = "OUTPUT";
pub const DEFAULT_DESCRIPTOR: &str = "CR30 converted measurements";
pub const DEFAULT_ORIGINATOR: &str = "cr30_processor";

// =============================================================================
// Reference whites (Lab -> XYZ back-fill)
// =============================================================================

/// D50 reference white (X, Y, Z)
pub const D50_WHITE: [f64; 3] = [96.422, 100.000, 82.521];

/// D65 reference white (X, Y, Z)
pub const D65_WHITE: [f64; 3] = [95.047, 100.000, 108.883];

// =============================================================================
// Helper functions
// =============================================================================

/// Check whether a declared layout field names a device channel
pub fn is_device_field(name: &str) -> bool {
    DEVICE_FIELD_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Check whether a wavelength is a plausible spectral band
pub fn is_plausible_wavelength(nm: u32) -> bool {
    (SPECTRAL_MIN_NM..=SPECTRAL_MAX_NM).contains(&nm)
}
