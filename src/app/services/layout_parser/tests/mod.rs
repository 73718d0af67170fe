//! Test fixtures and helpers for the layout parser tests

use std::io::Write;
use tempfile::NamedTempFile;


/// A small RGB TI2 with an explicit SAMPLE_LOC column
pub fn create_ti2_with_locations() -> String {
    r#"CTI2

DESCRIPTOR "Argyll Calibration Target chart information 2"
ORIGINATOR "Argyll targen"
CREATED "Mon Mar  4 10:00:00 2024"
COLOR_REP "iRGB"
STEPS_IN_PASS "2"
PASSES_IN_STRIPS2 "2"
INDEX_ORDER "STRIP_THEN_PATCH"
COMP_GREY_STEPS "16"
PAPER_SIZE "A4"

NUMBER_OF_FIELDS 6
BEGIN_DATA_FORMAT
SAMPLE_ID SAMPLE_LOC RGB_R RGB_G RGB_B
END_DATA_FORMAT

NUMBER_OF_SETS 4
BEGIN_DATA
2 "A2" 0.00000 100.00000 0.00000
1 "A1" 100.00000 0.00000 0.00000
4 "B2" 100.00000 100.00000 100.00000
3 "B1" 0.00000 0.00000 100.00000
END_DATA
"#
    .to_string()
}

/// A CMYK TI1 with no SAMPLE_LOC column and no grid metadata
pub fn create_ti1_without_locations() -> String {
    r#"CTI1

DESCRIPTOR "Argyll Calibration Target chart information 1"
ORIGINATOR "Argyll targen"
COLOR_REP "CMYK"

NUMBER_OF_FIELDS 8
BEGIN_DATA_FORMAT
SAMPLE_ID CMYK_C CMYK_M CMYK_Y CMYK_K XYZ_X XYZ_Y XYZ_Z
END_DATA_FORMAT

NUMBER_OF_SETS 3
BEGIN_DATA
1 0.00000 0.00000 0.00000 0.00000 84.6 87.9 73.1
2 100.00000 0.00000 0.00000 0.00000 17.2 24.5 31.0
3 0.00000 100.00000 0.00000 0.00000 33.5 17.9 14.2
END_DATA
"#
    .to_string()
}

/// Write content to a temp file and return its handle
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}
