//! Integration tests for the full CR30 CSV + layout -> TI3 pipeline
//!
//! These tests exercise the complete conversion path at file level: a CSV
//! export and a TI2/TI1 layout are written to disk, parsed, paired, and
//! written out as a TI3, which is then read back and checked.

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

use cr30_processor::app::services::layout_parser::LayoutParser;
use cr30_processor::app::services::measurement_parser::MeasurementParser;
use cr30_processor::app::services::ti3_writer::Ti3Writer;
use cr30_processor::cli::args::{Args, Commands};
use cr30_processor::cli::commands;
use cr30_processor::config::{ColorimetricPolicy, ConversionConfig};
use cr30_processor::Error;
use clap::Parser;

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{}", content).unwrap();
    path
}

/// CSV export: three measurement rows plus one all-empty instrument row,
/// decimal commas throughout
fn cr30_csv() -> String {
    [
        "Name;Date;Test Mode;Light Source/Angle;L*;a*;b*",
        "target;2024-03-01 10:15;SCI;D50/10°;95,12;-0,44;2,31",
        "target;2024-03-01 10:16;SCI;D50/10°;52,04;48,12;38,77",
        "target;2024-03-01 10:17;SCI;D50/10°;25,30;0,10;-30,20",
        "average;;;;;;",
    ]
    .join("\n")
}

/// RGB TI2: four samples, no SAMPLE_LOC column, 2x2 grid metadata
fn rgb_ti2() -> String {
    r#"CTI2

DESCRIPTOR "Argyll Calibration Target chart information 2"
ORIGINATOR "Argyll targen"
COLOR_REP "iRGB"
STEPS_IN_PASS "2"
PASSES_IN_STRIPS2 "2"
INDEX_ORDER "STRIP_THEN_PATCH"
PAPER_SIZE "A4"

NUMBER_OF_FIELDS 4
BEGIN_DATA_FORMAT
SAMPLE_ID RGB_R RGB_G RGB_B
END_DATA_FORMAT

NUMBER_OF_SETS 4
BEGIN_DATA
1 100.00000 0.00000 0.00000
2 0.00000 100.00000 0.00000
3 0.00000 0.00000 100.00000
4 100.00000 100.00000 100.00000
END_DATA
"#
    .to_string()
}

fn convert(
    dir: &TempDir,
    csv: &str,
    layout: &str,
    config: ConversionConfig,
) -> (cr30_processor::app::services::ti3_writer::WriteSummary, String) {
    let csv_path = write_file(dir, "chart.csv", csv);
    let layout_path = write_file(dir, "chart.ti2", layout);
    let out_path = dir.path().join("chart.ti3");

    let measurements = MeasurementParser::new()
        .parse_file(&csv_path)
        .unwrap()
        .set;
    let layout_doc = LayoutParser::new().parse_file(&layout_path).unwrap();
    let summary = Ti3Writer::new(config)
        .write(&out_path, &layout_doc, &measurements)
        .unwrap();

    let content = std::fs::read_to_string(&out_path).unwrap();
    (summary, content)
}

#[test]
fn test_layout_surplus_truncates_and_derives_locations() {
    // Four layout samples, three CSV rows: the converter writes three sets
    // and the 2x2 grid still yields labels for the written rows.
    let dir = TempDir::new().unwrap();

    let (summary, content) = convert(&dir, &cr30_csv(), &rgb_ti2(), ConversionConfig::default());

    assert_eq!(summary.sets_written, 3);
    assert!(!summary.spectral_written);
    assert_eq!(summary.color_rep, "iRGB_LAB");

    assert!(content.starts_with("CTI3   \n\n"));
    assert!(content.contains("NUMBER_OF_SETS 3\n"));
    assert!(content.contains("SAMPLE_ID SAMPLE_LOC RGB_R RGB_G RGB_B LAB_L LAB_A LAB_B \n"));
    assert!(content.contains("1 \"A1\" 100.00000 0.00000 0.00000 95.12 -0.44 2.31 \n"));
    assert!(content.contains("2 \"A2\" 0.00000 100.00000 0.00000 52.04 48.12 38.77 \n"));
    assert!(content.contains("3 \"B1\" 0.00000 0.00000 100.00000 25.30 0.10 -30.20 \n"));
    assert!(!content.contains("\n4 "));

    // Illuminant inferred from the first descriptor, grid key promoted
    assert!(content.contains("# ILLUMINANT_CODE \"D50\"\n"));
    assert!(content.contains("# OBSERVER \"10 deg\"\n"));
    assert!(content.contains("PAPER_SIZE \"A4\"\n"));
    assert!(!content.contains("STEPS_IN_PASS"));
}

#[test]
fn test_spectral_prefer_spectral_end_to_end() {
    let dir = TempDir::new().unwrap();
    let csv = [
        "Name;Date;Test Mode;Light Source/Angle;L*;a*;b*;R400nm;R500nm;R600nm",
        "target;2024-03-01;SCI;D50/10°;95,12;-0,44;2,31;81,2;85,4;88,1",
        "target;2024-03-01;SCI;D50/10°;52,04;48,12;38,77;12,5;18,3;55,0",
        "target;2024-03-01;SCI;D50/10°;25,30;0,10;-30,20;40,0;8,2;3,1",
        "target;2024-03-01;SCI;D50/10°;10,00;0,00;0,00;5,0;6,0;7,0",
    ]
    .join("\n");
    let config = ConversionConfig {
        policy: ColorimetricPolicy::PreferSpectral,
        ..Default::default()
    };

    let (summary, content) = convert(&dir, &csv, &rgb_ti2(), config);

    assert_eq!(summary.sets_written, 4);
    assert!(summary.spectral_written);
    assert_eq!(summary.color_rep, "iRGB_XYZ");

    assert!(content.contains("INSTRUMENT_TYPE_SPECTRAL \"YES\"\n"));
    assert!(content.contains("SPECTRAL_BANDS \"3\"\n"));
    assert!(content.contains("SPECTRAL_START_NM \"400.000000\"\n"));
    assert!(content.contains("SPECTRAL_END_NM \"600.000000\"\n"));
    // Spectral suppresses the Lab columns entirely
    assert!(content.contains("SAMPLE_ID SAMPLE_LOC RGB_R RGB_G RGB_B SPEC_400 SPEC_500 SPEC_600 \n"));
    assert!(content.contains("1 \"A1\" 100.00000 0.00000 0.00000 81.200000 85.400000 88.100000 \n"));
    assert!(content.contains("4 \"B2\" 100.00000 100.00000 100.00000 5.000000 6.000000 7.000000 \n"));
}

#[test]
fn test_explicit_locations_win_over_derivation() {
    let dir = TempDir::new().unwrap();
    let layout = r#"CTI2

STEPS_IN_PASS "2"
PASSES_IN_STRIPS2 "2"

NUMBER_OF_FIELDS 5
BEGIN_DATA_FORMAT
SAMPLE_ID SAMPLE_LOC RGB_R RGB_G RGB_B
END_DATA_FORMAT

NUMBER_OF_SETS 4
BEGIN_DATA
1 "Q7" 100.00000 0.00000 0.00000
2 "Q8" 0.00000 100.00000 0.00000
3 "R7" 0.00000 0.00000 100.00000
4 "R8" 100.00000 100.00000 100.00000
END_DATA
"#;

    let (_, content) = convert(&dir, &cr30_csv(), layout, ConversionConfig::default());

    assert!(content.contains("1 \"Q7\" "));
    assert!(!content.contains("\"A1\""));
}

#[test]
fn test_malformed_layout_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let layout_path = write_file(&dir, "broken.ti2", "CTI2\nBEGIN_DATA\n1 0 0 0\nEND_DATA\n");
    let out_path = dir.path().join("chart.ti3");

    let result = LayoutParser::new().parse_file(&layout_path);

    assert!(matches!(result, Err(Error::LayoutParse { .. })));
    assert!(!out_path.exists());
}

#[test]
fn test_convert_command_preflight_missing_inputs() {
    let dir = TempDir::new().unwrap();
    let csv_path = write_file(&dir, "chart.csv", &cr30_csv());
    let missing = dir.path().join("nope.ti2");
    let out_path = dir.path().join("chart.ti3");

    let args = Args::parse_from([
        "cr30-processor",
        "convert",
        "--csv",
        csv_path.to_str().unwrap(),
        "--layout",
        missing.to_str().unwrap(),
        "--out",
        out_path.to_str().unwrap(),
        "-q",
    ]);

    let result = commands::run(args);

    assert!(matches!(result, Err(Error::InputNotFound { .. })));
    assert!(!out_path.exists());
}

#[test]
fn test_convert_command_end_to_end() {
    let dir = TempDir::new().unwrap();
    let csv_path = write_file(&dir, "chart.csv", &cr30_csv());
    let layout_path = write_file(&dir, "chart.ti2", &rgb_ti2());
    let out_path = dir.path().join("out").join("chart.ti3");

    let args = Args::parse_from([
        "cr30-processor",
        "convert",
        "--csv",
        csv_path.to_str().unwrap(),
        "--layout",
        layout_path.to_str().unwrap(),
        "--out",
        out_path.to_str().unwrap(),
        "--device-class",
        "DISPLAY",
        "-q",
    ]);
    match args.get_command() {
        Commands::Convert(ref convert_args) => assert!(convert_args.validate().is_ok()),
    }

    let summary = commands::run(args).unwrap();

    assert_eq!(summary.sets_written, 3);
    let content = std::fs::read_to_string(&out_path).unwrap();
    assert!(content.contains("DEVICE_CLASS \"DISPLAY\"\n"));
    assert!(content.ends_with("END_DATA\n"));
}
