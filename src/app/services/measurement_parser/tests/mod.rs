//! Test fixtures and helpers for the CR30 CSV parser tests

use std::io::Write;
use tempfile::NamedTempFile;

mod field_parser_tests;

/// A representative CR30 export: Lab + XYZ + three spectral bands,
/// decimal-comma numerics, and one trailing non-measurement row.
pub fn create_test_cr30_csv() -> String {
    [
        "Name;Date;Test Mode;Light Source/Angle;L*;a*;b*;X;Y;Z;R400nm;R500nm;R600nm",
        "target;2024-03-01 10:15;SCI;D50/10°;95,12;-0,44;2,31;89,123456;94,5;78,9;81,2;85,4;88,1",
        "target;2024-03-01 10:16;SCI;D50/10°;52,04;48,12;38,77;33,1;25,2;7,8;12,5;18,3;55,0",
        "target;2024-03-01 10:17;SCI;D50/10°;25,3;0,1;-30,2;7,1;5,9;20,3;40,0;8,2;3,1",
        "average;;;;;;;;;;;;",
    ]
    .join("\n")
}

/// A Lab-only export with point decimals and no spectral columns
pub fn create_lab_only_csv() -> String {
    [
        "Name;Date;Test Mode;Light Source/Angle;L;a;b",
        "target;2024-01-05;SCE;D65/2;50.00;10.00;-10.00",
        "target;2024-01-05;SCE;D65/2;70.25;-5.50;3.75",
    ]
    .join("\n")
}

/// Write content to a temp file and return its handle
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// Write raw bytes to a temp file and return its handle
pub fn create_temp_file_bytes(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}
