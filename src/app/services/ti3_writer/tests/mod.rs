//! Test fixtures and helpers for the TI3 writer tests

use std::collections::BTreeMap;

use crate::app::models::{
    DeviceSample, LayoutDocument, LocationEntry, MeasurementRecord, MeasurementSet,
};


/// A measurement row carrying only a Lab triple
pub fn record_lab(l: f64, a: f64, b: f64) -> MeasurementRecord {
    MeasurementRecord {
        l: Some(l),
        a: Some(a),
        b: Some(b),
        ..Default::default()
    }
}

/// A measurement row carrying only an XYZ triple
pub fn record_xyz(x: f64, y: f64, z: f64) -> MeasurementRecord {
    MeasurementRecord {
        x: Some(x),
        y: Some(y),
        z: Some(z),
        ..Default::default()
    }
}

/// A measurement row carrying only spectral bands
pub fn record_spectral(bands: &[(u32, f64)]) -> MeasurementRecord {
    MeasurementRecord {
        spectral: bands.iter().copied().collect::<BTreeMap<u32, f64>>(),
        ..Default::default()
    }
}

pub fn measurement_set(records: Vec<MeasurementRecord>) -> MeasurementSet {
    MeasurementSet {
        records,
        ..Default::default()
    }
}

/// An RGB layout with `n` samples and no explicit locations
pub fn rgb_layout(n: u32) -> LayoutDocument {
    LayoutDocument {
        device_fields: vec!["RGB_R".to_string(), "RGB_G".to_string(), "RGB_B".to_string()],
        samples: (1..=n)
            .map(|id| DeviceSample {
                id,
                values: vec![id as f64 * 10.0, 0.0, 0.0],
            })
            .collect(),
        locations: Vec::new(),
        color_rep: Some("iRGB".to_string()),
        header_lines: Vec::new(),
    }
}

/// Attach explicit location labels to a layout, one per sample
pub fn with_locations(mut layout: LayoutDocument, labels: &[&str]) -> LayoutDocument {
    layout.locations = layout
        .samples
        .iter()
        .zip(labels)
        .map(|(s, label)| LocationEntry {
            id: s.id,
            label: label.to_string(),
        })
        .collect();
    layout
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} within {} of {}",
        actual,
        tolerance,
        expected
    );
}
