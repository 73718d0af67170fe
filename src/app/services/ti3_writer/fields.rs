//! Output field planning
//!
//! Decides which colorimetric columns appear in the TI3, computes the common
//! spectral band set, and assembles the declared field list. The plan is
//! computed once up front so the header and every data row agree.

use std::collections::BTreeSet;

use crate::app::models::{DeviceFamily, MeasurementSet};
use crate::config::{ColorimetricPolicy, ConversionConfig};
use crate::constants::{SAMPLE_ID_FIELD, SAMPLE_LOC_FIELD};

/// Colorimetric columns selected for output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorimetricSelection {
    pub include_xyz: bool,
    pub include_lab: bool,
    /// When XYZ is emitted and a row has only Lab, compute XYZ from Lab
    pub backfill_xyz_from_lab: bool,
}

impl ColorimetricSelection {
    /// Apply the configured policy to the measurement set's availability
    pub fn from_policy(config: &ConversionConfig, measurements: &MeasurementSet) -> Self {
        let has_lab = measurements.has_lab();
        let has_xyz = measurements.has_xyz();
        let has_spectral = measurements.has_spectral();

        match config.policy {
            ColorimetricPolicy::PassThrough => Self {
                include_xyz: has_xyz,
                include_lab: has_lab,
                backfill_xyz_from_lab: false,
            },
            ColorimetricPolicy::PreferSpectral => {
                if has_spectral {
                    Self {
                        include_xyz: false,
                        include_lab: false,
                        backfill_xyz_from_lab: false,
                    }
                } else if has_xyz && (!has_lab || config.prefer_xyz_over_lab) {
                    Self {
                        include_xyz: true,
                        include_lab: false,
                        backfill_xyz_from_lab: true,
                    }
                } else if has_lab {
                    Self {
                        include_xyz: false,
                        include_lab: true,
                        backfill_xyz_from_lab: false,
                    }
                } else {
                    Self {
                        include_xyz: false,
                        include_lab: false,
                        backfill_xyz_from_lab: false,
                    }
                }
            }
        }
    }

    /// COLOR_REP value: device tag plus the PCS the included columns imply.
    /// A spectral-only file still declares XYZ as the intended PCS.
    pub fn color_rep(&self, family: DeviceFamily) -> String {
        let pcs = if self.include_xyz {
            "XYZ"
        } else if self.include_lab {
            "LAB"
        } else {
            "XYZ"
        };
        format!("i{}_{}", family.tag(), pcs)
    }
}

/// Wavelengths common to every row that carries spectral data, sorted
/// ascending. Empty when no row has spectral data.
pub fn spectral_intersection(measurements: &MeasurementSet) -> Vec<u32> {
    let mut common: Option<BTreeSet<u32>> = None;
    for record in &measurements.records {
        if record.spectral.is_empty() {
            continue;
        }
        let bands: BTreeSet<u32> = record.spectral.keys().copied().collect();
        common = Some(match common {
            Some(acc) => acc.intersection(&bands).copied().collect(),
            None => bands,
        });
    }
    common.map(|set| set.into_iter().collect()).unwrap_or_default()
}

/// Assemble the declared field list in output order
pub fn build_field_list(
    include_loc: bool,
    device_fields: &[String],
    selection: ColorimetricSelection,
    spectral_bands: &[u32],
) -> Vec<String> {
    let mut fields: Vec<String> = vec![SAMPLE_ID_FIELD.to_string()];
    if include_loc {
        fields.push(SAMPLE_LOC_FIELD.to_string());
    }
    fields.extend(device_fields.iter().cloned());
    if selection.include_xyz {
        fields.extend(["XYZ_X", "XYZ_Y", "XYZ_Z"].map(String::from));
    }
    if selection.include_lab {
        fields.extend(["LAB_L", "LAB_A", "LAB_B"].map(String::from));
    }
    for nm in spectral_bands {
        fields.push(format!("SPEC_{:03}", nm));
    }
    fields
}
