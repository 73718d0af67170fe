//! TI3 file assembly
//!
//! Pairs the layout's device samples with measurement rows by strict index
//! order, plans the output columns, and writes the CGATS TI3 file. The field
//! list and every data row are derived from the same column selection so
//! they cannot disagree.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;
use tracing::{debug, info, warn};

use crate::app::models::{LayoutDocument, MeasurementRecord, MeasurementSet};
use crate::app::services::layout_parser::header::split_key_raw;
use crate::app::services::layout_parser::LayoutHeader;
use crate::app::services::location_deriver::LocationDeriver;
use crate::app::services::ti3_writer::colorimetry::{lab_to_xyz, ReferenceWhite};
use crate::app::services::ti3_writer::fields::{
    build_field_list, spectral_intersection, ColorimetricSelection,
};
use crate::config::ConversionConfig;
use crate::constants::{
    BEGIN_DATA, BEGIN_DATA_FORMAT, CREATED_TIMESTAMP_FORMAT, DEVICE_VALUE_DECIMALS, END_DATA,
    END_DATA_FORMAT, LAB_DECIMALS, SPECTRAL_DECIMALS, TI3_SIGNATURE, XYZ_DECIMALS,
};
use crate::{Error, Result};

/// Outcome of one TI3 write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    /// Number of data rows written (min of layout samples and CSV rows)
    pub sets_written: usize,

    /// Whether spectral columns were written; a downstream driver uses this
    /// to decide whether spectrally-dependent processing is available
    pub spectral_written: bool,

    /// Number of declared output fields
    pub fields: usize,

    /// COLOR_REP value written to the header
    pub color_rep: String,
}

/// Writer producing an Argyll CGATS TI3 from paired layout and measurements
#[derive(Debug)]
pub struct Ti3Writer {
    config: ConversionConfig,
}

impl Ti3Writer {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Write the TI3 file, pairing layout sample `i` with CSV row `i`
    pub fn write(
        &self,
        dest: &Path,
        layout: &LayoutDocument,
        measurements: &MeasurementSet,
    ) -> Result<WriteSummary> {
        self.config.validate()?;

        let n = layout.samples.len().min(measurements.len());

        let selection = ColorimetricSelection::from_policy(&self.config, measurements);
        let has_spectral = measurements.has_spectral();
        let spectral_bands = spectral_intersection(measurements);
        let locations = self.resolve_locations(layout, n);
        let color_rep = selection.color_rep(layout.device_family());

        let field_list = build_field_list(
            locations.is_some(),
            &layout.device_fields,
            selection,
            &spectral_bands,
        );

        debug!(
            "Output plan: {} fields, {} sets, xyz={}, lab={}, {} spectral bands",
            field_list.len(),
            n,
            selection.include_xyz,
            selection.include_lab,
            spectral_bands.len()
        );

        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::io(
                        format!("Failed to create output directory {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let file = File::create(dest).map_err(|e| {
            Error::io(format!("Failed to create output file {}", dest.display()), e)
        })?;
        let mut out = BufWriter::new(file);

        self.write_header(
            &mut out,
            measurements,
            layout,
            &color_rep,
            has_spectral,
            &spectral_bands,
        )?;

        writeln!(out)?;
        writeln!(out, "NUMBER_OF_FIELDS {}", field_list.len())?;
        writeln!(out, "{}", BEGIN_DATA_FORMAT)?;
        writeln!(out, "{} ", field_list.join(" "))?;
        writeln!(out, "{}", END_DATA_FORMAT)?;
        writeln!(out)?;

        writeln!(out, "NUMBER_OF_SETS {}", n)?;
        writeln!(out, "{}", BEGIN_DATA)?;
        for i in 0..n {
            let sample = &layout.samples[i];
            let record = &measurements.records[i];

            let mut parts: Vec<String> = vec![sample.id.to_string()];
            if let Some(labels) = &locations {
                parts.push(format!("\"{}\"", labels[i]));
            }
            for value in &sample.values {
                parts.push(format!("{:.prec$}", value, prec = DEVICE_VALUE_DECIMALS));
            }
            if selection.include_xyz {
                push_xyz(&mut parts, record, selection.backfill_xyz_from_lab);
            }
            if selection.include_lab {
                push_lab(&mut parts, record);
            }
            for nm in &spectral_bands {
                let value = record.spectral.get(nm).copied().unwrap_or(0.0);
                parts.push(format!("{:.prec$}", value, prec = SPECTRAL_DECIMALS));
            }

            writeln!(out, "{} ", parts.join(" "))?;
        }
        writeln!(out, "{}", END_DATA)?;
        out.flush()?;

        let spectral_written = !spectral_bands.is_empty();
        info!(
            "Wrote {} sets to {} (color_rep={}, spectral={})",
            n,
            dest.display(),
            color_rep,
            spectral_written
        );

        Ok(WriteSummary {
            sets_written: n,
            spectral_written,
            fields: field_list.len(),
            color_rep,
        })
    }

    /// Per-row location labels. An explicit SAMPLE_LOC table always wins:
    /// derivation from the layout's grid metadata runs only when the layout
    /// declared no locations at all. `None` omits the column.
    fn resolve_locations(&self, layout: &LayoutDocument, n: usize) -> Option<Vec<String>> {
        let explicit = &layout.locations;
        if !explicit.is_empty() {
            if explicit.len() >= n {
                return Some(explicit.iter().take(n).map(|l| l.label.clone()).collect());
            }
            warn!(
                "Explicit patch locations cover {} of {} written rows; omitting SAMPLE_LOC",
                explicit.len(),
                n
            );
            return None;
        }

        let header = LayoutHeader::parse(&layout.header_lines);
        let derived = LocationDeriver::new().derive(&header, &layout.samples);
        if !derived.is_empty() && derived.len() >= n {
            debug!("Derived {} patch locations from layout grid", derived.len());
            return Some(derived.iter().take(n).map(|l| l.label.clone()).collect());
        }
        None
    }

    fn write_header(
        &self,
        out: &mut impl Write,
        measurements: &MeasurementSet,
        layout: &LayoutDocument,
        color_rep: &str,
        has_spectral: bool,
        spectral_bands: &[u32],
    ) -> Result<()> {
        writeln!(out, "{}", TI3_SIGNATURE)?;
        writeln!(out)?;
        writeln!(out, "DESCRIPTOR \"{}\"", self.config.descriptor)?;
        writeln!(out, "ORIGINATOR \"{}\"", self.config.originator)?;
        writeln!(
            out,
            "CREATED \"{}\"",
            Local::now().format(CREATED_TIMESTAMP_FORMAT)
        )?;
        writeln!(out, "DEVICE_CLASS \"{}\"", self.config.device_class)?;
        writeln!(out, "COLOR_REP \"{}\"", color_rep)?;

        if has_spectral {
            writeln!(out, "INSTRUMENT_TYPE_SPECTRAL \"YES\"")?;
            if let (Some(first), Some(last)) = (spectral_bands.first(), spectral_bands.last()) {
                writeln!(out, "SPECTRAL_BANDS \"{}\"", spectral_bands.len())?;
                writeln!(
                    out,
                    "SPECTRAL_START_NM \"{:.prec$}\"",
                    *first as f64,
                    prec = SPECTRAL_DECIMALS
                )?;
                writeln!(
                    out,
                    "SPECTRAL_END_NM \"{:.prec$}\"",
                    *last as f64,
                    prec = SPECTRAL_DECIMALS
                )?;
            }
        } else {
            writeln!(out, "INSTRUMENT_TYPE_SPECTRAL \"NO\"")?;
        }

        for line in &layout.header_lines {
            if let Some((key, rest)) = split_key_raw(line) {
                if self.config.promotes_key(&key) {
                    writeln!(out, "{} {}", key, rest)?;
                }
            }
        }

        if let Some(code) = &measurements.illuminant {
            writeln!(out, "# ILLUMINANT_CODE \"{}\"", code)?;
        }
        if let Some(deg) = measurements.observer_deg {
            writeln!(out, "# OBSERVER \"{} deg\"", deg)?;
        }
        writeln!(out, "# INSTRUMENT \"CHNSPEC CR30\"")?;
        writeln!(out, "# GEOMETRY \"45/0\"")?;

        Ok(())
    }
}

/// XYZ columns: measured triple, optional Lab back-fill, else zeros
fn push_xyz(parts: &mut Vec<String>, record: &MeasurementRecord, backfill: bool) {
    let triple = record.xyz().or_else(|| {
        if backfill {
            record
                .lab()
                .map(|(l, a, b)| lab_to_xyz(l, a, b, ReferenceWhite::D50))
        } else {
            None
        }
    });

    let (x, y, z) = triple.unwrap_or((0.0, 0.0, 0.0));
    for value in [x, y, z] {
        parts.push(format!("{:.prec$}", value, prec = XYZ_DECIMALS));
    }
}

/// Lab columns: measured triple or zeros
fn push_lab(parts: &mut Vec<String>, record: &MeasurementRecord) {
    let (l, a, b) = record.lab().unwrap_or((0.0, 0.0, 0.0));
    for value in [l, a, b] {
        parts.push(format!("{:.prec$}", value, prec = LAB_DECIMALS));
    }
}
