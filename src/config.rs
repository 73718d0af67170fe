//! Conversion configuration.
//!
//! An explicit configuration struct is passed into the core entry points; the
//! core itself carries no ambient or global state. Loading settings from ini
//! files or the environment is the caller's concern.

use crate::constants::{
    DEFAULT_DESCRIPTOR, DEFAULT_DEVICE_CLASS, DEFAULT_ORIGINATOR, DEFAULT_PROMOTED_HEADER_KEYS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Policy controlling how colorimetric fields are selected for the TI3 output.
///
/// Two field-selection behaviors exist in the wild and disagree; the choice is
/// surfaced here instead of hard-coding one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorimetricPolicy {
    /// Write XYZ and/or Lab whenever any measurement row carries them,
    /// zero-filling rows with gaps. No conversion is ever performed.
    #[default]
    PassThrough,

    /// When spectral data is present, write spectral only and suppress
    /// XYZ/Lab. Otherwise pick a single PCS (XYZ over Lab unless
    /// `prefer_lab`), back-filling XYZ from Lab under a D50 white when a row
    /// has Lab but no XYZ.
    PreferSpectral,
}

/// Configuration for one conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// DEVICE_CLASS header value (e.g. "OUTPUT", "DISPLAY", "INPUT")
    pub device_class: String,

    /// Colorimetric field-selection policy
    pub policy: ColorimetricPolicy,

    /// Under `PreferSpectral` with no spectral data, choose XYZ over Lab
    pub prefer_xyz_over_lab: bool,

    /// Layout header keys promoted verbatim into the TI3 header
    pub promoted_header_keys: Vec<String>,

    /// DESCRIPTOR header value
    pub descriptor: String,

    /// ORIGINATOR header value
    pub originator: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            device_class: DEFAULT_DEVICE_CLASS.to_string(),
            policy: ColorimetricPolicy::default(),
            prefer_xyz_over_lab: true,
            promoted_header_keys: DEFAULT_PROMOTED_HEADER_KEYS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            descriptor: DEFAULT_DESCRIPTOR.to_string(),
            originator: DEFAULT_ORIGINATOR.to_string(),
        }
    }
}

impl ConversionConfig {
    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.device_class.trim().is_empty() {
            return Err(Error::configuration("Device class cannot be empty"));
        }

        if self.descriptor.trim().is_empty() {
            return Err(Error::configuration("Descriptor cannot be empty"));
        }

        Ok(())
    }

    /// Check whether a layout header key is on the promotion allow-list
    pub fn promotes_key(&self, key: &str) -> bool {
        self.promoted_header_keys.iter().any(|k| k == key)
    }
}
