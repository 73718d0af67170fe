//! CGATS TI3 output
//!
//! Turns a parsed layout plus a parsed measurement set into an Argyll TI3
//! file under strict index-order pairing.
//!
//! - [`writer`] - File assembly and the [`WriteSummary`] result
//! - [`fields`] - Column selection, spectral band intersection, field list
//! - [`colorimetry`] - Lab to XYZ back-fill transform

pub mod colorimetry;
pub mod fields;
pub mod writer;

#[cfg(test)]
pub mod tests;

pub use fields::ColorimetricSelection;
pub use writer::{Ti3Writer, WriteSummary};
