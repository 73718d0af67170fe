//! CGATS TI2/TI1 layout parser
//!
//! Reads the target layout file that is authoritative for device channels,
//! per-patch device values, and patch order. Produces a
//! [`crate::app::models::LayoutDocument`].
//!
//! - [`parser`] - Block location, field selection, and data row extraction
//! - [`header`] - Key-value extraction from the provenance header region

pub mod header;
pub mod parser;

#[cfg(test)]
pub mod tests;

pub use header::LayoutHeader;
pub use parser::LayoutParser;
