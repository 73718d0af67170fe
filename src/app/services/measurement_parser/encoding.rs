//! Text decoding with encoding fallback
//!
//! CR30 exports arrive in a mix of encodings depending on the host system:
//! UTF-8 (with or without BOM), windows-1252, or plain latin-1. Decoding
//! tries each in order and must never fail on byte content.

use std::path::Path;
use tracing::debug;

use crate::{Error, Result};

/// Read a file as text, attempting UTF-8, then windows-1252, then latin-1
/// with lossless byte-to-char mapping as the last resort.
///
/// Only the read itself can fail; decoding always succeeds.
pub fn read_text_with_fallback(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| Error::io(format!("Failed to read file {}", path.display()), e))?;
    Ok(decode_with_fallback(&bytes))
}

/// Decode raw bytes through the fallback chain
pub fn decode_with_fallback(bytes: &[u8]) -> String {
    // UTF-8 first, stripping a BOM if one is present
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.trim_start_matches('\u{feff}').to_string();
    }

    // Strict windows-1252; fails on the five undefined code points
    if let Some(text) = encoding_rs::WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)
    {
        debug!("Decoded input as windows-1252");
        return text.into_owned();
    }

    // latin-1 maps every byte, so this step cannot fail
    debug!("Decoded input as latin-1 (last resort)");
    bytes.iter().map(|&b| b as char).collect()
}
