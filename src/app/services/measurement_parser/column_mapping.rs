//! Column discovery for CR30 CSV headers
//!
//! CR30 exports vary in column naming across firmware and software versions
//! ("L", "L*", "Lstar"; "R400nm", "400"). Header cells are normalized
//! (lower-cased, non-alphanumeric stripped) before lookup, and spectral
//! bands are discovered by a trailing 3-digit wavelength pattern.

use csv::StringRecord;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::constants::is_plausible_wavelength;

/// Resolved column indices for one CR30 export
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    pub name: Option<usize>,
    pub date: Option<usize>,
    pub test_mode: Option<usize>,
    pub light_source_angle: Option<usize>,

    pub l: Option<usize>,
    pub a: Option<usize>,
    pub b: Option<usize>,

    pub x: Option<usize>,
    pub y: Option<usize>,
    pub z: Option<usize>,

    /// (column index, wavelength nm), sorted ascending by wavelength
    pub spectral: Vec<(usize, u32)>,
}

impl ColumnMap {
    /// Analyze a header record and resolve logical columns
    pub fn analyze(headers: &StringRecord) -> Self {
        let mut index: HashMap<String, usize> = HashMap::new();
        for (i, cell) in headers.iter().enumerate() {
            index.insert(normalize(cell), i);
        }

        let lookup = |names: &[&str]| names.iter().find_map(|n| index.get(*n).copied());

        let mut spectral: Vec<(usize, u32)> = Vec::new();
        for (key, &i) in &index {
            if let Some(nm) = trailing_wavelength(key) {
                if is_plausible_wavelength(nm) {
                    spectral.push((i, nm));
                }
            }
        }
        spectral.sort_by_key(|&(_, nm)| nm);

        ColumnMap {
            name: lookup(&["name"]),
            date: lookup(&["date"]),
            test_mode: lookup(&["testmode"]),
            light_source_angle: lookup(&["lightsourceangle"]),
            l: lookup(&["l", "lstar"]),
            a: lookup(&["a", "astar"]),
            b: lookup(&["b", "bstar"]),
            x: lookup(&["x"]),
            y: lookup(&["y"]),
            z: lookup(&["z"]),
            spectral,
        }
    }

    /// Number of discovered spectral band columns
    pub fn spectral_band_count(&self) -> usize {
        self.spectral.len()
    }
}

/// Normalize a header cell: lower-case, keep only alphanumerics and '_'
pub fn normalize(cell: &str) -> String {
    cell.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Extract a trailing 3-digit wavelength from a normalized header cell,
/// tolerating an "nm" suffix (e.g. "r400nm", "spec_400", "400")
fn trailing_wavelength(key: &str) -> Option<u32> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(\d{3})(?:nm)?$").expect("static wavelength regex"));
    re.captures(key)?.get(1)?.as_str().parse::<u32>().ok()
}
