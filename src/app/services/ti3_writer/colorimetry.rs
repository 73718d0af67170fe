//! Lab to XYZ bridge transform
//!
//! Used only when XYZ columns are being emitted and a row carries Lab but no
//! XYZ. The forward CIE L*a*b* definition is inverted under a chosen
//! reference white; no chromatic adaptation is attempted.

use crate::constants::{D50_WHITE, D65_WHITE};

/// Reference white for the Lab inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceWhite {
    #[default]
    D50,
    D65,
}

impl ReferenceWhite {
    fn xyz(&self) -> [f64; 3] {
        match self {
            Self::D50 => D50_WHITE,
            Self::D65 => D65_WHITE,
        }
    }
}

/// Convert a Lab triple to XYZ under the given reference white
pub fn lab_to_xyz(l: f64, a: f64, b: f64, white: ReferenceWhite) -> (f64, f64, f64) {
    let [xn, yn, zn] = white.xyz();

    let fy = (l + 16.0) / 116.0;
    let fx = fy + a / 500.0;
    let fz = fy - b / 200.0;

    (xn * f_inv(fx), yn * f_inv(fy), zn * f_inv(fz))
}

fn f_inv(t: f64) -> f64 {
    const DELTA: f64 = 6.0 / 29.0;
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}
