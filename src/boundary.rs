//! Proximity of objects to the detector's pseudorapidity transition regions.
//!
//! Each object whose |eta| falls strictly inside the inner band adds a `1`
//! digit to the code, one inside the outer band adds a `2`. Digits are added
//! at the current position `p` as `10·p + digit`; once the accumulated code
//! divided by `10^p` reaches 3 the position advances to `code / 10 + 1`.

use serde::{Deserialize, Serialize};

/// Open interval of |eta|.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct EtaBand {
    pub low: f64,
    pub high: f64,
}

impl EtaBand {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    #[inline]
    pub fn contains(&self, eta: f64) -> bool {
        let abs = eta.abs();
        abs > self.low && abs < self.high
    }
}

impl From<[f64; 2]> for EtaBand {
    fn from([low, high]: [f64; 2]) -> Self {
        Self { low, high }
    }
}

impl From<EtaBand> for [f64; 2] {
    fn from(band: EtaBand) -> Self {
        [band.low, band.high]
    }
}

const INNER_DIGIT: i32 = 1;
const OUTER_DIGIT: i32 = 2;
const ADVANCE_AT: f64 = 3.0;

/// Composite boundary code for a sequence of object pseudorapidities.
pub fn boundary_code<I>(etas: I, inner: &EtaBand, outer: &EtaBand) -> i32
where
    I: IntoIterator<Item = f64>,
{
    let mut code = 0i32;
    let mut position = 0i32;
    for eta in etas {
        if inner.contains(eta) {
            code += position * 10 + INNER_DIGIT;
        }
        if outer.contains(eta) {
            code += position * 10 + OUTER_DIGIT;
        }
        if f64::from(code) / 10f64.powi(position) >= ADVANCE_AT {
            position = code / 10 + 1;
        }
    }
    code
}
