//! Angle utilities shared by the proximity and pre-selection stages.
//!
//! Every notion of "closeness" in the crate goes through [`delta_r`], so the
//! masked-cell matcher and the missing-energy pre-selection agree on how
//! azimuth wraps around.

use std::f64::consts::{PI, TAU};

/// Wraps an azimuth into the range [-π, π].
#[inline]
pub fn wrap_phi(phi: f64) -> f64 {
    let wrapped = (phi + PI).rem_euclid(TAU) - PI;
    // rem_euclid maps +π onto -π; keep the sign of the input at the seam.
    if wrapped == -PI && phi > 0.0 {
        PI
    } else {
        wrapped
    }
}

/// Signed azimuth difference `a - b` wrapped into [-π, π].
#[inline]
pub fn delta_phi(a: f64, b: f64) -> f64 {
    wrap_phi(a - b)
}

/// Angular separation in the (eta, phi) plane.
#[inline]
pub fn delta_r(eta_a: f64, phi_a: f64, eta_b: f64, phi_b: f64) -> f64 {
    let deta = eta_a - eta_b;
    let dphi = delta_phi(phi_a, phi_b);
    (deta * deta + dphi * dphi).sqrt()
}

/// Pseudorapidity of a polar angle. Diverges at the beam axis.
#[inline]
pub fn eta_from_theta(theta: f64) -> f64 {
    -(0.5 * theta).tan().ln()
}
