//! Object pipeline: candidates aligned with the missing energy are matched
//! against masked cells and checked for boundary proximity.

use super::event::ObjectInput;
use super::params::ObjectOptions;
use crate::angle::delta_phi;
use crate::boundary::boundary_code;
use crate::diagnostics::{CandidateMatch, ObjectStage};
use crate::proximity::{within_radius, ProximityMatcher};
use crate::status::ChannelStatusIndex;
use crate::types::{Candidate, Decision};
use log::debug;
use std::time::Instant;

/// Candidates passing the kinematic selection, in input order.
pub fn select_candidates(candidates: &[Candidate], options: &ObjectOptions) -> Vec<Candidate> {
    candidates
        .iter()
        .filter(|c| c.pt > options.min_pt && c.eta.abs() < options.max_abs_eta)
        .copied()
        .collect()
}

/// Candidates within `max_dphi` in azimuth of the missing energy.
pub fn close_to_missing_energy(
    candidates: &[Candidate],
    missing_et_phi: f64,
    max_dphi: f64,
) -> Vec<Candidate> {
    candidates
        .iter()
        .filter(|c| delta_phi(c.phi, missing_et_phi).abs() <= max_dphi)
        .copied()
        .collect()
}

pub(crate) fn run_object_stage(
    input: &ObjectInput,
    options: &ObjectOptions,
    index: &ChannelStatusIndex,
) -> ObjectStage {
    let start = Instant::now();
    let selected = select_candidates(&input.candidates, options);
    let close = close_to_missing_energy(&selected, input.missing_et_phi, options.max_dphi_to_met);

    let matcher = ProximityMatcher::new(options.status);
    let matches: Vec<CandidateMatch> = close
        .iter()
        .map(|candidate| {
            let nearest = matcher.nearest_masked_distance(candidate.direction(), index);
            CandidateMatch {
                candidate: *candidate,
                nearest,
                flagged: within_radius(nearest, options.masked_cell_radius),
            }
        })
        .collect();
    let flagged = matches.iter().filter(|m| m.flagged).count();
    let code = boundary_code(
        close.iter().map(|c| c.eta),
        &options.inner_band,
        &options.outer_band,
    );

    debug!(
        "object stage: selected={} close_to_met={} flagged={} boundary_code={}",
        selected.len(),
        close.len(),
        flagged,
        code
    );

    let pass = flagged == 0 && (!options.boundary_vetoes || code == 0);
    ObjectStage {
        selected: selected.len(),
        close_to_met: close.len(),
        matches,
        flagged,
        boundary_code: code,
        decision: Decision {
            result: i32::try_from(flagged).unwrap_or(i32::MAX),
            pass,
        },
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    }
}
