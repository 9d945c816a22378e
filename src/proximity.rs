//! Angular matching of object directions against masked cells.

use crate::angle::delta_r;
use crate::status::{ChannelStatusIndex, StatusPredicate};
use crate::types::{CellId, Direction};
use serde::Serialize;

/// Closest masked cell to a direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NearestMasked {
    pub distance: f64,
    pub cell: CellId,
}

/// Brute-force matcher over the masked cells selected by `status`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProximityMatcher {
    pub status: StatusPredicate,
}

impl ProximityMatcher {
    pub fn new(status: StatusPredicate) -> Self {
        Self { status }
    }

    /// Minimum ΔR from `direction` to a selected masked cell. The first cell
    /// in index order wins ties. `None` when no cell is selected.
    pub fn nearest_masked_distance(
        &self,
        direction: Direction,
        index: &ChannelStatusIndex,
    ) -> Option<NearestMasked> {
        let mut best: Option<NearestMasked> = None;
        for record in index.records() {
            if !self.status.matches(record.status_code) {
                continue;
            }
            let distance = delta_r(record.eta, record.phi, direction.eta, direction.phi);
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(NearestMasked {
                    distance,
                    cell: record.id,
                });
            }
        }
        best
    }

    /// `true` if a selected masked cell lies within `cut_radius`. A radius
    /// `<= 0` disables the cut and always matches.
    pub fn is_within(&self, direction: Direction, cut_radius: f64, index: &ChannelStatusIndex) -> bool {
        if cut_radius <= 0.0 {
            return true;
        }
        within_radius(self.nearest_masked_distance(direction, index), cut_radius)
    }
}

/// The radius rule of [`ProximityMatcher::is_within`] applied to an already
/// computed nearest match.
#[inline]
pub fn within_radius(nearest: Option<NearestMasked>, cut_radius: f64) -> bool {
    cut_radius <= 0.0 || nearest.is_some_and(|n| n.distance <= cut_radius)
}
