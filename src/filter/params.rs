//! Parameter types configuring the filter stages.
//!
//! Defaults follow the settings the filter is usually run with: towers are
//! flagged above 63.75 in transverse energy using cells with status 13, and
//! objects within ΔR 0.3 of a cell with status ≥ 12 are flagged.

use super::release::ReleaseVersion;
use crate::boundary::EtaBand;
use crate::scoring::{GroupAggregator, PrimitiveScanner, TieBreak};
use crate::status::{IndexOptions, StatusPredicate};
use serde::{Deserialize, Serialize};

/// Filter-wide parameters.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    pub index: IndexOptions,
    pub tower: TowerOptions,
    pub objects: ObjectOptions,
    /// Record verdicts without ever failing the gate.
    pub tagging_mode: bool,
}

/// Tower pipeline settings shared by both scoring paths.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerOptions {
    /// Masked cells considered by either path.
    pub status: StatusPredicate,
    /// Expected status of the other members of a contributing tower.
    pub membership: StatusPredicate,
    /// Transverse energy at which a tower is flagged.
    pub cut_value: f64,
    /// Primitive path only: ignore grid-B towers.
    pub restrict_to_subgrid_a: bool,
    pub tie_break: TieBreak,
    /// Oldest release whose per-cell readings carry recovered energies.
    pub min_release: ReleaseVersion,
}

impl Default for TowerOptions {
    fn default() -> Self {
        Self {
            status: StatusPredicate::Exact(13),
            membership: StatusPredicate::Exact(13),
            cut_value: 63.75,
            restrict_to_subgrid_a: false,
            tie_break: TieBreak::HighestEnergy,
            min_release: ReleaseVersion { major: 4, minor: 2 },
        }
    }
}

impl TowerOptions {
    pub fn aggregator(&self) -> GroupAggregator {
        GroupAggregator {
            status: self.status,
            membership: self.membership,
            cut_value: self.cut_value,
            tie_break: self.tie_break,
        }
    }

    pub fn scanner(&self) -> PrimitiveScanner {
        PrimitiveScanner {
            status: self.status,
            cut_value: self.cut_value,
            restrict_to_subgrid_a: self.restrict_to_subgrid_a,
            tie_break: self.tie_break,
        }
    }
}

/// Object pipeline settings.
///
/// - `min_pt`, `max_abs_eta`: candidate selection (`pt >` and `|eta| <`).
/// - `max_dphi_to_met`: candidates farther than this in azimuth from the
///   missing energy are not examined.
/// - `masked_cell_radius`: ΔR matching radius; `<= 0` flags every examined
///   candidate.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectOptions {
    pub min_pt: f64,
    pub max_abs_eta: f64,
    pub max_dphi_to_met: f64,
    pub masked_cell_radius: f64,
    pub status: StatusPredicate,
    pub inner_band: EtaBand,
    pub outer_band: EtaBand,
    /// Whether a non-zero boundary code fails the object verdict.
    pub boundary_vetoes: bool,
}

impl Default for ObjectOptions {
    fn default() -> Self {
        Self {
            min_pt: 30.0,
            max_abs_eta: 9999.0,
            max_dphi_to_met: 0.5,
            masked_cell_radius: 0.3,
            status: StatusPredicate::AtLeast(12),
            inner_band: EtaBand::new(1.3, 1.7),
            outer_band: EtaBand::new(2.8, 3.2),
            boundary_vetoes: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "index": { "status_threshold": 10 },
            "tower": { "status": -12, "tie_break": "last_visited" },
            "objects": { "inner_band": [1.2, 1.6] },
            "tagging_mode": true
        }"#;
        let params: FilterParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.index.status_threshold, 10);
        assert_eq!(params.tower.status, StatusPredicate::AtLeast(12));
        assert_eq!(params.tower.membership, StatusPredicate::Exact(13));
        assert_eq!(params.tower.tie_break, TieBreak::LastVisited);
        assert_eq!(params.objects.inner_band, EtaBand::new(1.2, 1.6));
        assert!((params.objects.masked_cell_radius - 0.3).abs() < 1e-12);
        assert!(params.tagging_mode);
    }
}
