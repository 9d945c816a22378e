//! Synthetic detector model.
//!
//! A cylindrical grid-A barrel closed by two grid-B endcap discs, grouped into
//! 5×5 trigger towers. Positions are computed from cartesian cell centres so
//! (eta, phi, theta) stay mutually consistent. Status codes default to `0`
//! (healthy) and can be overridden per cell.

use super::subgrid::{standard_grid_a_valid, standard_grid_b_valid};
use super::{CellGeometryCatalog, ChannelStatusProvider, TowerTopology};
use crate::types::{CellId, CellPosition, GroupId, Subgrid};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::TAU;

/// Dimensions of the synthetic detector.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticLayout {
    /// Grid-A cylinder radius (metres).
    pub barrel_radius_m: f64,
    /// Pseudorapidity covered by one grid-A row.
    pub row_eta_pitch: f64,
    /// Distance of the grid-B discs from the centre (metres).
    pub endcap_z_m: f64,
    /// Grid-B cell pitch (metres).
    pub endcap_pitch_m: f64,
    /// Cells per tower edge.
    pub tower_size: i32,
}

impl Default for SyntheticLayout {
    fn default() -> Self {
        Self {
            barrel_radius_m: 1.29,
            row_eta_pitch: 0.0174,
            endcap_z_m: 3.17,
            endcap_pitch_m: 0.0286,
            tower_size: 5,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SyntheticDetector {
    layout: SyntheticLayout,
    status: HashMap<CellId, i32>,
    default_status: Option<i32>,
    status_loaded: bool,
    geometry_loaded: bool,
}

impl SyntheticDetector {
    pub fn new(layout: SyntheticLayout) -> Self {
        Self {
            layout,
            status: HashMap::new(),
            default_status: Some(0),
            status_loaded: true,
            geometry_loaded: true,
        }
    }

    pub fn layout(&self) -> &SyntheticLayout {
        &self.layout
    }

    pub fn with_status(mut self, cell: CellId, code: i32) -> Self {
        self.set_status(cell, code);
        self
    }

    pub fn set_status(&mut self, cell: CellId, code: i32) {
        self.status.insert(cell, code);
    }

    /// Status returned for cells without an explicit entry. `None` makes them
    /// absent from the status table.
    pub fn with_default_status(mut self, code: Option<i32>) -> Self {
        self.default_status = code;
        self
    }

    /// Simulates a run whose status record failed to load.
    pub fn without_status_table(mut self) -> Self {
        self.status_loaded = false;
        self
    }

    /// Simulates a run whose geometry record failed to load.
    pub fn without_geometry(mut self) -> Self {
        self.geometry_loaded = false;
        self
    }

    /// Cartesian centre of a valid cell.
    pub fn cartesian(&self, id: &CellId) -> Option<Vector3<f64>> {
        if !self.is_valid(id) {
            return None;
        }
        let l = &self.layout;
        match *id {
            CellId::GridA { row, col } => {
                let eta = f64::from(row.signum()) * (f64::from(row.abs()) - 0.5) * l.row_eta_pitch;
                let phi = (f64::from(col) - 0.5) * TAU / 360.0;
                Some(Vector3::new(
                    l.barrel_radius_m * phi.cos(),
                    l.barrel_radius_m * phi.sin(),
                    l.barrel_radius_m * eta.sinh(),
                ))
            }
            CellId::GridB { x, y, z } => Some(Vector3::new(
                (f64::from(x) - 50.5) * l.endcap_pitch_m,
                (f64::from(y) - 50.5) * l.endcap_pitch_m,
                f64::from(z) * l.endcap_z_m,
            )),
        }
    }

    fn tower_index(&self, coord: i32) -> i32 {
        (coord - 1).div_euclid(self.layout.tower_size) + 1
    }

    fn tower_span(&self, index: i32) -> std::ops::RangeInclusive<i32> {
        let size = self.layout.tower_size;
        ((index - 1) * size + 1)..=(index * size)
    }
}

impl Default for SyntheticDetector {
    fn default() -> Self {
        Self::new(SyntheticLayout::default())
    }
}

impl CellGeometryCatalog for SyntheticDetector {
    fn is_loaded(&self) -> bool {
        self.geometry_loaded
    }

    fn is_valid(&self, id: &CellId) -> bool {
        match id.subgrid() {
            Subgrid::GridA => standard_grid_a_valid(id),
            Subgrid::GridB => standard_grid_b_valid(id),
        }
    }

    fn position(&self, id: &CellId) -> Option<CellPosition> {
        if !self.geometry_loaded {
            return None;
        }
        self.cartesian(id).map(|p| CellPosition::from_cartesian(&p))
    }
}

impl ChannelStatusProvider for SyntheticDetector {
    fn is_loaded(&self) -> bool {
        self.status_loaded
    }

    fn status_code(&self, id: &CellId) -> Option<i32> {
        self.status.get(id).copied().or(self.default_status)
    }
}

impl TowerTopology for SyntheticDetector {
    fn group_of(&self, id: &CellId) -> GroupId {
        match *id {
            CellId::GridA { row, col } => GroupId {
                subgrid: Subgrid::GridA,
                side: if row < 0 { -1 } else { 1 },
                ieta: self.tower_index(row.abs()),
                iphi: self.tower_index(col),
            },
            CellId::GridB { x, y, z } => GroupId {
                subgrid: Subgrid::GridB,
                side: if z < 0 { -1 } else { 1 },
                ieta: self.tower_index(x),
                iphi: self.tower_index(y),
            },
        }
    }

    fn constituents_of(&self, group: &GroupId) -> Vec<CellId> {
        let side = group.side_sign();
        let mut cells = Vec::new();
        for a in self.tower_span(group.ieta) {
            for b in self.tower_span(group.iphi) {
                let id = match group.subgrid {
                    Subgrid::GridA => CellId::GridA {
                        row: side * a,
                        col: b,
                    },
                    Subgrid::GridB => CellId::GridB { x: a, y: b, z: side },
                };
                if self.is_valid(&id) {
                    cells.push(id);
                }
            }
        }
        cells
    }
}
