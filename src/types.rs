use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::angle::eta_from_theta;

/// Which of the two sensor sub-grids a cell belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subgrid {
    /// Row/column addressed grid.
    GridA,
    /// x/y/z addressed grid; `z` selects the side and is never zero.
    GridB,
}

/// Identity of one sensing cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "grid", rename_all = "snake_case")]
pub enum CellId {
    GridA { row: i32, col: i32 },
    GridB { x: i32, y: i32, z: i32 },
}

impl CellId {
    pub fn subgrid(&self) -> Subgrid {
        match self {
            CellId::GridA { .. } => Subgrid::GridA,
            CellId::GridB { .. } => Subgrid::GridB,
        }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellId::GridA { row, col } => write!(f, "A({row},{col})"),
            CellId::GridB { x, y, z } => write!(f, "B({x},{y},{z:+})"),
        }
    }
}

/// Coarse aggregation unit (trigger tower). The side sign is part of the
/// identity so a group never changes side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId {
    pub subgrid: Subgrid,
    /// +1 or -1.
    pub side: i8,
    pub ieta: i32,
    pub iphi: i32,
}

impl GroupId {
    pub fn side_sign(&self) -> i32 {
        if self.side < 0 {
            -1
        } else {
            1
        }
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.subgrid {
            Subgrid::GridA => 'A',
            Subgrid::GridB => 'B',
        };
        write!(f, "TT{tag}[{:+}:{},{}]", self.side, self.ieta, self.iphi)
    }
}

/// Cell direction as seen from the interaction point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellPosition {
    pub eta: f64,
    pub phi: f64,
    pub theta: f64,
}

impl CellPosition {
    /// Derives (eta, phi, theta) from a cartesian cell centre.
    pub fn from_cartesian(p: &Vector3<f64>) -> Self {
        let r = p.norm().max(f64::MIN_POSITIVE);
        let theta = (p.z / r).clamp(-1.0, 1.0).acos();
        Self {
            eta: eta_from_theta(theta),
            phi: p.y.atan2(p.x),
            theta,
        }
    }

    pub fn direction(&self) -> Direction {
        Direction {
            eta: self.eta,
            phi: self.phi,
        }
    }
}

/// A masked cell retained by the status index.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CellRecord {
    pub id: CellId,
    pub eta: f64,
    pub phi: f64,
    pub theta: f64,
    pub status_code: i32,
    pub subgrid: Subgrid,
}

impl CellRecord {
    pub fn direction(&self) -> Direction {
        Direction {
            eta: self.eta,
            phi: self.phi,
        }
    }
}

/// Per-event energy measured (or recovered) for one cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnergyReading {
    pub cell: CellId,
    pub energy: f64,
    #[serde(default)]
    pub recovered: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    pub eta: f64,
    pub phi: f64,
}

impl Direction {
    pub fn new(eta: f64, phi: f64) -> Self {
        Self { eta, phi }
    }
}

/// Reconstructed physics object (jet) tested against the masked regions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub pt: f64,
    pub eta: f64,
    pub phi: f64,
}

impl Candidate {
    pub fn direction(&self) -> Direction {
        Direction::new(self.eta, self.phi)
    }
}

/// Outcome of a single pipeline: the signed/raw result and its verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub result: i32,
    pub pass: bool,
}

impl Decision {
    pub fn passing() -> Self {
        Self {
            result: 0,
            pass: true,
        }
    }
}
