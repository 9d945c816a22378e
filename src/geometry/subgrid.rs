use crate::types::{CellId, Subgrid};
use std::ops::RangeInclusive;

const GRID_A_ROWS: i32 = 85;
const GRID_A_COLS: i32 = 360;
const GRID_B_SIZE: i32 = 100;
const GRID_B_CENTRE: f64 = 50.5;
const GRID_B_INNER_RADIUS: f64 = 12.0;
const GRID_B_OUTER_RADIUS: f64 = 50.0;

/// Enumeration bounds of one sub-grid.
///
/// Both sub-grids are walked the same way: three nested inclusive ranges, the
/// first axis outermost. Grid-A ignores the third axis (a single `0` step);
/// grid-B skips `z == 0`. Walking order is the storage order of the index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubgridDescriptor {
    pub subgrid: Subgrid,
    pub axes: [RangeInclusive<i32>; 3],
}

impl SubgridDescriptor {
    pub fn grid_a(rows: RangeInclusive<i32>, cols: RangeInclusive<i32>) -> Self {
        Self {
            subgrid: Subgrid::GridA,
            axes: [rows, cols, 0..=0],
        }
    }

    pub fn grid_b(
        xs: RangeInclusive<i32>,
        ys: RangeInclusive<i32>,
        zs: RangeInclusive<i32>,
    ) -> Self {
        Self {
            subgrid: Subgrid::GridB,
            axes: [xs, ys, zs],
        }
    }

    /// Bounds of the full detector: grid-A then grid-B.
    pub fn standard() -> [Self; 2] {
        [
            Self::grid_a(-GRID_A_ROWS..=GRID_A_ROWS, 0..=GRID_A_COLS),
            Self::grid_b(0..=GRID_B_SIZE, 0..=GRID_B_SIZE, -1..=1),
        ]
    }

    /// Coordinate encoding; `None` for coordinates that never name a cell.
    pub fn encode(&self, coords: [i32; 3]) -> Option<CellId> {
        let [a, b, c] = coords;
        match self.subgrid {
            Subgrid::GridA => Some(CellId::GridA { row: a, col: b }),
            Subgrid::GridB if c == 0 => None,
            Subgrid::GridB => Some(CellId::GridB { x: a, y: b, z: c }),
        }
    }

    /// Every encodable id inside the bounds, validity not yet applied.
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        let [a_axis, b_axis, c_axis] = &self.axes;
        a_axis.clone().flat_map(move |a| {
            b_axis.clone().flat_map(move |b| {
                c_axis
                    .clone()
                    .filter_map(move |c| self.encode([a, b, c]))
            })
        })
    }
}

/// Validity of a grid-A cell in the standard layout.
pub fn standard_grid_a_valid(id: &CellId) -> bool {
    match *id {
        CellId::GridA { row, col } => {
            row != 0 && row.abs() <= GRID_A_ROWS && (1..=GRID_A_COLS).contains(&col)
        }
        CellId::GridB { .. } => false,
    }
}

/// Validity of a grid-B cell in the standard layout: an annulus on each side.
pub fn standard_grid_b_valid(id: &CellId) -> bool {
    match *id {
        CellId::GridB { x, y, z } => {
            if z.abs() != 1 || !(1..=GRID_B_SIZE).contains(&x) || !(1..=GRID_B_SIZE).contains(&y)
            {
                return false;
            }
            let dx = f64::from(x) - GRID_B_CENTRE;
            let dy = f64::from(y) - GRID_B_CENTRE;
            let r2 = dx * dx + dy * dy;
            r2 >= GRID_B_INNER_RADIUS * GRID_B_INNER_RADIUS
                && r2 <= GRID_B_OUTER_RADIUS * GRID_B_OUTER_RADIUS
        }
        CellId::GridA { .. } => false,
    }
}
