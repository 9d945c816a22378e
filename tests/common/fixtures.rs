use dead_cell_filter::geometry::{
    CellGeometryCatalog, ChannelStatusProvider, SubgridDescriptor, TowerTopology,
};
use dead_cell_filter::types::{CellId, CellPosition, GroupId, Subgrid};

/// A cell of [`TableDetector`]; every cell forms its own tower.
#[derive(Clone, Copy, Debug)]
pub struct TableCell {
    pub position: CellPosition,
    pub status: Option<i32>,
    pub side: i8,
}

impl TableCell {
    pub fn new(eta: f64, phi: f64, theta: f64, status: i32) -> Self {
        Self {
            position: CellPosition { eta, phi, theta },
            status: Some(status),
            side: 1,
        }
    }

    pub fn on_side(mut self, side: i8) -> Self {
        self.side = side;
        self
    }
}

/// Hand-written conditions: cell `i` of the table is grid-A `(1, i + 1)`.
#[derive(Clone, Debug, Default)]
pub struct TableDetector {
    pub cells: Vec<TableCell>,
}

impl TableDetector {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    pub fn id(i: usize) -> CellId {
        CellId::GridA {
            row: 1,
            col: i as i32 + 1,
        }
    }

    pub fn group(&self, i: usize) -> GroupId {
        self.group_of(&Self::id(i))
    }

    fn slot(&self, id: &CellId) -> Option<&TableCell> {
        match *id {
            CellId::GridA { row: 1, col } if col >= 1 => self.cells.get(col as usize - 1),
            _ => None,
        }
    }
}

impl CellGeometryCatalog for TableDetector {
    fn subgrids(&self) -> Vec<SubgridDescriptor> {
        vec![SubgridDescriptor::grid_a(1..=1, 1..=self.cells.len() as i32)]
    }

    fn is_valid(&self, id: &CellId) -> bool {
        self.slot(id).is_some()
    }

    fn position(&self, id: &CellId) -> Option<CellPosition> {
        self.slot(id).map(|c| c.position)
    }
}

impl ChannelStatusProvider for TableDetector {
    fn status_code(&self, id: &CellId) -> Option<i32> {
        self.slot(id).and_then(|c| c.status)
    }
}

impl TowerTopology for TableDetector {
    fn group_of(&self, id: &CellId) -> GroupId {
        let (side, iphi) = match *id {
            CellId::GridA { col, .. } => (self.slot(id).map_or(1, |c| c.side), col),
            CellId::GridB { x, .. } => (1, x),
        };
        GroupId {
            subgrid: Subgrid::GridA,
            side,
            ieta: 0,
            iphi,
        }
    }

    fn constituents_of(&self, group: &GroupId) -> Vec<CellId> {
        vec![CellId::GridA {
            row: 1,
            col: group.iphi,
        }]
    }
}
