//! Per-group path: look up pre-aggregated tower energies for masked cells.

use super::{QualifiedGroup, TieBreak, TowerScore};
use crate::status::{ChannelStatusIndex, StatusPredicate};
use crate::types::{GroupId, Subgrid};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One tower energy as supplied by the trigger readout, in physical units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupEnergy {
    pub group: GroupId,
    pub energy: f64,
}

/// Tower energies of one event, at most one entry per tower.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<GroupEnergy>", into = "Vec<GroupEnergy>")]
pub struct PrimitiveTable {
    energies: HashMap<GroupId, f64>,
}

impl PrimitiveTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later inserts for the same tower replace earlier ones.
    pub fn insert(&mut self, group: GroupId, energy: f64) {
        self.energies.insert(group, energy);
    }

    pub fn get(&self, group: &GroupId) -> Option<f64> {
        self.energies.get(group).copied()
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }
}

impl FromIterator<GroupEnergy> for PrimitiveTable {
    fn from_iter<I: IntoIterator<Item = GroupEnergy>>(iter: I) -> Self {
        let mut table = Self::new();
        for entry in iter {
            table.insert(entry.group, entry.energy);
        }
        table
    }
}

impl From<Vec<GroupEnergy>> for PrimitiveTable {
    fn from(entries: Vec<GroupEnergy>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<PrimitiveTable> for Vec<GroupEnergy> {
    fn from(table: PrimitiveTable) -> Self {
        let mut entries: Vec<_> = table
            .energies
            .into_iter()
            .map(|(group, energy)| GroupEnergy { group, energy })
            .collect();
        entries.sort_by_key(|e| e.group);
        entries
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrimitiveScanner {
    pub status: StatusPredicate,
    pub cut_value: f64,
    /// Skip grid-B cells entirely.
    pub restrict_to_subgrid_a: bool,
    pub tie_break: TieBreak,
}

impl PrimitiveScanner {
    /// Scores one event by walking the masked cells in index order.
    ///
    /// Towers missing from `table` contribute nothing.
    pub fn score(&self, table: &PrimitiveTable, index: &ChannelStatusIndex) -> TowerScore {
        let mut qualifying: Vec<QualifiedGroup> = Vec::new();
        let mut used = 0usize;

        for (record, group) in index.iter() {
            if self.restrict_to_subgrid_a && record.subgrid != Subgrid::GridA {
                continue;
            }
            if !self.status.matches(record.status_code) {
                continue;
            }
            let Some(energy) = table.get(&group) else {
                continue;
            };
            used += 1;
            if energy < self.cut_value {
                continue;
            }
            // Move the tower to the back so visiting order reflects its last cell.
            let cells = match qualifying.iter().position(|q| q.group == group) {
                Some(pos) => qualifying.remove(pos).cells + 1,
                None => 1,
            };
            qualifying.push(QualifiedGroup {
                group,
                energy,
                cells,
            });
        }

        debug!(
            "PrimitiveScanner: {} masked cell(s) with tower data, {} tower(s) above {:.2}",
            used,
            qualifying.len(),
            self.cut_value
        );
        TowerScore::resolve(qualifying, self.tie_break, used, Vec::new())
    }
}
