//! Run-scoped index of masked cells.
//!
//! Built once per run from the geometry, status and topology providers. Holds
//! every cell whose status meets the masking threshold, its direction and
//! polar angle, and the trigger tower it belongs to. The index is immutable
//! after [`ChannelStatusIndex::build`]; a new run builds a new index.

use crate::error::FilterError;
use crate::geometry::Conditions;
use crate::types::{CellId, CellRecord, GroupId, Subgrid};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

/// Status assigned to cells with no entry in the status table.
pub const ABSENT_STATUS: i32 = -1;

/// Options for building the masked-cell index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexOptions {
    /// Cells with `status >= status_threshold` are masked.
    pub status_threshold: i32,
    /// Optional bitmask applied to raw status codes before thresholding.
    pub status_mask: Option<i32>,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            status_threshold: 1,
            status_mask: None,
        }
    }
}

/// Masked cells of the current run.
///
/// Invariant: a cell has a record iff it has a group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChannelStatusIndex {
    threshold: i32,
    records: Vec<CellRecord>,
    slots: HashMap<CellId, usize>,
    groups: HashMap<CellId, GroupId>,
    members: HashMap<GroupId, Vec<CellId>>,
}

impl ChannelStatusIndex {
    /// Walks every valid cell of every sub-grid and keeps the masked ones.
    ///
    /// Fails with [`FilterError::ConditionsUnavailable`] if a provider is not
    /// loaded or a valid cell has no position.
    pub fn build(conditions: &Conditions<'_>, options: &IndexOptions) -> Result<Self, FilterError> {
        let Conditions {
            geometry,
            status,
            topology,
        } = *conditions;
        if !geometry.is_loaded() {
            return Err(FilterError::ConditionsUnavailable(
                "geometry record not loaded".to_string(),
            ));
        }
        if !status.is_loaded() {
            return Err(FilterError::ConditionsUnavailable(
                "channel status record not loaded".to_string(),
            ));
        }

        let start = Instant::now();
        let mut records = Vec::new();
        let mut slots = HashMap::new();
        let mut visited = 0usize;

        for descriptor in geometry.subgrids() {
            for id in descriptor.cells() {
                if !geometry.is_valid(&id) || slots.contains_key(&id) {
                    continue;
                }
                visited += 1;
                let code = status
                    .status_code(&id)
                    .map(|raw| options.status_mask.map_or(raw, |mask| raw & mask))
                    .unwrap_or(ABSENT_STATUS);
                let position = geometry.position(&id).ok_or_else(|| {
                    FilterError::ConditionsUnavailable(format!("no geometry for cell {id}"))
                })?;
                if code < options.status_threshold {
                    continue;
                }
                slots.insert(id, records.len());
                records.push(CellRecord {
                    id,
                    eta: position.eta,
                    phi: position.phi,
                    theta: position.theta,
                    status_code: code,
                    subgrid: descriptor.subgrid,
                });
            }
        }

        let mut groups = HashMap::with_capacity(records.len());
        let mut members: HashMap<GroupId, Vec<CellId>> = HashMap::new();
        for record in &records {
            let group = topology.group_of(&record.id);
            groups.insert(record.id, group);
            members
                .entry(group)
                .or_insert_with(|| topology.constituents_of(&group));
        }

        debug!(
            "ChannelStatusIndex::build threshold={} visited={} masked={} groups={} in {:.3} ms",
            options.status_threshold,
            visited,
            records.len(),
            members.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(Self {
            threshold: options.status_threshold,
            records,
            slots,
            groups,
            members,
        })
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Masked cells in enumeration order.
    pub fn records(&self) -> &[CellRecord] {
        &self.records
    }

    /// Masked cells with their groups, in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (&CellRecord, GroupId)> + '_ {
        self.records
            .iter()
            .filter_map(move |r| self.groups.get(&r.id).map(|g| (r, *g)))
    }

    pub fn get(&self, id: &CellId) -> Option<&CellRecord> {
        self.slots.get(id).map(|&slot| &self.records[slot])
    }

    pub fn contains(&self, id: &CellId) -> bool {
        self.slots.contains_key(id)
    }

    pub fn group_of(&self, id: &CellId) -> Option<GroupId> {
        self.groups.get(id).copied()
    }

    /// Full topological membership of a group holding at least one masked cell.
    pub fn members_of(&self, group: &GroupId) -> &[CellId] {
        self.members.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn group_count(&self) -> usize {
        self.members.len()
    }

    pub fn count_in(&self, subgrid: Subgrid) -> usize {
        self.records.iter().filter(|r| r.subgrid == subgrid).count()
    }
}
