//! Tower-level scoring of one event against the masked-cell index.
//!
//! Two interchangeable paths produce the same signed result:
//! - [`GroupAggregator`] sums per-cell energy readings of masked cells into
//!   their towers;
//! - [`PrimitiveScanner`] reads pre-aggregated tower energies.
//!
//! A tower qualifies when its transverse energy reaches the cut. The result is
//! the side sign of the tower picked by the [`TieBreak`] rule, or `0` when no
//! tower qualifies. All per-event state lives inside a single `score` call.

mod aggregator;
mod primitives;

pub use aggregator::GroupAggregator;
pub use primitives::{GroupEnergy, PrimitiveScanner, PrimitiveTable};

use crate::diagnostics::ConsistencyWarning;
use crate::types::GroupId;
use serde::{Deserialize, Serialize};

/// Rule for picking the tower that sets the sign when several qualify.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The tower with the largest energy; on equal energy the later one.
    #[default]
    HighestEnergy,
    /// The last qualifying tower in visiting order. Towers are visited in
    /// `GroupId` order by the aggregator and in index order by the scanner.
    LastVisited,
}

/// A tower above the energy cut.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct QualifiedGroup {
    pub group: GroupId,
    pub energy: f64,
    /// Cells that led to this tower being examined.
    pub cells: usize,
}

/// Result of scoring one event on either path.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TowerScore {
    /// `+1`/`-1` side sign of the chosen tower, `0` if none qualified.
    pub signed: i32,
    pub chosen: Option<QualifiedGroup>,
    /// Qualifying towers in visiting order.
    pub qualifying: Vec<QualifiedGroup>,
    /// Readings (aggregator) or masked cells (scanner) that were used.
    pub inputs_used: usize,
    pub warnings: Vec<ConsistencyWarning>,
}

impl TowerScore {
    pub(crate) fn resolve(
        qualifying: Vec<QualifiedGroup>,
        tie_break: TieBreak,
        inputs_used: usize,
        mut warnings: Vec<ConsistencyWarning>,
    ) -> Self {
        let chosen = match tie_break {
            TieBreak::LastVisited => qualifying.last().copied(),
            TieBreak::HighestEnergy => qualifying
                .iter()
                .copied()
                .max_by(|a, b| a.energy.total_cmp(&b.energy)),
        };
        if let (Some(pick), true) = (chosen, qualifying.len() > 1) {
            warnings.push(
                ConsistencyWarning::MultipleQualifyingGroups {
                    qualifying: qualifying.iter().map(|q| q.group).collect(),
                    chosen: pick.group,
                }
                .emit(),
            );
        }
        Self {
            signed: chosen.map_or(0, |q| q.group.side_sign()),
            chosen,
            qualifying,
            inputs_used,
            warnings,
        }
    }
}
