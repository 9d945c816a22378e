use crate::filter::{EventDecision, EventId, TowerMethod};
use crate::proximity::NearestMasked;
use crate::scoring::TowerScore;
use crate::types::{Candidate, Decision};
use serde::Serialize;

use super::ConsistencyWarning;

/// Summary of the index built at run start.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStage {
    pub run: u32,
    pub threshold: i32,
    pub masked_cells: usize,
    pub grid_a_cells: usize,
    pub grid_b_cells: usize,
    pub groups: usize,
    pub tower_method: TowerMethod,
    pub elapsed_ms: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TowerStage {
    pub method: TowerMethod,
    pub decision: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<TowerScore>,
    pub warnings: Vec<ConsistencyWarning>,
    pub elapsed_ms: f64,
}

/// One examined candidate and its nearest masked cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateMatch {
    pub candidate: Candidate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest: Option<NearestMasked>,
    pub flagged: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectStage {
    /// Candidates passing the kinematic selection.
    pub selected: usize,
    /// Selected candidates close to the missing energy in azimuth.
    pub close_to_met: usize,
    pub matches: Vec<CandidateMatch>,
    pub flagged: usize,
    pub boundary_code: i32,
    pub decision: Decision,
    pub elapsed_ms: f64,
}

/// Result produced by
/// [`DeadCellFilter::evaluate_with_diagnostics`](crate::DeadCellFilter).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReport {
    pub id: EventId,
    pub decision: EventDecision,
    pub tower: TowerStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects: Option<ObjectStage>,
    pub total_ms: f64,
}

impl EventReport {
    /// Warnings raised by any stage of the event.
    pub fn warnings(&self) -> impl Iterator<Item = &ConsistencyWarning> + '_ {
        let scored = self.tower.score.iter().flat_map(|s| s.warnings.iter());
        scored.chain(self.tower.warnings.iter())
    }
}
