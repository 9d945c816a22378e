//! Per-event inputs and verdicts exchanged with the caller.

use crate::scoring::PrimitiveTable;
use crate::types::{Candidate, Decision, EnergyReading};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventId {
    pub run: u32,
    pub lumi: u32,
    pub event: u64,
}

/// Reconstructed objects and the missing-energy azimuth of one event.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectInput {
    pub candidates: Vec<Candidate>,
    pub missing_et_phi: f64,
}

/// Everything the filter may look at for one event. Absent collections are
/// `None`; which tower collection is read was decided at run start.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventInput {
    pub id: EventId,
    pub primitives: Option<PrimitiveTable>,
    pub readings: Option<Vec<EnergyReading>>,
    pub objects: Option<ObjectInput>,
}

/// Verdicts exported for one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EventDecision {
    /// Signed tower result and its verdict.
    pub tower: Decision,
    /// Flagged-object count and the object verdict.
    pub objects: Decision,
    /// Composite boundary-proximity code of the examined objects.
    pub boundary_code: i32,
    /// Verdict before tagging mode is applied.
    pub raw_pass: bool,
    /// Gating verdict: always `true` in tagging mode.
    pub pass: bool,
}

impl EventDecision {
    pub(crate) fn combine(tower: Decision, objects: Decision, boundary_code: i32, tagging: bool) -> Self {
        let raw_pass = tower.pass && objects.pass;
        Self {
            tower,
            objects,
            boundary_code,
            raw_pass,
            pass: tagging || raw_pass,
        }
    }
}
