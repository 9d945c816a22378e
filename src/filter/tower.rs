//! Tower pipeline: choose a scoring path once per run, apply it per event.

use super::event::EventInput;
use super::params::TowerOptions;
use super::release::ReleaseVersion;
use crate::diagnostics::{ConsistencyWarning, TowerStage};
use crate::status::ChannelStatusIndex;
use crate::types::Decision;
use log::info;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Scoring path used for every event of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerMethod {
    Primitives,
    CellReadings,
    /// No usable input; every event passes.
    Disabled,
}

/// Which tower collections the run's data carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputAvailability {
    pub primitives: bool,
    pub cell_readings: bool,
}

/// Picks the path for a run. Tower primitives win when present; per-cell
/// readings need a release at or above `min_release`. An unknown release is
/// taken to satisfy the gate.
pub fn select_method(
    availability: &InputAvailability,
    release: Option<ReleaseVersion>,
    min_release: ReleaseVersion,
) -> (TowerMethod, Option<ConsistencyWarning>) {
    let detail = match (availability.primitives, availability.cell_readings, release) {
        (true, _, _) => None,
        (false, true, Some(r)) if r < min_release => Some(format!(
            "per-cell readings need release >= {min_release}, run has {r}"
        )),
        (false, true, _) => None,
        (false, false, _) => {
            Some("neither tower primitives nor per-cell readings in this run".to_string())
        }
    };
    if let Some(detail) = detail {
        return (
            TowerMethod::Disabled,
            Some(ConsistencyWarning::MissingInputData { detail }.emit()),
        );
    }
    let method = if availability.primitives {
        TowerMethod::Primitives
    } else {
        TowerMethod::CellReadings
    };
    info!(
        "tower method {:?} (primitives={}, cell_readings={})",
        method, availability.primitives, availability.cell_readings
    );
    (method, None)
}

/// Scores the tower pipeline for one event.
pub(crate) fn run_tower_stage(
    method: TowerMethod,
    options: &TowerOptions,
    event: &EventInput,
    index: &ChannelStatusIndex,
) -> TowerStage {
    let start = Instant::now();
    let score = match method {
        TowerMethod::Primitives => event
            .primitives
            .as_ref()
            .map(|table| options.scanner().score(table, index)),
        TowerMethod::CellReadings => event
            .readings
            .as_ref()
            .map(|readings| options.aggregator().score(readings, index)),
        TowerMethod::Disabled => None,
    };

    let mut warnings = Vec::new();
    if score.is_none() && method != TowerMethod::Disabled {
        warnings.push(
            ConsistencyWarning::MissingInputData {
                detail: format!("event {:?} lacks the {method:?} collection", event.id),
            }
            .emit(),
        );
    }

    let signed = score.as_ref().map_or(0, |s| s.signed);
    TowerStage {
        method,
        decision: Decision {
            result: signed,
            pass: signed == 0,
        },
        score,
        warnings,
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GATE: ReleaseVersion = ReleaseVersion { major: 4, minor: 2 };

    #[test]
    fn primitives_take_precedence() {
        let both = InputAvailability {
            primitives: true,
            cell_readings: true,
        };
        let (method, warning) = select_method(&both, Some(ReleaseVersion { major: 3, minor: 8 }), GATE);
        assert_eq!(method, TowerMethod::Primitives);
        assert!(warning.is_none());
    }

    #[test]
    fn cell_readings_need_release_gate() {
        let cells = InputAvailability {
            primitives: false,
            cell_readings: true,
        };
        let new = Some(ReleaseVersion { major: 4, minor: 4 });
        let old = Some(ReleaseVersion { major: 3, minor: 11 });
        assert_eq!(select_method(&cells, new, GATE).0, TowerMethod::CellReadings);
        assert_eq!(select_method(&cells, None, GATE).0, TowerMethod::CellReadings);
        let (method, warning) = select_method(&cells, old, GATE);
        assert_eq!(method, TowerMethod::Disabled);
        assert!(matches!(
            warning,
            Some(ConsistencyWarning::MissingInputData { .. })
        ));
    }

    #[test]
    fn nothing_available_disables_pipeline() {
        let (method, warning) = select_method(&InputAvailability::default(), None, GATE);
        assert_eq!(method, TowerMethod::Disabled);
        assert!(warning.is_some());
    }

    #[test]
    fn disabled_pipeline_passes() {
        let stage = run_tower_stage(
            TowerMethod::Disabled,
            &TowerOptions::default(),
            &EventInput::default(),
            &ChannelStatusIndex::default(),
        );
        assert!(stage.decision.pass);
        assert!(stage.score.is_none());
        assert!(stage.warnings.is_empty());
    }

    #[test]
    fn missing_event_collection_passes_with_warning() {
        let stage = run_tower_stage(
            TowerMethod::CellReadings,
            &TowerOptions::default(),
            &EventInput::default(),
            &ChannelStatusIndex::default(),
        );
        assert!(stage.decision.pass);
        assert_eq!(stage.warnings.len(), 1);
    }
}
