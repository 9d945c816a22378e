mod common;

use common::init_logging;
use dead_cell_filter::diagnostics::RunSummary;
use dead_cell_filter::geometry::CellGeometryCatalog;
use dead_cell_filter::types::{Candidate, CellId, EnergyReading};
use dead_cell_filter::{
    ConsistencyWarning, Conditions, DeadCellFilter, EventId, EventInput, FilterError,
    FilterParams, InputAvailability, ObjectInput, PrimitiveTable, RunContext, SyntheticDetector,
    TowerMethod, TowerTopology,
};

const BARREL_CELL: CellId = CellId::GridA { row: 22, col: 103 };
const NEGATIVE_CELL: CellId = CellId::GridA { row: -40, col: 250 };
const ENDCAP_CELL: CellId = CellId::GridB { x: 30, y: 70, z: 1 };

fn detector() -> SyntheticDetector {
    SyntheticDetector::default()
        .with_status(BARREL_CELL, 13)
        .with_status(NEGATIVE_CELL, 13)
        .with_status(ENDCAP_CELL, 14)
}

fn context(primitives: bool, cell_readings: bool, release: Option<&str>) -> RunContext {
    RunContext {
        run: 42,
        availability: InputAvailability {
            primitives,
            cell_readings,
        },
        release: release.map(str::to_string),
    }
}

fn started(params: FilterParams, det: &SyntheticDetector, ctx: &RunContext) -> DeadCellFilter {
    init_logging();
    let mut filter = DeadCellFilter::new(params);
    filter
        .begin_run(&Conditions::from_provider(det), ctx)
        .expect("conditions available");
    filter
}

fn reading(cell: CellId, energy: f64) -> EnergyReading {
    EnergyReading {
        cell,
        energy,
        recovered: true,
    }
}

/// A candidate pointing at `cell` and aligned with the missing energy.
fn jet_on(det: &SyntheticDetector, cell: CellId, d_eta: f64) -> ObjectInput {
    let pos = det.position(&cell).expect("valid cell");
    ObjectInput {
        candidates: vec![Candidate {
            pt: 75.0,
            eta: pos.eta + d_eta,
            phi: pos.phi,
        }],
        missing_et_phi: pos.phi + 0.1,
    }
}

#[test]
fn begin_run_reports_index_contents() {
    let det = detector();
    let mut filter = DeadCellFilter::new(FilterParams::default());
    let stage = filter
        .begin_run(&Conditions::from_provider(&det), &context(true, true, None))
        .unwrap();
    assert_eq!(stage.run, 42);
    assert_eq!(stage.masked_cells, 3);
    assert_eq!(stage.grid_a_cells, 2);
    assert_eq!(stage.grid_b_cells, 1);
    assert_eq!(stage.groups, 3);
    assert_eq!(stage.tower_method, TowerMethod::Primitives);
}

#[test]
fn missing_conditions_refuse_every_event() {
    init_logging();
    let det = detector().without_status_table();
    let mut filter = DeadCellFilter::new(FilterParams::default());
    let err = filter
        .begin_run(&Conditions::from_provider(&det), &context(true, false, None))
        .unwrap_err();
    assert!(matches!(err, FilterError::ConditionsUnavailable(_)));
    assert_eq!(filter.evaluate(&EventInput::default()), Err(err));
}

#[test]
fn per_cell_path_flags_negative_side() {
    let det = detector();
    let filter = started(FilterParams::default(), &det, &context(false, true, Some("CMSSW_4_4_2")));
    assert_eq!(filter.tower_method(), Some(TowerMethod::CellReadings));

    let event = EventInput {
        readings: Some(vec![reading(NEGATIVE_CELL, 500.0), reading(BARREL_CELL, 10.0)]),
        ..EventInput::default()
    };
    let report = filter.evaluate_with_diagnostics(&event).unwrap();
    assert_eq!(report.decision.tower.result, -1);
    assert!(!report.decision.pass);
    // The other members of both towers are live cells.
    assert!(report
        .warnings()
        .any(|w| matches!(w, ConsistencyWarning::MembershipMismatch { .. })));
}

#[test]
fn old_release_disables_per_cell_path() {
    let det = detector();
    let filter = started(FilterParams::default(), &det, &context(false, true, Some("CMSSW_3_11_0")));
    assert_eq!(filter.tower_method(), Some(TowerMethod::Disabled));
    assert_eq!(filter.run_warnings().len(), 1);
    let event = EventInput {
        readings: Some(vec![reading(NEGATIVE_CELL, 500.0)]),
        ..EventInput::default()
    };
    let decision = filter.evaluate(&event).unwrap();
    assert_eq!(decision.tower.result, 0);
    assert!(decision.pass);
}

#[test]
fn primitive_path_picks_highest_energy_tower() {
    let det = detector();
    let filter = started(FilterParams::default(), &det, &context(true, true, None));
    let mut table = PrimitiveTable::new();
    table.insert(det.group_of(&BARREL_CELL), 120.0);
    table.insert(det.group_of(&NEGATIVE_CELL), 80.0);
    table.insert(det.group_of(&ENDCAP_CELL), 20.0);
    let event = EventInput {
        primitives: Some(table),
        ..EventInput::default()
    };
    let report = filter.evaluate_with_diagnostics(&event).unwrap();
    assert_eq!(report.decision.tower.result, 1);
    let warnings: Vec<_> = report.warnings().collect();
    assert!(matches!(
        warnings.as_slice(),
        [ConsistencyWarning::MultipleQualifyingGroups { qualifying, .. }] if qualifying.len() == 2
    ));
}

#[test]
fn restricting_to_grid_a_ignores_endcap_towers() {
    let det = detector();
    let mut params = FilterParams::default();
    params.tower.restrict_to_subgrid_a = true;
    let filter = started(params, &det, &context(true, false, None));
    let mut table = PrimitiveTable::new();
    table.insert(det.group_of(&ENDCAP_CELL), 300.0);
    let event = EventInput {
        primitives: Some(table),
        ..EventInput::default()
    };
    assert_eq!(filter.evaluate(&event).unwrap().tower.result, 0);
}

#[test]
fn object_near_masked_cell_is_flagged() {
    let det = detector();
    let filter = started(FilterParams::default(), &det, &context(true, false, None));

    let near = EventInput {
        objects: Some(jet_on(&det, BARREL_CELL, 0.05)),
        ..EventInput::default()
    };
    let decision = filter.evaluate(&near).unwrap();
    assert_eq!(decision.objects.result, 1);
    assert!(!decision.objects.pass);
    assert!(!decision.pass);

    let far = EventInput {
        objects: Some(jet_on(&det, BARREL_CELL, 0.8)),
        ..EventInput::default()
    };
    let decision = filter.evaluate(&far).unwrap();
    assert_eq!(decision.objects.result, 0);
    assert!(decision.pass);
}

#[test]
fn tagging_mode_records_but_passes() {
    let det = detector();
    let params = FilterParams {
        tagging_mode: true,
        ..FilterParams::default()
    };
    let filter = started(params, &det, &context(true, false, None));
    let event = EventInput {
        objects: Some(jet_on(&det, BARREL_CELL, 0.0)),
        ..EventInput::default()
    };
    let decision = filter.evaluate(&event).unwrap();
    assert!(!decision.raw_pass);
    assert!(decision.pass);

    let mut summary = RunSummary::new(42);
    summary.record(&decision);
    assert_eq!(summary.flagged, 1);
    assert_eq!(summary.object_flagged, 1);
}

#[test]
fn batch_matches_sequential_evaluation() {
    let det = detector();
    let filter = started(FilterParams::default(), &det, &context(false, true, None));
    let events: Vec<EventInput> = (0..64u64)
        .map(|i| EventInput {
            id: EventId {
                run: 42,
                lumi: 1,
                event: i,
            },
            readings: Some(vec![
                reading(BARREL_CELL, i as f64 * 2.0),
                reading(NEGATIVE_CELL, 128.0 - i as f64 * 2.0),
            ]),
            objects: (i % 3 == 0).then(|| jet_on(&det, ENDCAP_CELL, 0.02 * i as f64)),
            ..EventInput::default()
        })
        .collect();

    let batch = filter.evaluate_batch(&events).unwrap();
    let sequential: Vec<_> = events.iter().map(|e| filter.evaluate(e).unwrap()).collect();
    assert_eq!(batch, sequential);
    assert!(batch.iter().any(|d| d.tower.result == 1));
    assert!(batch.iter().any(|d| d.tower.result == -1));
}

#[test]
fn event_report_serializes() {
    let det = detector();
    let filter = started(FilterParams::default(), &det, &context(true, false, None));
    let event = EventInput {
        objects: Some(jet_on(&det, ENDCAP_CELL, 0.0)),
        ..EventInput::default()
    };
    let report = filter.evaluate_with_diagnostics(&event).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["decision"]["objects"]["result"], 1);
    assert_eq!(json["objects"]["matches"][0]["flagged"], true);
}
