//! Run-scoped filter orchestrating the tower and object pipelines.
//!
//! Typical usage:
//! ```no_run
//! use dead_cell_filter::{
//!     Conditions, DeadCellFilter, EventInput, FilterParams, InputAvailability, RunContext,
//!     SyntheticDetector,
//! };
//!
//! # fn example(events: Vec<EventInput>) -> Result<(), dead_cell_filter::FilterError> {
//! let detector = SyntheticDetector::default();
//! let mut filter = DeadCellFilter::new(FilterParams::default());
//! filter.begin_run(
//!     &Conditions::from_provider(&detector),
//!     &RunContext {
//!         run: 1,
//!         availability: InputAvailability { primitives: true, cell_readings: false },
//!         release: None,
//!     },
//! )?;
//! for decision in filter.evaluate_batch(&events)? {
//!     println!("tower {} pass {}", decision.tower.result, decision.pass);
//! }
//! # Ok(())
//! # }
//! ```

use super::event::{EventDecision, EventInput};
use super::objects::run_object_stage;
use super::params::FilterParams;
use super::release::ReleaseVersion;
use super::tower::{run_tower_stage, select_method, InputAvailability, TowerMethod};
use crate::diagnostics::{ConsistencyWarning, EventReport, IndexStage};
use crate::error::FilterError;
use crate::geometry::Conditions;
use crate::status::ChannelStatusIndex;
use crate::types::{Decision, Subgrid};
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// What the framework knows about a run when it starts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunContext {
    pub run: u32,
    pub availability: InputAvailability,
    /// Release tag of the processed data; `None` if unknown.
    pub release: Option<String>,
}

/// State built once per run and read by every event.
struct RunState {
    index: ChannelStatusIndex,
    method: TowerMethod,
    stage: IndexStage,
    warnings: Vec<ConsistencyWarning>,
}

/// Masked-cell event filter.
///
/// [`begin_run`](Self::begin_run) builds the index and picks the tower path;
/// the `evaluate*` methods then only read that state and may be called
/// concurrently.
pub struct DeadCellFilter {
    params: FilterParams,
    /// Current run, or the reason events are refused.
    run: Result<RunState, FilterError>,
}

impl DeadCellFilter {
    pub fn new(params: FilterParams) -> Self {
        Self {
            params,
            run: Err(FilterError::RunNotStarted),
        }
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    /// Rebuild run-scoped state from the run's conditions. On error the
    /// previous run's state is dropped and every event of the run is refused
    /// with the same error.
    pub fn begin_run(
        &mut self,
        conditions: &Conditions<'_>,
        context: &RunContext,
    ) -> Result<&IndexStage, FilterError> {
        self.run = Self::start_run(&self.params, conditions, context);
        match &self.run {
            Ok(state) => Ok(&state.stage),
            Err(err) => Err(err.clone()),
        }
    }

    fn start_run(
        params: &FilterParams,
        conditions: &Conditions<'_>,
        context: &RunContext,
    ) -> Result<RunState, FilterError> {
        let start = Instant::now();
        let release = context
            .release
            .as_deref()
            .map(ReleaseVersion::parse)
            .transpose()?;
        let index = ChannelStatusIndex::build(conditions, &params.index)?;
        let (method, warning) =
            select_method(&context.availability, release, params.tower.min_release);
        let stage = IndexStage {
            run: context.run,
            threshold: index.threshold(),
            masked_cells: index.len(),
            grid_a_cells: index.count_in(Subgrid::GridA),
            grid_b_cells: index.count_in(Subgrid::GridB),
            groups: index.group_count(),
            tower_method: method,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        };
        info!(
            "run {}: {} masked cells in {} towers, tower method {:?}",
            stage.run, stage.masked_cells, stage.groups, method
        );
        Ok(RunState {
            index,
            method,
            stage,
            warnings: warning.into_iter().collect(),
        })
    }

    fn state(&self) -> Result<&RunState, FilterError> {
        self.run.as_ref().map_err(Clone::clone)
    }

    /// Index of the current run.
    pub fn index(&self) -> Option<&ChannelStatusIndex> {
        self.run.as_ref().ok().map(|s| &s.index)
    }

    pub fn tower_method(&self) -> Option<TowerMethod> {
        self.run.as_ref().ok().map(|s| s.method)
    }

    pub fn index_stage(&self) -> Option<&IndexStage> {
        self.run.as_ref().ok().map(|s| &s.stage)
    }

    /// Warnings raised while starting the current run.
    pub fn run_warnings(&self) -> &[ConsistencyWarning] {
        self.run
            .as_ref()
            .map(|s| s.warnings.as_slice())
            .unwrap_or_default()
    }

    /// Verdicts for one event.
    pub fn evaluate(&self, event: &EventInput) -> Result<EventDecision, FilterError> {
        self.evaluate_with_diagnostics(event).map(|r| r.decision)
    }

    /// Verdicts for one event together with a trace of both pipelines.
    pub fn evaluate_with_diagnostics(&self, event: &EventInput) -> Result<EventReport, FilterError> {
        let state = self.state()?;
        let start = Instant::now();
        let tower = run_tower_stage(state.method, &self.params.tower, event, &state.index);
        let objects = event
            .objects
            .as_ref()
            .map(|input| run_object_stage(input, &self.params.objects, &state.index));
        let (object_decision, boundary_code) = objects
            .as_ref()
            .map_or((Decision::passing(), 0), |o| (o.decision, o.boundary_code));
        let decision = EventDecision::combine(
            tower.decision,
            object_decision,
            boundary_code,
            self.params.tagging_mode,
        );
        debug!(
            "event {}:{}:{} tower={} objects={} boundary={} pass={}",
            event.id.run,
            event.id.lumi,
            event.id.event,
            decision.tower.result,
            decision.objects.result,
            decision.boundary_code,
            decision.pass
        );
        Ok(EventReport {
            id: event.id,
            decision,
            tower,
            objects,
            total_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Evaluates events in parallel; results keep the input order.
    pub fn evaluate_batch(&self, events: &[EventInput]) -> Result<Vec<EventDecision>, FilterError> {
        self.state()?;
        events.par_iter().map(|event| self.evaluate(event)).collect()
    }

    /// Parallel counterpart of [`evaluate_with_diagnostics`](Self::evaluate_with_diagnostics).
    pub fn evaluate_batch_with_diagnostics(
        &self,
        events: &[EventInput],
    ) -> Result<Vec<EventReport>, FilterError> {
        self.state()?;
        events
            .par_iter()
            .map(|event| self.evaluate_with_diagnostics(event))
            .collect()
    }

    /// Replace the parameters. The current run is dropped since its index
    /// may no longer match.
    pub fn set_params(&mut self, params: FilterParams) {
        self.params = params;
        self.run = Err(FilterError::RunNotStarted);
    }

    /// Toggle tagging mode without rebuilding the run.
    pub fn set_tagging_mode(&mut self, tagging: bool) {
        self.params.tagging_mode = tagging;
    }
}
