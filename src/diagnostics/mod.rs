//! Diagnostics data model exposed by the filter and the `flag_events` tool.
//!
//! [`EventReport`] is the entry point returned by
//! [`DeadCellFilter::evaluate_with_diagnostics`](crate::DeadCellFilter): it
//! carries the exported verdicts together with a trace of the tower and object
//! stages. [`IndexStage`] describes the index built at run start, and
//! [`RunSummary`] aggregates verdicts over a run. [`ConsistencyWarning`]s are
//! both logged and kept on the stage that raised them.

mod stages;
mod summary;
mod warnings;

pub use stages::{CandidateMatch, EventReport, IndexStage, ObjectStage, TowerStage};
pub use summary::RunSummary;
pub use warnings::ConsistencyWarning;
