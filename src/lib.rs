#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod types;

// Building blocks, usable on their own.
pub mod angle;
pub mod boundary;
pub mod proximity;
pub mod scoring;
pub mod status;

// Tooling support for the `flag_events` binary.
pub mod config;

// --- High-level re-exports -------------------------------------------------

// Main entry points: filter, run context and verdicts.
pub use crate::error::FilterError;
pub use crate::filter::{
    DeadCellFilter, EventDecision, EventId, EventInput, FilterParams, InputAvailability,
    ObjectInput, RunContext, TowerMethod,
};

// Conditions providers.
pub use crate::geometry::{
    CellGeometryCatalog, ChannelStatusProvider, Conditions, SyntheticDetector, TowerTopology,
};

// Index and the per-event building blocks.
pub use crate::proximity::ProximityMatcher;
pub use crate::scoring::{GroupAggregator, PrimitiveScanner, PrimitiveTable, TieBreak};
pub use crate::status::{ChannelStatusIndex, StatusPredicate};

// High-level diagnostics returned by the filter.
pub use crate::diagnostics::{ConsistencyWarning, EventReport, RunSummary};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use dead_cell_filter::prelude::*;
///
/// # fn main() -> Result<(), FilterError> {
/// let cell = CellId::GridA { row: 4, col: 17 };
/// let detector = SyntheticDetector::default().with_status(cell, 13);
/// let index = ChannelStatusIndex::build(
///     &Conditions::from_provider(&detector),
///     &IndexOptions::default(),
/// )?;
/// let matcher = ProximityMatcher::new(StatusPredicate::AtLeast(12));
/// let hit = matcher.is_within(Direction::new(0.05, 0.3), 0.3, &index);
/// println!("masked cells={} hit={hit}", index.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::geometry::Conditions;
    pub use crate::status::IndexOptions;
    pub use crate::types::{CellId, Direction, EnergyReading};
    pub use crate::{
        ChannelStatusIndex, DeadCellFilter, EventInput, FilterError, FilterParams,
        ProximityMatcher, StatusPredicate, SyntheticDetector,
    };
}
