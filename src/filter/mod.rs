//! Event filter combining a tower pipeline and an object pipeline.
//!
//! Overview
//! - At run start the masked-cell index is built from the run's conditions and
//!   the tower scoring path is chosen: tower primitives if present, otherwise
//!   per-cell readings when the data's release is recent enough, otherwise the
//!   tower pipeline is disabled and passes.
//! - Tower pipeline: the signed result of the chosen path. Any non-zero result
//!   fails the tower verdict.
//! - Object pipeline: candidates passing the kinematic selection and aligned
//!   with the missing energy in azimuth are matched against masked cells.
//!   The count of matched candidates and the composite boundary code of the
//!   examined candidates make up the object verdict.
//! - The event passes when both verdicts pass. Tagging mode records the
//!   verdicts but always passes the gate.
//!
//! Modules
//! - [`params`] – configuration types for both pipelines.
//! - `pipeline` – the [`DeadCellFilter`] implementation.
//! - `tower`, `objects` – the two per-event stages.
//! - `release` – release-tag parsing for the per-cell readings gate.

mod event;
mod objects;
pub mod params;
mod pipeline;
mod release;
mod tower;

pub use event::{EventDecision, EventId, EventInput, ObjectInput};
pub use objects::{close_to_missing_energy, select_candidates};
pub use params::{FilterParams, ObjectOptions, TowerOptions};
pub use pipeline::{DeadCellFilter, RunContext};
pub use release::ReleaseVersion;
pub use tower::{select_method, InputAvailability, TowerMethod};
