//! Read-only collaborators consulted when the channel status index is rebuilt.
//!
//! The filter never owns detector conditions. At every run transition the
//! caller hands over a [`Conditions`] bundle; the index copies what it needs
//! and the providers are not touched again until the next run.
//!
//! Modules
//! - `subgrid` – the parametrized sub-grid descriptor walked by the index.
//! - `synthetic` – a self-contained detector model implementing all three
//!   provider traits, used by the demo binary and the tests.

mod subgrid;
mod synthetic;

pub use subgrid::{standard_grid_a_valid, standard_grid_b_valid, SubgridDescriptor};
pub use synthetic::{SyntheticDetector, SyntheticLayout};

use crate::types::{CellId, CellPosition, GroupId};

/// Geometry provider: sub-grid bounds, cell validity and cell positions.
pub trait CellGeometryCatalog {
    /// `false` when the geometry record is not available for this run.
    fn is_loaded(&self) -> bool {
        true
    }

    /// Sub-grid bounds in enumeration order.
    fn subgrids(&self) -> Vec<SubgridDescriptor> {
        SubgridDescriptor::standard().to_vec()
    }

    fn is_valid(&self, id: &CellId) -> bool;

    fn position(&self, id: &CellId) -> Option<CellPosition>;
}

/// Conditions provider for per-cell status codes.
pub trait ChannelStatusProvider {
    /// `false` when the status record is not available for this run.
    fn is_loaded(&self) -> bool {
        true
    }

    /// Raw status code, `None` if the cell has no entry.
    fn status_code(&self, id: &CellId) -> Option<i32>;
}

/// Many-to-one grouping of cells into trigger towers and its inverse.
pub trait TowerTopology {
    fn group_of(&self, id: &CellId) -> GroupId;

    fn constituents_of(&self, group: &GroupId) -> Vec<CellId>;
}

/// Providers valid for a single run.
#[derive(Clone, Copy)]
pub struct Conditions<'a> {
    pub geometry: &'a dyn CellGeometryCatalog,
    pub status: &'a dyn ChannelStatusProvider,
    pub topology: &'a dyn TowerTopology,
}

impl<'a> Conditions<'a> {
    /// Convenience for providers that implement all three traits.
    pub fn from_provider<P>(provider: &'a P) -> Self
    where
        P: CellGeometryCatalog + ChannelStatusProvider + TowerTopology,
    {
        Self {
            geometry: provider,
            status: provider,
            topology: provider,
        }
    }
}
