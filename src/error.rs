use thiserror::Error;

/// Fatal errors raised by the filter.
///
/// Non-fatal conditions (missing event inputs, odd group populations) are not
/// errors; they surface as [`crate::diagnostics::ConsistencyWarning`] values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Geometry or channel status could not be supplied at run start.
    #[error("conditions unavailable: {0}")]
    ConditionsUnavailable(String),

    /// A release tag that does not carry `<prefix>_<major>_<minor>...`.
    #[error("invalid release tag: {0}")]
    InvalidRelease(String),

    /// An event arrived before a run was successfully started.
    #[error("no channel status index; begin_run has not succeeded")]
    RunNotStarted,
}
