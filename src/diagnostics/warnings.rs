use crate::types::{CellId, GroupId};
use log::warn;
use serde::Serialize;
use std::fmt;

/// Non-fatal findings kept for calibration audits. None of them changes a
/// verdict.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsistencyWarning {
    /// Fellow members of a contributing cell's tower are unmasked or fail the
    /// membership predicate.
    MembershipMismatch {
        group: GroupId,
        cell: CellId,
        offending: usize,
    },
    /// Number of cells summed into a tower differs from its topological size.
    UnexpectedMemberCount {
        group: GroupId,
        contributing: usize,
        expected: usize,
    },
    /// Several towers passed the cut; only `chosen` sets the result.
    MultipleQualifyingGroups {
        qualifying: Vec<GroupId>,
        chosen: GroupId,
    },
    /// The tower pipeline had no usable input and defaulted to pass.
    MissingInputData { detail: String },
}

impl ConsistencyWarning {
    /// Records the warning on the `log` facade and hands it back.
    pub(crate) fn emit(self) -> Self {
        warn!("{self}");
        self
    }
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyWarning::MembershipMismatch {
                group,
                cell,
                offending,
            } => write!(
                f,
                "{group}: {offending} member(s) of the tower of {cell} are not masked as expected"
            ),
            ConsistencyWarning::UnexpectedMemberCount {
                group,
                contributing,
                expected,
            } => write!(
                f,
                "{group}: {contributing} contributing cell(s), tower holds {expected}"
            ),
            ConsistencyWarning::MultipleQualifyingGroups { qualifying, chosen } => write!(
                f,
                "{} towers above cut, {chosen} sets the result",
                qualifying.len()
            ),
            ConsistencyWarning::MissingInputData { detail } => {
                write!(f, "no tower input: {detail}; defaulting to pass")
            }
        }
    }
}
