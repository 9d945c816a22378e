use serde::{Deserialize, Serialize};

/// Selects which masked cells a stage looks at, by status code.
///
/// Configured with the signed-integer convention: a positive value `V` means
/// "status == V", a negative value `-V` means "status >= V" and `0` accepts
/// every cell in the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum StatusPredicate {
    Exact(i32),
    AtLeast(i32),
    Any,
}

impl StatusPredicate {
    pub fn from_signed(value: i32) -> Self {
        match value {
            v if v > 0 => StatusPredicate::Exact(v),
            v if v < 0 => StatusPredicate::AtLeast(v.saturating_abs()),
            _ => StatusPredicate::Any,
        }
    }

    pub fn to_signed(self) -> i32 {
        match self {
            StatusPredicate::Exact(v) => v,
            StatusPredicate::AtLeast(v) => -v,
            StatusPredicate::Any => 0,
        }
    }

    #[inline]
    pub fn matches(&self, status: i32) -> bool {
        match *self {
            StatusPredicate::Exact(v) => status == v,
            StatusPredicate::AtLeast(v) => status >= v,
            StatusPredicate::Any => true,
        }
    }
}

impl From<i32> for StatusPredicate {
    fn from(value: i32) -> Self {
        Self::from_signed(value)
    }
}

impl From<StatusPredicate> for i32 {
    fn from(value: StatusPredicate) -> Self {
        value.to_signed()
    }
}
