//! Channel status: which cells are masked, and how stages select among them.

mod index;
mod predicate;

pub use index::{ChannelStatusIndex, IndexOptions, ABSENT_STATUS};
pub use predicate::StatusPredicate;
