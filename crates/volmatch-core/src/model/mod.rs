//! Graph vertices of the matching registry.
//!
//! Events and volunteers are the two sides of a bipartite graph. Both
//! implement [`Node`]: a case-insensitive name plus an [`Adjacency`] list of
//! counterpart names. Nodes never own each other; the
//! [`Registry`](crate::registry::Registry) owns every node and is the only
//! code that mutates adjacency.

pub mod date;
pub mod event;
pub mod node;
pub mod volunteer;

pub use date::{DAYS_IN_CALENDAR, Date, FIRST_DATE, LAST_DATE};
pub use event::Event;
pub use node::{Adjacency, Node, NodeKind, cmp_ignore_case, eq_ignore_case};
pub use volunteer::Volunteer;

use crate::error::ErrorCode;

/// Constructor contract violations for events and volunteers.
///
/// These are only reachable when a caller bypasses the registry's own
/// validation; the registry rejects the same inputs with a plain `false`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("date {0} is outside 1..=30")]
    DateOutOfRange(i32),

    #[error("date {0} was supplied more than once")]
    DuplicateDate(i32),

    #[error("volunteer limit {0} is negative")]
    NegativeLimit(i32),
}

impl ModelError {
    /// Every model error is an invalid-argument condition.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::InvalidArgument
    }
}
