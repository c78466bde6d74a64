// Core error type for the recommendation engine.
//
// Only structurally invalid input is a hard failure. Unknown users,
// zero-norm rows, empty neighborhoods and restaurants nobody nearby has
// rated all resolve to empty results at the public entry points.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    /// Malformed review records, an out-of-range rating, or an empty
    /// review collection at matrix-build time.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The target user has no row in the rating matrix.
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// A request ran past its deadline. The worker computing it was
    /// abandoned, not joined.
    #[error("Recommendation timed out after {0:?}")]
    TimedOut(std::time::Duration),
}

impl RecommendError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, RecommendError>;
