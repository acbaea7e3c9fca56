//! Error types for local search.

use thiserror::Error;

/// Errors raised while configuring or running a local search.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A tuning parameter or budget is structurally invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The neighbourhood produced no candidate for the current permutation.
    #[error("Search stalled: neighbourhood `{0}` yielded no candidates")]
    StalledSearch(String),

    /// A neighbourhood name that does not match any known move.
    #[error("Unknown neighbourhood `{0}` (expected transpose, exchange or insert)")]
    UnknownNeighbourhood(String),

    /// A permutation inconsistent with the instance it is scored against.
    #[error("Instance error: {0}")]
    Instance(String),
}

/// Result type alias for local search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
