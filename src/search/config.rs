//! Budgets for the search drivers.

use std::time::Duration;

use crate::error::{Result, SearchError};

/// Configuration of the iterated [`SearchRunner`](super::SearchRunner).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_localsearch::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_max_iterations(5_000)
///     .with_max_no_improve(500)
///     .with_time_limit(Duration::from_secs(2));
/// assert_eq!(config.max_iterations, 5_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Maximum number of `improve` calls.
    pub max_iterations: usize,

    /// Maximum consecutive iterations without a new best. 0 = no limit.
    pub max_no_improve: usize,

    /// Wall-clock budget, checked between iterations.
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1_000,
            max_no_improve: 200,
            time_limit: None,
        }
    }
}

impl SearchConfig {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the maximum iterations without improvement (0 disables it).
    pub fn with_max_no_improve(mut self, n: usize) -> Self {
        self.max_no_improve = n;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(SearchError::Config("max_iterations must be positive".into()));
        }
        if self.time_limit.is_some_and(|t| t.is_zero()) {
            return Err(SearchError::Config("time_limit must be positive".into()));
        }
        Ok(())
    }
}

/// Configuration of the [`VndRunner`](super::VndRunner).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VndConfig {
    /// Maximum number of `improve` calls across all neighbourhoods.
    pub max_iterations: usize,
}

impl Default for VndConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100_000,
        }
    }
}

impl VndConfig {
    /// Sets the maximum number of `improve` calls.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(SearchError::Config("max_iterations must be positive".into()));
        }
        Ok(())
    }
}
