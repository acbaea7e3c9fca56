//! Core trait for improvement strategies.

use crate::error::Result;
use crate::neighbourhood::Neighbourhood;
use crate::permutation::Permutation;

/// One step of a local search: picks the permutation that replaces the
/// current solution.
///
/// Drivers such as [`SearchRunner`](crate::search::SearchRunner) and
/// [`VndRunner`](crate::search::VndRunner) call `improve` in a loop and feed
/// the returned permutation back as the next current solution. New
/// strategies plug into those drivers by implementing this trait.
///
/// # Errors
///
/// Implementations return [`SearchError::StalledSearch`](crate::error::SearchError::StalledSearch)
/// when the neighbourhood has no candidate for `p`.
pub trait Improvement {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Performs one step from `p` within `n`.
    fn improve(&mut self, p: &Permutation, n: &dyn Neighbourhood) -> Result<Permutation>;

    /// Best permutation remembered across calls, for strategies that track
    /// one. Strategies that may move to worse solutions should expose it so
    /// drivers never report less than what was visited.
    fn elite(&self) -> Option<&Permutation> {
        None
    }
}
