//! Deterministic pivoting rules.

use tracing::trace;

use super::types::Improvement;
use crate::error::{Result, SearchError};
use crate::neighbourhood::Neighbourhood;
use crate::permutation::Permutation;

/// Moves to the first neighbour, in enumeration order, that scores strictly
/// better than the current permutation. Returns the current permutation
/// unchanged at a local optimum.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstImprovement;

impl Improvement for FirstImprovement {
    fn name(&self) -> &str {
        "first-improvement"
    }

    fn improve(&mut self, p: &Permutation, n: &dyn Neighbourhood) -> Result<Permutation> {
        let mut neighbours = n.neighbours(p);
        if neighbours.len() == 0 {
            return Err(SearchError::StalledSearch(n.name().to_string()));
        }
        match neighbours.find(|q| q.is_better_than(p)) {
            Some(q) => {
                trace!(event = "improve", rule = "first", from = p.score(), to = q.score());
                Ok(q)
            }
            None => Ok(p.clone()),
        }
    }
}

/// Scans the whole neighbourhood and moves to its best neighbour if that
/// neighbour is strictly better than the current permutation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestImprovement;

impl Improvement for BestImprovement {
    fn name(&self) -> &str {
        "best-improvement"
    }

    fn improve(&mut self, p: &Permutation, n: &dyn Neighbourhood) -> Result<Permutation> {
        let mut best: Option<Permutation> = None;
        for q in n.neighbours(p) {
            if best.as_ref().is_none_or(|b| q.is_better_than(b)) {
                best = Some(q);
            }
        }
        let best = best.ok_or_else(|| SearchError::StalledSearch(n.name().to_string()))?;
        if best.is_better_than(p) {
            trace!(event = "improve", rule = "best", from = p.score(), to = best.score());
            Ok(best)
        } else {
            Ok(p.clone())
        }
    }
}
