//! Variable Neighbourhood Descent.
//!
//! # Algorithm
//!
//! 1. Set k = 0
//! 2. Ask the improvement for a step from x in N_k
//! 3. If the step is strictly better, accept it and reset k = 0;
//!    otherwise k = k + 1
//! 4. Stop when k reaches the number of neighbourhoods: x is then a local
//!    optimum of every neighbourhood
//!
//! # Reference
//!
//! Hansen, P. & Mladenović, N. (2001). "Variable neighborhood search:
//! Principles and applications", *European Journal of Operational Research* 130(3), 449-467.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, trace};

use super::config::VndConfig;
use super::runner::{SearchResult, StopReason};
use crate::error::{Result, SearchError};
use crate::improvement::Improvement;
use crate::neighbourhood::Neighbourhood;
use crate::permutation::Permutation;

/// Result of a VND run.
#[derive(Debug, Clone)]
pub struct VndResult {
    /// Overall search outcome. `score_history` holds the current score
    /// after each `improve` call.
    pub search: SearchResult,

    /// Accepted improvements per neighbourhood, in input order.
    pub improvements: Vec<usize>,
}

/// Variable Neighbourhood Descent driver.
pub struct VndRunner;

impl VndRunner {
    /// Runs VND over `neighbourhoods`, smallest first by convention.
    ///
    /// A stalled neighbourhood counts as "no improvement" and the descent
    /// moves on to the next one.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_localsearch::improvement::FirstImprovement;
    /// use u_localsearch::neighbourhood::MoveNeighbourhood;
    /// use u_localsearch::permutation::{Instance, Permutation};
    /// use u_localsearch::search::{StopReason, VndConfig, VndRunner};
    ///
    /// struct Displacement(usize);
    /// impl Instance for Displacement {
    ///     fn size(&self) -> usize { self.0 }
    ///     fn evaluate(&self, order: &[usize]) -> i64 {
    ///         order.iter().enumerate().filter(|&(i, &e)| i != e).count() as i64
    ///     }
    ///     fn seed(&self) -> u64 { 0 }
    /// }
    ///
    /// let instance = Displacement(5);
    /// let neighbourhoods = MoveNeighbourhood::all(&instance);
    /// let initial = Permutation::new(vec![4, 3, 2, 1, 0], &instance).unwrap();
    ///
    /// let result = VndRunner::run(
    ///     &mut FirstImprovement,
    ///     initial,
    ///     &neighbourhoods,
    ///     &VndConfig::default(),
    /// )
    /// .unwrap();
    /// assert_eq!(result.search.best_score, 0);
    /// assert_eq!(result.search.stop_reason, StopReason::LocalOptimum);
    /// ```
    pub fn run<I, N>(
        improvement: &mut I,
        initial: Permutation,
        neighbourhoods: &[N],
        config: &VndConfig,
    ) -> Result<VndResult>
    where
        I: Improvement + ?Sized,
        N: Neighbourhood,
    {
        Self::run_with_cancel(improvement, initial, neighbourhoods, config, None)
    }

    /// Runs VND with an optional cancellation flag.
    pub fn run_with_cancel<I, N>(
        improvement: &mut I,
        initial: Permutation,
        neighbourhoods: &[N],
        config: &VndConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<VndResult>
    where
        I: Improvement + ?Sized,
        N: Neighbourhood,
    {
        config.validate()?;
        if neighbourhoods.is_empty() {
            return Err(SearchError::Config(
                "VND needs at least one neighbourhood".into(),
            ));
        }

        let start = Instant::now();
        info!(
            event = "vnd_start",
            improvement = improvement.name(),
            neighbourhoods = neighbourhoods.len(),
            score = initial.score(),
        );

        let mut current = initial;
        let mut best = current.clone();
        let mut improvements = vec![0; neighbourhoods.len()];
        let mut iterations = 0;
        let mut best_iteration = 0;
        let mut score_history = Vec::new();
        let mut stop_reason = StopReason::LocalOptimum;
        let mut k = 0;

        while k < neighbourhoods.len() {
            if iterations >= config.max_iterations {
                stop_reason = StopReason::MaxIterations;
                break;
            }
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    stop_reason = StopReason::Cancelled;
                    break;
                }
            }

            let n = &neighbourhoods[k];
            let candidate = match improvement.improve(&current, n) {
                Ok(candidate) => Some(candidate),
                Err(SearchError::StalledSearch(_)) => None,
                Err(e) => return Err(e),
            };
            iterations += 1;

            match candidate {
                Some(candidate) if candidate.is_better_than(&current) => {
                    trace!(
                        event = "vnd_improve",
                        neighbourhood = n.name(),
                        from = current.score(),
                        to = candidate.score(),
                    );
                    current = candidate;
                    improvements[k] += 1;
                    k = 0;
                }
                _ => k += 1,
            }
            score_history.push(current.score());

            let step_best = match improvement.elite() {
                Some(elite) if elite.is_better_than(&current) => elite,
                _ => &current,
            };
            if step_best.is_better_than(&best) {
                best = step_best.clone();
                best_iteration = iterations;
            }
        }

        let elapsed = start.elapsed();
        info!(
            event = "vnd_end",
            score = best.score(),
            iterations,
            reason = ?stop_reason,
            elapsed_ms = elapsed.as_millis() as u64,
        );

        Ok(VndResult {
            search: SearchResult {
                best_score: best.score(),
                best,
                iterations,
                best_iteration,
                stop_reason,
                elapsed,
                score_history,
            },
            improvements,
        })
    }
}
