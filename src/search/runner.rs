//! Iterated local search loop.
//!
//! # Algorithm
//!
//! 1. Start from the initial permutation
//! 2. At each iteration, ask the improvement for the next permutation and
//!    make it current
//! 3. Track the best permutation seen, including the improvement's elite
//! 4. Stop on the iteration budget, stagnation, the time budget, external
//!    cancellation or a stalled neighbourhood

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use super::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::improvement::Improvement;
use crate::neighbourhood::Neighbourhood;
use crate::permutation::Permutation;

/// Why a search driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// The iteration budget was used up.
    MaxIterations,
    /// No new best within `max_no_improve` iterations.
    NoImprovement,
    /// The time budget ran out.
    TimeLimit,
    /// The cancellation flag was raised.
    Cancelled,
    /// The neighbourhood had no candidate for the current permutation.
    Stalled,
    /// No neighbourhood improves the current permutation (VND).
    LocalOptimum,
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best permutation found.
    pub best: Permutation,

    /// Score of the best permutation.
    pub best_score: i64,

    /// Number of `improve` calls that returned a permutation.
    pub iterations: usize,

    /// Iteration at which the best permutation was found, either as the
    /// current permutation or as the improvement's elite.
    pub best_iteration: usize,

    /// Why the run ended.
    pub stop_reason: StopReason,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,

    /// Best score after each iteration.
    pub score_history: Vec<i64>,
}

/// Drives any [`Improvement`] in a loop over one neighbourhood.
pub struct SearchRunner;

impl SearchRunner {
    /// Runs the search.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_localsearch::neighbourhood::{MoveKind, MoveNeighbourhood};
    /// use u_localsearch::permutation::{Instance, Permutation};
    /// use u_localsearch::search::{SearchConfig, SearchRunner};
    /// use u_localsearch::tabu::{TabuConfig, TabuImprovement};
    ///
    /// struct Displacement(usize);
    /// impl Instance for Displacement {
    ///     fn size(&self) -> usize { self.0 }
    ///     fn evaluate(&self, order: &[usize]) -> i64 {
    ///         order.iter().enumerate().filter(|&(i, &e)| i != e).count() as i64
    ///     }
    ///     fn seed(&self) -> u64 { 1 }
    /// }
    ///
    /// let instance = Displacement(8);
    /// let n = MoveNeighbourhood::new(MoveKind::Exchange, &instance);
    /// let mut tabu = TabuImprovement::new(&instance, &TabuConfig::default()).unwrap();
    /// let initial = Permutation::new(vec![7, 6, 5, 4, 3, 2, 1, 0], &instance).unwrap();
    ///
    /// let result = SearchRunner::run(&mut tabu, initial, &n, &SearchConfig::default()).unwrap();
    /// assert_eq!(result.best_score, 0);
    /// ```
    pub fn run<I: Improvement + ?Sized>(
        improvement: &mut I,
        initial: Permutation,
        neighbourhood: &dyn Neighbourhood,
        config: &SearchConfig,
    ) -> Result<SearchResult> {
        Self::run_with_cancel(improvement, initial, neighbourhood, config, None)
    }

    /// Runs the search with an optional cancellation flag, checked between
    /// iterations.
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid. A stalled
    /// neighbourhood ends the run with [`StopReason::Stalled`] rather than
    /// an error.
    pub fn run_with_cancel<I: Improvement + ?Sized>(
        improvement: &mut I,
        initial: Permutation,
        neighbourhood: &dyn Neighbourhood,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult> {
        config.validate()?;

        let start = Instant::now();
        info!(
            event = "search_start",
            improvement = improvement.name(),
            neighbourhood = neighbourhood.name(),
            score = initial.score(),
        );

        let mut current = initial;
        let mut best = current.clone();
        let mut best_iteration = 0;
        let mut iterations = 0;
        let mut no_improve_count = 0;
        let mut score_history = Vec::with_capacity(config.max_iterations.min(1 << 16));
        let mut stop_reason = StopReason::MaxIterations;

        while iterations < config.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    stop_reason = StopReason::Cancelled;
                    break;
                }
            }
            if config.time_limit.is_some_and(|limit| start.elapsed() >= limit) {
                stop_reason = StopReason::TimeLimit;
                break;
            }

            current = match improvement.improve(&current, neighbourhood) {
                Ok(next) => next,
                Err(SearchError::StalledSearch(_)) => {
                    stop_reason = StopReason::Stalled;
                    break;
                }
                Err(e) => return Err(e),
            };
            iterations += 1;

            // The elite can hold a permutation that never became current.
            let step_best = match improvement.elite() {
                Some(elite) if elite.is_better_than(&current) => elite,
                _ => &current,
            };
            if step_best.is_better_than(&best) {
                best = step_best.clone();
                best_iteration = iterations;
                no_improve_count = 0;
            } else {
                no_improve_count += 1;
            }
            score_history.push(best.score());

            if config.max_no_improve > 0 && no_improve_count >= config.max_no_improve {
                stop_reason = StopReason::NoImprovement;
                break;
            }
        }

        let elapsed = start.elapsed();
        info!(
            event = "search_end",
            improvement = improvement.name(),
            score = best.score(),
            iterations,
            reason = ?stop_reason,
            elapsed_ms = elapsed.as_millis() as u64,
        );

        Ok(SearchResult {
            best_score: best.score(),
            best,
            iterations,
            best_iteration,
            stop_reason,
            elapsed,
            score_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::improvement::{BestImprovement, FirstImprovement};
    use crate::neighbourhood::{MoveKind, MoveNeighbourhood};
    use crate::permutation::Instance;
    use crate::tabu::{TabuConfig, TabuImprovement};

    /// Number of elements out of place.
    struct Displacement(usize);

    impl Instance for Displacement {
        fn size(&self) -> usize {
            self.0
        }

        fn evaluate(&self, order: &[usize]) -> i64 {
            order.iter().enumerate().filter(|&(i, &e)| i != e).count() as i64
        }

        fn seed(&self) -> u64 {
            self.0 as u64
        }
    }

    /// Total weighted completion time on one machine.
    struct SingleMachine {
        durations: Vec<i64>,
        weights: Vec<i64>,
    }

    impl Instance for SingleMachine {
        fn size(&self) -> usize {
            self.durations.len()
        }

        fn evaluate(&self, order: &[usize]) -> i64 {
            let mut t = 0;
            order
                .iter()
                .map(|&j| {
                    t += self.durations[j];
                    t * self.weights[j]
                })
                .sum()
        }

        fn seed(&self) -> u64 {
            self.durations.iter().chain(&self.weights).sum::<i64>() as u64
        }
    }

    fn reversed(instance: &dyn Instance) -> Permutation {
        Permutation::new((0..instance.size()).rev().collect(), instance).unwrap()
    }

    #[test]
    fn test_search_tabu_finds_optimum() {
        let instance = Displacement(10);
        let n = MoveNeighbourhood::new(MoveKind::Exchange, &instance);
        let mut tabu = TabuImprovement::new(&instance, &TabuConfig::default()).unwrap();

        let result = SearchRunner::run(
            &mut tabu,
            reversed(&instance),
            &n,
            &SearchConfig::default().with_max_iterations(200),
        )
        .unwrap();

        assert_eq!(result.best_score, 0);
        assert_eq!(result.best.order(), (0..10).collect::<Vec<_>>().as_slice());
        assert!(result.best_iteration <= result.iterations);
    }

    #[test]
    fn test_search_history_non_increasing() {
        let instance = SingleMachine {
            durations: vec![4, 2, 7, 1, 5, 3, 6],
            weights: vec![1, 3, 2, 5, 1, 4, 2],
        };
        let n = MoveNeighbourhood::new(MoveKind::Insert, &instance);
        let mut tabu = TabuImprovement::new(&instance, &TabuConfig::default()).unwrap();

        let result = SearchRunner::run(
            &mut tabu,
            Permutation::identity(&instance),
            &n,
            &SearchConfig::default().with_max_iterations(150).with_max_no_improve(0),
        )
        .unwrap();

        assert_eq!(result.stop_reason, StopReason::MaxIterations);
        assert_eq!(result.iterations, 150);
        assert_eq!(result.score_history.len(), 150);
        for window in result.score_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best score history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
        assert_eq!(result.best.score(), result.best_score);
    }

    #[test]
    fn test_search_stagnation_termination() {
        let instance = Displacement(6);
        let n = MoveNeighbourhood::new(MoveKind::Transpose, &instance);
        let mut tabu = TabuImprovement::new(&instance, &TabuConfig::default()).unwrap();

        let result = SearchRunner::run(
            &mut tabu,
            Permutation::identity(&instance),
            &n,
            &SearchConfig::default()
                .with_max_iterations(10_000)
                .with_max_no_improve(20),
        )
        .unwrap();

        assert_eq!(result.stop_reason, StopReason::NoImprovement);
        assert_eq!(result.iterations, 20);
        assert_eq!(result.best_score, 0);
    }

    #[test]
    fn test_search_descent_stops_after_local_optimum() {
        let instance = Displacement(6);
        let n = MoveNeighbourhood::new(MoveKind::Exchange, &instance);

        let result = SearchRunner::run(
            &mut BestImprovement,
            reversed(&instance),
            &n,
            &SearchConfig::default().with_max_no_improve(1),
        )
        .unwrap();

        assert_eq!(result.stop_reason, StopReason::NoImprovement);
        assert_eq!(result.best_score, 0);
        assert_eq!(result.best_iteration, 3);
        // Three improving swaps, then one call that returns the optimum.
        assert_eq!(result.iterations, 4);
    }

    #[test]
    fn test_search_stalled_neighbourhood() {
        let instance = Displacement(1);
        let n = MoveNeighbourhood::new(MoveKind::Exchange, &instance);

        let result = SearchRunner::run(
            &mut FirstImprovement,
            Permutation::identity(&instance),
            &n,
            &SearchConfig::default(),
        )
        .unwrap();

        assert_eq!(result.stop_reason, StopReason::Stalled);
        assert_eq!(result.iterations, 0);
        assert!(result.score_history.is_empty());
    }

    #[test]
    fn test_search_cancelled_before_start() {
        let instance = Displacement(5);
        let n = MoveNeighbourhood::new(MoveKind::Exchange, &instance);
        let mut tabu = TabuImprovement::new(&instance, &TabuConfig::default()).unwrap();
        let flag = Arc::new(AtomicBool::new(true));

        let result = SearchRunner::run_with_cancel(
            &mut tabu,
            reversed(&instance),
            &n,
            &SearchConfig::default(),
            Some(flag),
        )
        .unwrap();

        assert_eq!(result.stop_reason, StopReason::Cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best, reversed(&instance));
    }

    /// Never moves, but reveals `target` as its elite on step `reveal_at`.
    struct HiddenElite {
        steps: usize,
        reveal_at: usize,
        target: Permutation,
        elite: Option<Permutation>,
    }

    impl Improvement for HiddenElite {
        fn name(&self) -> &str {
            "hidden_elite"
        }

        fn improve(&mut self, p: &Permutation, _n: &dyn Neighbourhood) -> Result<Permutation> {
            self.steps += 1;
            if self.steps == self.reveal_at {
                self.elite = Some(self.target.clone());
            }
            Ok(p.clone())
        }

        fn elite(&self) -> Option<&Permutation> {
            self.elite.as_ref()
        }
    }

    #[test]
    fn test_search_records_when_elite_improves() {
        let instance = Displacement(5);
        let n = MoveNeighbourhood::new(MoveKind::Exchange, &instance);
        let mut improvement = HiddenElite {
            steps: 0,
            reveal_at: 2,
            target: Permutation::identity(&instance),
            elite: None,
        };

        let result = SearchRunner::run(
            &mut improvement,
            reversed(&instance),
            &n,
            &SearchConfig::default().with_max_iterations(5).with_max_no_improve(0),
        )
        .unwrap();

        assert_eq!(result.best_score, 0);
        assert_eq!(result.best, Permutation::identity(&instance));
        assert_eq!(result.best_iteration, 2);
        assert_eq!(result.score_history, vec![4, 0, 0, 0, 0]);
    }

    #[test]
    fn test_search_rejects_invalid_config() {
        let instance = Displacement(5);
        let n = MoveNeighbourhood::new(MoveKind::Exchange, &instance);
        let err = SearchRunner::run(
            &mut FirstImprovement,
            reversed(&instance),
            &n,
            &SearchConfig::default().with_max_iterations(0),
        )
        .unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }
}
