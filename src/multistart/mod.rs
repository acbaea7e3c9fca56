//! Parallel multi-start tabu search.
//!
//! Each start runs an independent [`TabuImprovement`] on its own rayon task.
//! No state is shared between workers: worker `w` seeds its engine with
//! `instance.seed() + w`, so a multi-start run is as reproducible as a
//! single search.

use rayon::prelude::*;
use tracing::info;

use crate::error::{Result, SearchError};
use crate::neighbourhood::Neighbourhood;
use crate::permutation::{Instance, Permutation};
use crate::search::{SearchConfig, SearchResult, SearchRunner};
use crate::tabu::{TabuConfig, TabuImprovement};

/// Result of a multi-start run.
#[derive(Debug, Clone)]
pub struct MultiStartResult {
    /// One result per start, in input order.
    pub runs: Vec<SearchResult>,

    /// Index of the run with the best score (the lowest index on ties).
    pub best_worker: usize,
}

impl MultiStartResult {
    /// The best run.
    pub fn best(&self) -> &SearchResult {
        &self.runs[self.best_worker]
    }
}

/// Multi-start driver.
pub struct MultiStart;

impl MultiStart {
    /// Runs one tabu search per initial permutation in parallel.
    ///
    /// Returns [`SearchError::Config`] if `initials` is empty or either
    /// configuration is invalid.
    pub fn run<I: Instance + ?Sized>(
        instance: &I,
        tabu: &TabuConfig,
        search: &SearchConfig,
        initials: Vec<Permutation>,
        neighbourhood: &dyn Neighbourhood,
    ) -> Result<MultiStartResult> {
        tabu.validate()?;
        search.validate()?;
        if initials.is_empty() {
            return Err(SearchError::Config(
                "multi-start needs at least one initial permutation".into(),
            ));
        }

        let seed = instance.seed();
        let runs: Vec<SearchResult> = initials
            .into_par_iter()
            .enumerate()
            .map(|(worker, initial)| {
                let worker_seed = seed.wrapping_add(worker as u64);
                let mut improvement = TabuImprovement::with_seed(tabu, worker_seed)?;
                SearchRunner::run(&mut improvement, initial, neighbourhood, search)
            })
            .collect::<Result<_>>()?;

        let best_worker = runs
            .iter()
            .enumerate()
            .min_by_key(|(_, r)| r.best_score)
            .map(|(w, _)| w)
            .unwrap_or(0);

        info!(
            event = "multistart_end",
            workers = runs.len(),
            best_worker,
            score = runs[best_worker].best_score,
        );

        Ok(MultiStartResult { runs, best_worker })
    }
}
