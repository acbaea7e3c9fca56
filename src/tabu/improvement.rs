//! Adaptive tabu search step.
//!
//! # Algorithm
//!
//! Each call to [`TabuImprovement::improve`]:
//!
//! 1. Enumerates the neighbours of the current permutation
//! 2. Selects the best non-tabu neighbour; if every neighbour is tabu, the
//!    best tabu one
//! 3. Updates the elite
//! 4. Records the visit; each visit of a frequently encountered permutation
//!    lengthens the tenure, a long stable period shortens it
//! 5. Escapes with a random walk once too many visits are frequent
//! 6. Pushes the result into the tabu queue and returns it
//!
//! # Reference
//!
//! Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.
//! Battiti, R. & Tecchiolli, G. (1994). "The Reactive Tabu Search",
//! *ORSA Journal on Computing* 6(2), 126-140.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use super::config::TabuConfig;
use super::memory::{RepetitionMemory, TabuQueue, TT_DEC, TT_INC};
use crate::error::{Result, SearchError};
use crate::improvement::Improvement;
use crate::neighbourhood::Neighbourhood;
use crate::permutation::{Instance, Permutation};

/// Tabu search as an [`Improvement`].
///
/// The strategy owns its tabu queue, tenure, repetition memory, elite and
/// random engine. The engine is seeded from [`Instance::seed`], so the same
/// instance, configuration and call sequence always replay the same search.
///
/// # Examples
///
/// ```
/// use u_localsearch::improvement::Improvement;
/// use u_localsearch::neighbourhood::{MoveKind, MoveNeighbourhood};
/// use u_localsearch::permutation::{Instance, Permutation};
/// use u_localsearch::tabu::{TabuConfig, TabuImprovement};
///
/// struct Displacement(usize);
/// impl Instance for Displacement {
///     fn size(&self) -> usize { self.0 }
///     fn evaluate(&self, order: &[usize]) -> i64 {
///         order.iter().enumerate().filter(|&(i, &e)| i != e).count() as i64
///     }
///     fn seed(&self) -> u64 { 42 }
/// }
///
/// let instance = Displacement(6);
/// let n = MoveNeighbourhood::new(MoveKind::Exchange, &instance);
/// let mut tabu = TabuImprovement::new(&instance, &TabuConfig::default()).unwrap();
///
/// let mut current = Permutation::new(vec![5, 4, 3, 2, 1, 0], &instance).unwrap();
/// for _ in 0..20 {
///     current = tabu.improve(&current, &n).unwrap();
/// }
/// assert_eq!(tabu.elite().unwrap().score(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct TabuImprovement {
    config: TabuConfig,
    queue: TabuQueue,
    memory: RepetitionMemory,
    iterations_no_modif: usize,
    elite: Option<Permutation>,
    rng: ChaCha8Rng,
    escapes: usize,
}

impl TabuImprovement {
    /// Creates a tabu strategy for `instance`, seeded from
    /// [`Instance::seed`].
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid.
    pub fn new<I: Instance + ?Sized>(instance: &I, config: &TabuConfig) -> Result<Self> {
        Self::with_seed(config, instance.seed())
    }

    /// Creates a tabu strategy with an explicit seed.
    pub fn with_seed(config: &TabuConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            queue: TabuQueue::new(config.initial_tenure),
            memory: RepetitionMemory::new(
                config.identity,
                config.max_occurrences_frequently_encountered,
            ),
            iterations_no_modif: 0,
            elite: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            escapes: 0,
        })
    }

    /// Current tabu tenure.
    pub fn tenure(&self) -> usize {
        self.queue.tenure()
    }

    /// The tabu queue.
    pub fn tabu_queue(&self) -> &TabuQueue {
        &self.queue
    }

    /// Number of visit keys currently frequently encountered.
    pub fn frequently_encountered(&self) -> usize {
        self.memory.frequent_count()
    }

    /// Number of recorded visits sharing the key of `p`.
    pub fn occurrences(&self, p: &Permutation) -> usize {
        self.memory.occurrences(p)
    }

    /// Iterations since the tenure last increased or decreased.
    pub fn iterations_without_modification(&self) -> usize {
        self.iterations_no_modif
    }

    /// Number of escapes performed so far.
    pub fn escapes(&self) -> usize {
        self.escapes
    }

    /// Best candidate among the neighbours of `p`, honouring the tabu queue.
    fn select(&self, p: &Permutation, n: &dyn Neighbourhood) -> Result<Permutation> {
        let mut best_free: Option<Permutation> = None;
        let mut best_tabu: Option<Permutation> = None;

        for q in n.neighbours(p) {
            let slot = if self.queue.contains(&q) {
                &mut best_tabu
            } else {
                &mut best_free
            };
            if slot.as_ref().is_none_or(|b| q.is_better_than(b)) {
                *slot = Some(q);
            }
        }

        if let Some(q) = best_free {
            return Ok(q);
        }

        // Everything is tabu. Tabu entries were all offered to the elite
        // first, so none can beat it and the best tabu neighbour is taken.
        let q = best_tabu.ok_or_else(|| SearchError::StalledSearch(n.name().to_string()))?;
        trace!(event = "all_tabu", score = q.score());
        Ok(q)
    }

    /// Updates the repetition memory and adapts the tenure. Returns whether
    /// the search should escape.
    fn check_repetitions(&mut self, p: &Permutation) -> bool {
        if self.memory.record(p) {
            self.queue.increase_tenure(TT_INC);
            self.iterations_no_modif = 0;
            debug!(
                event = "tenure_increase",
                tenure = self.queue.tenure(),
                score = p.score(),
            );
        } else {
            self.iterations_no_modif += 1;
            if self.iterations_no_modif >= self.config.tt_iterations_wo_modification {
                self.queue.decrease_tenure(TT_DEC);
                self.iterations_no_modif = 0;
                debug!(event = "tenure_decrease", tenure = self.queue.tenure());
            }
        }

        self.memory.frequent_count() > self.config.max_candidate_trigger_escape
    }

    /// Random walk of `1..=random_steps_escape` moves away from `p`.
    fn escape(&mut self, p: Permutation, n: &dyn Neighbourhood) -> Permutation {
        let steps = self.rng.random_range(1..=self.config.random_steps_escape);
        let from = p.score();
        let mut current = p;
        for _ in 0..steps {
            match n.random_neighbour(&current, &mut self.rng) {
                Some(q) => current = q,
                None => break,
            }
        }

        self.memory.clear();
        self.escapes += 1;
        info!(
            event = "escape",
            steps,
            from,
            to = current.score(),
            tenure = self.queue.tenure(),
        );
        current
    }

    fn update_tabu_queue(&mut self, p: Permutation) {
        self.queue.push(p);
    }

    fn update_elite(&mut self, p: &Permutation) {
        if self.elite.as_ref().is_none_or(|e| p.is_better_than(e)) {
            self.elite = Some(p.clone());
        }
    }
}

impl Improvement for TabuImprovement {
    fn name(&self) -> &str {
        "tabu"
    }

    fn improve(&mut self, p: &Permutation, n: &dyn Neighbourhood) -> Result<Permutation> {
        let selected = self.select(p, n)?;

        if self.elite.is_none() {
            self.elite = Some(p.clone());
        }
        self.update_elite(&selected);

        let next = if self.check_repetitions(&selected) {
            let escaped = self.escape(selected, n);
            self.update_elite(&escaped);
            escaped
        } else {
            selected
        };

        trace!(
            event = "step",
            neighbourhood = n.name(),
            from = p.score(),
            to = next.score(),
            tenure = self.queue.tenure(),
        );

        self.update_tabu_queue(next.clone());
        Ok(next)
    }

    fn elite(&self) -> Option<&Permutation> {
        self.elite.as_ref()
    }
}
