//! Short-term and repetition memory of the tabu search.

use std::collections::{HashMap, HashSet, VecDeque};

use super::config::VisitIdentity;
use crate::permutation::Permutation;

/// Amount added to the tenure on each visit of a frequently encountered
/// permutation.
pub const TT_INC: usize = 1;

/// Amount removed from the tenure after a stable period.
pub const TT_DEC: usize = 1;

/// Bounded FIFO of recently visited permutations.
///
/// The capacity is the tabu tenure. It is adjusted during the search and
/// never drops below 1; whenever the queue holds more entries than the
/// tenure, the oldest ones are evicted.
#[derive(Debug, Clone)]
pub struct TabuQueue {
    entries: VecDeque<Permutation>,
    tenure: usize,
}

impl TabuQueue {
    /// Creates an empty queue. A zero `tenure` is raised to 1.
    pub fn new(tenure: usize) -> Self {
        let tenure = tenure.max(1);
        Self {
            entries: VecDeque::with_capacity(tenure + 1),
            tenure,
        }
    }

    /// Current capacity.
    pub fn tenure(&self) -> usize {
        self.tenure
    }

    /// Number of permutations currently tabu.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no permutation is tabu.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `p` is tabu. Linear in the tenure.
    pub fn contains(&self, p: &Permutation) -> bool {
        self.entries.iter().any(|q| q == p)
    }

    /// Makes `p` tabu, evicting the oldest entries beyond the tenure.
    pub fn push(&mut self, p: Permutation) {
        self.entries.push_back(p);
        self.evict();
    }

    /// Lengthens the memory by `by`.
    pub fn increase_tenure(&mut self, by: usize) {
        self.tenure = self.tenure.saturating_add(by);
    }

    /// Shortens the memory by `by`, clamped at 1.
    pub fn decrease_tenure(&mut self, by: usize) {
        self.tenure = self.tenure.saturating_sub(by).max(1);
        self.evict();
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Permutation> {
        self.entries.iter()
    }

    fn evict(&mut self) {
        while self.entries.len() > self.tenure {
            self.entries.pop_front();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum VisitKey {
    Score(i64),
    Content(Vec<usize>),
}

/// Counts visits and tracks the frequently encountered ones.
///
/// With [`VisitIdentity::Score`], distinct permutations sharing a score are
/// the same visit. That collision is accepted: the score is already cached
/// and the tables stay small.
#[derive(Debug, Clone)]
pub(crate) struct RepetitionMemory {
    identity: VisitIdentity,
    threshold: usize,
    occurrences: HashMap<VisitKey, usize>,
    frequently_encountered: HashSet<VisitKey>,
}

impl RepetitionMemory {
    pub(crate) fn new(identity: VisitIdentity, threshold: usize) -> Self {
        Self {
            identity,
            threshold,
            occurrences: HashMap::new(),
            frequently_encountered: HashSet::new(),
        }
    }

    fn key(&self, p: &Permutation) -> VisitKey {
        match self.identity {
            VisitIdentity::Score => VisitKey::Score(p.score()),
            VisitIdentity::Content => VisitKey::Content(p.order().to_vec()),
        }
    }

    /// Records a visit of `p`. Returns true when `p` has now been visited
    /// at least `threshold` times, marking it frequently encountered.
    pub(crate) fn record(&mut self, p: &Permutation) -> bool {
        let key = self.key(p);
        let count = self.occurrences.entry(key.clone()).or_insert(0);
        *count += 1;
        if *count < self.threshold {
            return false;
        }
        self.frequently_encountered.insert(key);
        true
    }

    pub(crate) fn occurrences(&self, p: &Permutation) -> usize {
        self.occurrences.get(&self.key(p)).copied().unwrap_or(0)
    }

    pub(crate) fn frequent_count(&self) -> usize {
        self.frequently_encountered.len()
    }

    /// Forgets every visit.
    pub(crate) fn clear(&mut self) {
        self.occurrences.clear();
        self.frequently_encountered.clear();
    }
}
