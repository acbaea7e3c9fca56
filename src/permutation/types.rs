//! Permutation solutions and the problem instance that scores them.

use crate::error::{Result, SearchError};

/// Static data of a permutation problem.
///
/// The instance knows how to score an order of `0..size()`. Scores are
/// minimized throughout the crate; for maximization, negate the score.
///
/// # Examples
///
/// ```
/// use u_localsearch::permutation::{Instance, Permutation};
///
/// /// Total weighted completion time on a single machine.
/// struct SingleMachine {
///     durations: Vec<i64>,
///     weights: Vec<i64>,
/// }
///
/// impl Instance for SingleMachine {
///     fn size(&self) -> usize {
///         self.durations.len()
///     }
///
///     fn evaluate(&self, order: &[usize]) -> i64 {
///         let mut t = 0;
///         order.iter().map(|&j| { t += self.durations[j]; t * self.weights[j] }).sum()
///     }
///
///     fn seed(&self) -> u64 {
///         self.durations.iter().chain(&self.weights).sum::<i64>() as u64
///     }
/// }
///
/// let instance = SingleMachine { durations: vec![3, 1, 2], weights: vec![1, 1, 1] };
/// let p = Permutation::identity(&instance);
/// assert_eq!(p.score(), 3 + 4 + 6);
/// ```
pub trait Instance: Send + Sync {
    /// Number of elements in a solution.
    fn size(&self) -> usize;

    /// Objective value of `order`. Lower is better.
    fn evaluate(&self, order: &[usize]) -> i64;

    /// Deterministic seed for the random engines working on this instance.
    ///
    /// Conventionally the sum of all instance data, so that the same
    /// instance always replays the same search.
    fn seed(&self) -> u64;
}

/// A scored ordering of `0..n`.
///
/// Equality, hashing and ordering follow the content (the order first, the
/// cached score second). A permutation is never mutated once scored; moves
/// always build a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Permutation {
    order: Vec<usize>,
    score: i64,
}

impl Permutation {
    /// Scores `order` against `instance`.
    ///
    /// Returns [`SearchError::Instance`] if `order` is not a permutation of
    /// `0..instance.size()`.
    pub fn new<I: Instance + ?Sized>(order: Vec<usize>, instance: &I) -> Result<Self> {
        let n = instance.size();
        if order.len() != n {
            return Err(SearchError::Instance(format!(
                "permutation has {} elements, instance expects {n}",
                order.len()
            )));
        }
        let mut seen = vec![false; n];
        for &e in &order {
            if e >= n || seen[e] {
                return Err(SearchError::Instance(format!(
                    "element {e} is out of range or repeated"
                )));
            }
            seen[e] = true;
        }
        Ok(Self::scored(order, instance))
    }

    /// The identity order `0, 1, ..., n-1`.
    pub fn identity<I: Instance + ?Sized>(instance: &I) -> Self {
        Self::scored((0..instance.size()).collect(), instance)
    }

    /// Scores an order already known to be a valid permutation.
    pub(crate) fn scored<I: Instance + ?Sized>(order: Vec<usize>, instance: &I) -> Self {
        let score = instance.evaluate(&order);
        Self { order, score }
    }

    /// Cached objective value.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// The ordered elements.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the permutation has no elements.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `self` scores strictly better than `other`.
    pub fn is_better_than(&self, other: &Permutation) -> bool {
        self.score < other.score
    }
}
