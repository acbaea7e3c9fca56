//! The neighbourhood abstraction consumed by every improvement strategy.

use rand::{Rng, RngCore};

use crate::permutation::Permutation;

/// A move-generation policy: the permutations reachable from a given one by
/// a single structural move.
///
/// Moves are addressed by a stable index in `0..move_count(p)`, which keeps
/// enumeration lazy and lets random neighbours be drawn without building the
/// whole neighbourhood.
pub trait Neighbourhood: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Number of neighbours of `p`.
    fn move_count(&self, p: &Permutation) -> usize;

    /// The `index`-th neighbour of `p`, scored.
    ///
    /// `index` must be below `move_count(p)`.
    fn neighbour(&self, p: &Permutation, index: usize) -> Permutation;

    /// A neighbour of `p` drawn uniformly, or `None` if `p` has none.
    fn random_neighbour(&self, p: &Permutation, rng: &mut dyn RngCore) -> Option<Permutation> {
        let count = self.move_count(p);
        if count == 0 {
            return None;
        }
        Some(self.neighbour(p, rng.random_range(0..count)))
    }
}

impl<N: Neighbourhood + ?Sized> Neighbourhood for &N {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn move_count(&self, p: &Permutation) -> usize {
        (**self).move_count(p)
    }

    fn neighbour(&self, p: &Permutation, index: usize) -> Permutation {
        (**self).neighbour(p, index)
    }

    fn random_neighbour(&self, p: &Permutation, rng: &mut dyn RngCore) -> Option<Permutation> {
        (**self).random_neighbour(p, rng)
    }
}

impl<N: Neighbourhood + ?Sized> Neighbourhood for Box<N> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn move_count(&self, p: &Permutation) -> usize {
        (**self).move_count(p)
    }

    fn neighbour(&self, p: &Permutation, index: usize) -> Permutation {
        (**self).neighbour(p, index)
    }

    fn random_neighbour(&self, p: &Permutation, rng: &mut dyn RngCore) -> Option<Permutation> {
        (**self).random_neighbour(p, rng)
    }
}

impl<'n> dyn Neighbourhood + 'n {
    /// Lazily enumerates the neighbours of `p` in index order.
    pub fn neighbours<'a>(&'a self, p: &'a Permutation) -> Neighbours<'a> {
        Neighbours::new(self, p)
    }
}

/// Iterator over the neighbours of one permutation.
pub struct Neighbours<'a> {
    neighbourhood: &'a dyn Neighbourhood,
    origin: &'a Permutation,
    next: usize,
    len: usize,
}

impl<'a> Neighbours<'a> {
    /// Starts an enumeration of `neighbourhood` around `origin`.
    pub fn new(neighbourhood: &'a dyn Neighbourhood, origin: &'a Permutation) -> Self {
        Self {
            neighbourhood,
            origin,
            next: 0,
            len: neighbourhood.move_count(origin),
        }
    }
}

impl Iterator for Neighbours<'_> {
    type Item = Permutation;

    fn next(&mut self) -> Option<Permutation> {
        if self.next >= self.len {
            return None;
        }
        let p = self.neighbourhood.neighbour(self.origin, self.next);
        self.next += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Neighbours<'_> {}
