//! Classic permutation moves: transpose, exchange and insert.

use std::fmt;
use std::str::FromStr;

use super::types::Neighbourhood;
use crate::error::SearchError;
use crate::permutation::{Instance, Permutation};

/// Structural move applied to a permutation.
///
/// For a permutation of size `n`:
///
/// | Move        | Effect                                    | Neighbours   |
/// |-------------|-------------------------------------------|--------------|
/// | `Transpose` | swap positions `i` and `i + 1`            | `n - 1`      |
/// | `Exchange`  | swap positions `i < j`                    | `n(n - 1)/2` |
/// | `Insert`    | move the element at `i` to position `j`   | `n(n - 1)`   |
///
/// Insert moves between adjacent positions duplicate transpositions; they
/// are kept so the index space stays a plain `i × j` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MoveKind {
    /// Swap two adjacent elements.
    Transpose,
    /// Swap any two elements.
    Exchange,
    /// Remove one element and reinsert it elsewhere.
    Insert,
}

impl MoveKind {
    /// All moves, from the smallest neighbourhood to the largest.
    pub const ALL: [MoveKind; 3] = [MoveKind::Transpose, MoveKind::Exchange, MoveKind::Insert];

    /// Number of neighbours of a permutation of size `n`.
    pub fn move_count(self, n: usize) -> usize {
        if n < 2 {
            return 0;
        }
        match self {
            MoveKind::Transpose => n - 1,
            MoveKind::Exchange => n * (n - 1) / 2,
            MoveKind::Insert => n * (n - 1),
        }
    }

    /// Applies the `index`-th move of this kind to `order`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.move_count(order.len())`.
    pub fn apply(self, order: &[usize], index: usize) -> Vec<usize> {
        let n = order.len();
        assert!(
            index < self.move_count(n),
            "{self} move {index} out of range for size {n}"
        );
        let mut out = order.to_vec();
        match self {
            MoveKind::Transpose => out.swap(index, index + 1),
            MoveKind::Exchange => {
                let (i, j) = exchange_pair(n, index);
                out.swap(i, j);
            }
            MoveKind::Insert => {
                let i = index / (n - 1);
                let r = index % (n - 1);
                let j = if r >= i { r + 1 } else { r };
                let e = out.remove(i);
                out.insert(j, e);
            }
        }
        out
    }

    fn as_str(self) -> &'static str {
        match self {
            MoveKind::Transpose => "transpose",
            MoveKind::Exchange => "exchange",
            MoveKind::Insert => "insert",
        }
    }
}

/// Decodes the `index`-th pair `(i, j)`, `i < j`, in row-major order.
fn exchange_pair(n: usize, mut index: usize) -> (usize, usize) {
    let mut i = 0;
    let mut row = n - 1;
    while index >= row {
        index -= row;
        i += 1;
        row -= 1;
    }
    (i, i + 1 + index)
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoveKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transpose" => Ok(MoveKind::Transpose),
            "exchange" => Ok(MoveKind::Exchange),
            "insert" => Ok(MoveKind::Insert),
            _ => Err(SearchError::UnknownNeighbourhood(s.to_string())),
        }
    }
}

/// A [`MoveKind`] bound to the instance that scores its neighbours.
///
/// # Examples
///
/// ```
/// use u_localsearch::neighbourhood::{MoveKind, MoveNeighbourhood, Neighbourhood};
/// use u_localsearch::permutation::{Instance, Permutation};
///
/// struct Displacement(usize);
/// impl Instance for Displacement {
///     fn size(&self) -> usize { self.0 }
///     fn evaluate(&self, order: &[usize]) -> i64 {
///         order.iter().enumerate().filter(|&(i, &e)| i != e).count() as i64
///     }
///     fn seed(&self) -> u64 { self.0 as u64 }
/// }
///
/// let instance = Displacement(4);
/// let n = MoveNeighbourhood::new(MoveKind::Exchange, &instance);
/// let p = Permutation::identity(&instance);
/// assert_eq!(n.move_count(&p), 6);
/// assert_eq!(n.neighbour(&p, 0).order(), &[1, 0, 2, 3]);
/// ```
pub struct MoveNeighbourhood<'a, I: Instance + ?Sized> {
    kind: MoveKind,
    instance: &'a I,
}

impl<I: Instance + ?Sized> Clone for MoveNeighbourhood<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: Instance + ?Sized> Copy for MoveNeighbourhood<'_, I> {}

impl<'a, I: Instance + ?Sized> MoveNeighbourhood<'a, I> {
    /// Creates the neighbourhood of `kind` scored by `instance`.
    pub fn new(kind: MoveKind, instance: &'a I) -> Self {
        Self { kind, instance }
    }

    /// The move this neighbourhood applies.
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// One neighbourhood per move, in [`MoveKind::ALL`] order.
    pub fn all(instance: &'a I) -> Vec<Self> {
        MoveKind::ALL
            .iter()
            .map(|&kind| Self::new(kind, instance))
            .collect()
    }
}

impl<I: Instance + ?Sized> Neighbourhood for MoveNeighbourhood<'_, I> {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    fn move_count(&self, p: &Permutation) -> usize {
        self.kind.move_count(p.len())
    }

    fn neighbour(&self, p: &Permutation, index: usize) -> Permutation {
        Permutation::scored(self.kind.apply(p.order(), index), self.instance)
    }
}
