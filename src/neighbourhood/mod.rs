//! Neighbourhoods over permutations.
//!
//! A [`Neighbourhood`] enumerates the permutations reachable from a given
//! one by a single move. [`MoveNeighbourhood`] provides the three classic
//! moves (see [`MoveKind`]); problem-specific neighbourhoods implement the
//! trait directly.

mod moves;
mod types;

pub use moves::{MoveKind, MoveNeighbourhood};
pub use types::{Neighbourhood, Neighbours};
