//! Permutation-encoded solutions.
//!
//! A [`Permutation`] is an ordering of `0..n` with a cached score computed by
//! an [`Instance`]. All search strategies in this crate minimize that score.

mod types;

pub use types::{Instance, Permutation};
