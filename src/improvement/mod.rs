//! Improvement strategies.
//!
//! An [`Improvement`] decides, from the current permutation and a
//! neighbourhood, which permutation the search moves to next. This module
//! holds the deterministic pivoting rules; the adaptive tabu strategy lives
//! in [`crate::tabu`].

mod pivoting;
mod types;

pub use pivoting::{BestImprovement, FirstImprovement};
pub use types::Improvement;
