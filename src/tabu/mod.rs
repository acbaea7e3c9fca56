//! Tabu Search (TS) with adaptive tenure and escape.
//!
//! A memory-guided improvement strategy. Recently visited permutations are
//! kept in a tabu queue whose length (the tenure) reacts to the search:
//! permutations that keep coming back lengthen it, long quiet periods
//! shorten it. When too many visits recur, a random walk moves the search
//! out of the current basin of attraction.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Battiti, R. & Tecchiolli, G. (1994). "The Reactive Tabu Search",
//!   *ORSA Journal on Computing* 6(2), 126-140.

mod config;
mod improvement;
mod memory;

pub use config::{TabuConfig, VisitIdentity};
pub use improvement::TabuImprovement;
pub use memory::{TabuQueue, TT_DEC, TT_INC};
