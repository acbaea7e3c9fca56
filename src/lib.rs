//! Local search over permutation-encoded solutions.
//!
//! Provides the building blocks of a permutation local search and two ways
//! of driving them:
//!
//! - **Permutations**: scored orderings of `0..n` whose objective comes from
//!   a user-supplied [`Instance`](permutation::Instance).
//! - **Neighbourhoods**: transpose, exchange and insert moves, or any
//!   user-defined [`Neighbourhood`](neighbourhood::Neighbourhood).
//! - **Improvements**: first- and best-improvement pivoting rules, and an
//!   adaptive **Tabu Search** with reactive tenure, frequency-based escape
//!   and elite tracking.
//! - **Drivers**: an iterated search loop with iteration, stagnation and
//!   time budgets, and **Variable Neighbourhood Descent (VND)**.
//! - **Multi-start** (feature `parallel`): independent seeded tabu searches
//!   on rayon.
//!
//! # Conventions
//!
//! Scores are minimized. Every random draw comes from an engine seeded by
//! [`Instance::seed`](permutation::Instance::seed), so runs are reproducible
//! for a given instance and configuration.
//!
//! # Architecture
//!
//! This crate sits at Layer 2 (Algorithms) in the U-Engine ecosystem. It
//! contains no domain-specific concepts: scheduling, routing and the like
//! define their own instances at higher layers.

pub mod error;
pub mod improvement;
#[cfg(feature = "parallel")]
pub mod multistart;
pub mod neighbourhood;
pub mod permutation;
pub mod search;
pub mod tabu;
