//! Search drivers.
//!
//! Two drivers feed an [`Improvement`](crate::improvement::Improvement) its
//! own output back in a loop:
//!
//! - [`SearchRunner`]: one neighbourhood, bounded by iteration, stagnation
//!   and time budgets. The natural driver for tabu search.
//! - [`VndRunner`]: Variable Neighbourhood Descent over an ordered list of
//!   neighbourhoods, ending at a common local optimum.

mod config;
mod runner;
mod vnd;

pub use config::{SearchConfig, VndConfig};
pub use runner::{SearchResult, SearchRunner, StopReason};
pub use vnd::{VndResult, VndRunner};
