//! Memoised evaluation of values laid out as a dependency DAG
//!
//! A [`DpProblem`] says which indices an index depends on and how to combine
//! their values; a [`DpCache`] resolves those dependencies recursively and
//! computes every index at most once, storing results in a [`Backend`].
//!
//! # Backends
//!
//! - [`VecBackend`]: dense `usize` indices, grows on demand
//! - [`HashMapBackend`]: any `Hash + Eq` index, for sparse or composite keys
//!
//! # Warning: Cycle Behavior
//!
//! **The cache does NOT detect cycles.** A cyclic dependency graph recurses
//! until the stack overflows. Callers must make sure dependencies form a DAG.
//!
//! # Example
//!
//! ```rust
//! use aoc2021::utils::dp_cache::{DpCache, DpProblem, VecBackend};
//!
//! struct Fibonacci;
//!
//! impl DpProblem<usize, u64> for Fibonacci {
//!     fn deps(&self, n: &usize) -> Vec<usize> {
//!         if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
//!     }
//!     fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
//!         if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
//!     }
//! }
//!
//! let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);
//! assert_eq!(cache.get(&10), 55);
//! ```
//!
//! # Example: closures and a composite key
//!
//! ```rust
//! use aoc2021::utils::dp_cache::{DpCache, HashMapBackend};
//!
//! // lattice paths to (r, c) moving only down or right
//! let paths = DpCache::new(
//!     HashMapBackend::new(),
//!     |&(r, c): &(u32, u32)| match (r, c) {
//!         (0, _) | (_, 0) => vec![],
//!         _ => vec![(r - 1, c), (r, c - 1)],
//!     },
//!     |_: &(u32, u32), deps: Vec<u64>| if deps.is_empty() { 1 } else { deps.iter().sum() },
//! );
//!
//! assert_eq!(paths.get(&(4, 4)), 70);
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend, VecBackend};
pub use cache::DpCache;
pub use problem::{ClosureProblem, DpProblem};

#[cfg(test)]
mod tests;
