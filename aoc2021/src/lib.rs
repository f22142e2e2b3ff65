//! Advent of Code 2021 puzzle solutions with automatic registration
//!
//! Each day is a unit struct deriving `AocSolver` and `AutoRegisterSolver`,
//! so linking this crate is enough for
//! `SolverRegistryBuilder::register_all_plugins` to pick every puzzle up.
//!
//! ```
//! use aoc_solver::SolverRegistryBuilder;
//! use aoc2021 as _;
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register_solver_plugins(|plugin| plugin.year == 2021)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2021, 1, "1\n3\n2\n5\n").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "2");
//! ```

pub mod utils;

#[cfg(feature = "year-2021")]
pub mod year_2021;
