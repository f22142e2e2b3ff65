//! Advent of Code Solver Library
//!
//! A small framework for turning puzzle inputs into answers. Every puzzle is a
//! type that knows how to parse its input once and how to solve each of its
//! parts against the parsed data.
//!
//! # Overview
//!
//! - [`AocParser`] turns the raw input into shared data
//! - [`PartSolver<N>`] solves part `N` against that shared data
//! - [`Solver`] ties the parts together and declares how many there are
//! - [`DynSolver`] erases the concrete type so a registry can hold any puzzle
//! - [`SolverRegistry`] maps `(year, day)` to a factory that builds a [`DynSolver`]
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverRegistryBuilder};
//!
//! struct Depths;
//!
//! impl AocParser for Depths {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl Solver for Depths {
//!     const PARTS: u8 = 1;
//!
//!     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
//!         match part {
//!             1 => Ok(shared.windows(2).filter(|w| w[1] > w[0]).count().to_string()),
//!             _ => Err(SolveError::PartNotImplemented(part)),
//!         }
//!     }
//! }
//!
//! let mut builder = SolverRegistryBuilder::new();
//! aoc_solver::register_solver!(builder, Depths, 2021, 1);
//! let registry = builder.build();
//!
//! let mut solver = registry.create_solver(2021, 1, "1\n3\n2\n5").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "2");
//! ```
//!
//! # Part Dependencies
//!
//! Shared data is handed to each part mutably. A part may stash intermediate
//! results in it so a later part can reuse them; every part must still be able
//! to run on freshly parsed data.
//!
//! # Plugin Registration
//!
//! ```ignore
//! #[derive(AocSolver, AutoRegisterSolver)]
//! #[aoc_solver(max_parts = 2)]
//! #[aoc(year = 2021, day = 1, title = "Sonar Sweep", tags = ["2021"])]
//! pub struct Day01;
//! ```
//!
//! Any crate linked into the final binary contributes its plugins to
//! [`SolverRegistryBuilder::register_all_plugins`].

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder, BASE_YEAR, DAYS_PER_YEAR, MAX_YEARS,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Used by the derive macros
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
