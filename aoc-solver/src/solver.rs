//! Core solver traits

use crate::error::{ParseError, SolveError};

/// Parses a puzzle input into the data shared by every part.
///
/// `SharedData` is a generic associated type so a solver can either own its
/// data (`Vec<T>`, a custom struct) or borrow straight from the input
/// (`&'a str`, `Vec<&'a [u8]>`) when no transformation is needed.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Crabs;
///
/// impl AocParser for Crabs {
///     type SharedData<'a> = Vec<i64>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .trim()
///             .split(',')
///             .map(|n| n.parse().map_err(|_| ParseError::InvalidFormat(n.to_string())))
///             .collect()
///     }
/// }
///
/// assert_eq!(Crabs::parse("16,1,2").unwrap(), vec![16, 1, 2]);
/// ```
pub trait AocParser {
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// Implementing one `PartSolver<N>` per part and deriving
/// [`AocSolver`](crate::AocSolver) gives a [`Solver`] impl whose dispatch is
/// checked at compile time: a missing part is a missing trait impl.
pub trait PartSolver<const N: u8>: AocParser {
    /// Solve this part against (possibly partially updated) shared data
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A complete puzzle solver.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Dive;
///
/// impl AocParser for Dive {
///     type SharedData<'a> = Vec<(&'a str, i64)>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|line| {
///                 let (dir, n) = line
///                     .split_once(' ')
///                     .ok_or_else(|| ParseError::InvalidFormat(line.to_string()))?;
///                 let n = n.parse().map_err(|_| ParseError::InvalidFormat(line.to_string()))?;
///                 Ok((dir, n))
///             })
///             .collect()
///     }
/// }
///
/// impl Solver for Dive {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         if part != 1 {
///             return Err(SolveError::PartNotImplemented(part));
///         }
///         let (mut x, mut depth) = (0, 0);
///         for (dir, n) in shared.iter() {
///             match *dir {
///                 "forward" => x += n,
///                 "down" => depth += n,
///                 _ => depth -= n,
///             }
///         }
///         Ok((x * depth).to_string())
///     }
/// }
///
/// let mut data = Dive::parse("forward 5\ndown 5").unwrap();
/// assert_eq!(Dive::solve_part(&mut data, 1).unwrap(), "25");
/// ```
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve `part` (1-based).
    ///
    /// Returns `SolveError::PartNotImplemented` for parts the solver does not
    /// know about.
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked entry point used by [`SolverInstance`](crate::SolverInstance).
pub trait SolverExt: Solver {
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
