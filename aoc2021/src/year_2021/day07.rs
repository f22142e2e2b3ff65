use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::numbers;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 7, title = "The Treachery of Whales", tags = ["2021"])]
pub struct Day07;

fn fuel_to(crabs: &[i64], target: i64, cost: impl Fn(i64) -> i64) -> i64 {
    crabs.iter().map(|&c| cost((c - target).abs())).sum()
}

impl AocParser for Day07 {
    /// Crab positions, sorted
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut crabs = numbers::<i64>(input.trim(), ',')?;
        if crabs.is_empty() {
            return Err(ParseError::MissingData("no crabs".into()));
        }
        crabs.sort_unstable();
        Ok(crabs)
    }
}

impl PartSolver<1> for Day07 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // the median minimises the sum of absolute distances
        let median = shared[shared.len() / 2];
        Ok(fuel_to(shared, median, |d| d).to_string())
    }
}

impl PartSolver<2> for Day07 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (lo, hi) = (shared[0], shared[shared.len() - 1]);
        (lo..=hi)
            .map(|target| fuel_to(shared, target, |d| d * (d + 1) / 2))
            .min()
            .map(|fuel| fuel.to_string())
            .ok_or_else(|| SolveError::failed("no crabs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2021::solve_all;

    #[test]
    fn test_example() {
        assert_eq!(
            solve_all::<Day07>("16,1,2,0,4,2,7,1,2,14\n"),
            vec!["37", "168"]
        );
    }

    #[test]
    fn test_single_crab_needs_no_fuel() {
        assert_eq!(solve_all::<Day07>("42"), vec!["0", "0"]);
    }
}
