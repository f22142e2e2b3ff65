use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::with_line;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 1, title = "Sonar Sweep", tags = ["2021"])]
pub struct Day01;

impl AocParser for Day01 {
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| with_line(idx, line.trim().parse::<u32>()))
            .collect()
    }
}

/// Readings deeper than the one `gap` places before them
fn count_increases(depths: &[u32], gap: usize) -> usize {
    depths
        .iter()
        .zip(depths.iter().skip(gap))
        .filter(|(before, after)| after > before)
        .count()
}

impl PartSolver<1> for Day01 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_increases(shared, 1).to_string())
    }
}

impl PartSolver<2> for Day01 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // consecutive 3-wide windows share two readings
        Ok(count_increases(shared, 3).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2021::solve_all;

    const EXAMPLE: &str = "199\n200\n208\n210\n200\n207\n240\n269\n260\n263\n";

    #[test]
    fn test_example() {
        assert_eq!(solve_all::<Day01>(EXAMPLE), vec!["7", "5"]);
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        assert!(matches!(
            Day01::parse("1\n2\nthree\n"),
            Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(line 3)")
        ));
    }
}
