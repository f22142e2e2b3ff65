use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::with_line;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 2, title = "Dive!", tags = ["2021"])]
pub struct Day02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Forward(i64),
    Down(i64),
    Up(i64),
}

fn parse_command(line: &str) -> anyhow::Result<Command> {
    let (word, amount) = line
        .split_once(' ')
        .ok_or_else(|| anyhow!("expected `<direction> <amount>`"))?;
    let amount: i64 = amount
        .trim()
        .parse()
        .with_context(|| format!("bad amount {:?}", amount))?;
    match word {
        "forward" => Ok(Command::Forward(amount)),
        "down" => Ok(Command::Down(amount)),
        "up" => Ok(Command::Up(amount)),
        other => Err(anyhow!("unknown direction {:?}", other)),
    }
}

impl AocParser for Day02 {
    type SharedData<'a> = Vec<Command>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| with_line(idx, parse_command(line.trim())))
            .collect()
    }
}

impl PartSolver<1> for Day02 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (horizontal, depth) =
            shared
                .iter()
                .fold((0i64, 0i64), |(h, d), command| match *command {
                    Command::Forward(n) => (h + n, d),
                    Command::Down(n) => (h, d + n),
                    Command::Up(n) => (h, d - n),
                });
        Ok((horizontal * depth).to_string())
    }
}

impl PartSolver<2> for Day02 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (horizontal, depth, _) =
            shared
                .iter()
                .fold((0i64, 0i64, 0i64), |(h, d, aim), command| match *command {
                    Command::Forward(n) => (h + n, d + aim * n, aim),
                    Command::Down(n) => (h, d, aim + n),
                    Command::Up(n) => (h, d, aim - n),
                });
        Ok((horizontal * depth).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2021::solve_all;

    const EXAMPLE: &str = "forward 5\ndown 5\nforward 8\nup 3\ndown 8\nforward 2\n";

    #[test]
    fn test_example() {
        assert_eq!(solve_all::<Day02>(EXAMPLE), vec!["150", "900"]);
    }

    #[test]
    fn test_unknown_direction() {
        assert!(Day02::parse("sideways 3").is_err());
        assert!(Day02::parse("forward x").is_err());
    }
}
