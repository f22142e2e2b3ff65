use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::invalid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 10, title = "Syntax Scoring", tags = ["2021"])]
pub struct Day10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checked {
    /// First closer that did not match the open chunk
    Corrupted(u8),
    /// Closers needed to finish the line, innermost first
    Incomplete(Vec<u8>),
    Complete,
}

fn closer(opener: u8) -> Option<u8> {
    match opener {
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        b'{' => Some(b'}'),
        b'<' => Some(b'>'),
        _ => None,
    }
}

fn check(line: &str) -> Checked {
    let mut expected = Vec::new();
    for b in line.bytes() {
        match closer(b) {
            Some(close) => expected.push(close),
            None if expected.last() == Some(&b) => {
                expected.pop();
            }
            None => return Checked::Corrupted(b),
        }
    }
    if expected.is_empty() {
        Checked::Complete
    } else {
        expected.reverse();
        Checked::Incomplete(expected)
    }
}

fn corruption_score(b: u8) -> u64 {
    match b {
        b')' => 3,
        b']' => 57,
        b'}' => 1197,
        _ => 25137,
    }
}

fn completion_score(closers: &[u8]) -> u64 {
    closers.iter().fold(0, |score, b| {
        let value = match b {
            b')' => 1,
            b']' => 2,
            b'}' => 3,
            _ => 4,
        };
        score * 5 + value
    })
}

impl AocParser for Day10 {
    type SharedData<'a> = Vec<Checked>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(idx, line)| {
                match line.bytes().find(|b| !b"()[]{}<>".contains(b)) {
                    Some(b) => Err(invalid(format!(
                        "(line {}) unexpected {:?}",
                        idx + 1,
                        b as char
                    ))),
                    None => Ok(check(line)),
                }
            })
            .collect()
    }
}

impl PartSolver<1> for Day10 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let score: u64 = shared
            .iter()
            .filter_map(|c| match c {
                Checked::Corrupted(b) => Some(corruption_score(*b)),
                _ => None,
            })
            .sum();
        Ok(score.to_string())
    }
}

impl PartSolver<2> for Day10 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut scores: Vec<u64> = shared
            .iter()
            .filter_map(|c| match c {
                Checked::Incomplete(closers) => Some(completion_score(closers)),
                _ => None,
            })
            .collect();
        if scores.is_empty() {
            return Err(SolveError::failed("no incomplete lines"));
        }
        scores.sort_unstable();
        Ok(scores[scores.len() / 2].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2021::solve_all;

    const EXAMPLE: &str = "\
[({(<(())[]>[[{[]{<()<>>
[(()[<>])]({[<{<<[]>>(
{([(<{}[<>[]}>{[]{[(<()>
(((({<>}<{<{<>}{[]{[]{}
[[<[([]))<([[{}[[()]]]
[{[{({}]{}}([{[{{{}}([]
{<[[]]>}<{[{[{[]{()[[[]
[<(<(<(<{}))><([]([]()
<{([([[(<>()){}]>(<<{{
<{([{{}}[<[[[<>{}]]]>[]]
";

    #[test]
    fn test_example() {
        assert_eq!(solve_all::<Day10>(EXAMPLE), vec!["26397", "288957"]);
    }

    #[test]
    fn test_check_line() {
        assert_eq!(check("{([(<{}[<>[]}>{[]{[(<()>"), Checked::Corrupted(b'}'));
        assert_eq!(check("<{([{{}}[<[[[<>{}]]]>[]]"), Checked::Incomplete(b"])}>".to_vec()));
        assert_eq!(check("([])"), Checked::Complete);
        assert_eq!(completion_score(b"])}>"), 294);
    }

    #[test]
    fn test_no_incomplete_lines_fails() {
        let mut shared = Day10::parse("()\n(]").unwrap();
        assert!(matches!(
            <Day10 as PartSolver<2>>::solve(&mut shared),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_rejects_stray_characters() {
        assert!(Day10::parse("(a)").is_err());
    }
}
