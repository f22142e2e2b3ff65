use std::collections::BTreeSet;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse::with_line;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 13, title = "Transparent Origami", tags = ["2021"])]
pub struct Day13;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fold {
    Left(u32),
    Up(u32),
}

impl Fold {
    /// Where `dot` lands, or `None` if it would land past the paper's edge
    fn apply(self, (x, y): (u32, u32)) -> Option<(u32, u32)> {
        let reflect = |v: u32, line: u32| {
            if v > line {
                (2 * line).checked_sub(v)
            } else {
                Some(v)
            }
        };
        match self {
            Fold::Left(line) => Some((reflect(x, line)?, y)),
            Fold::Up(line) => Some((x, reflect(y, line)?)),
        }
    }
}

#[derive(Debug)]
pub struct Manual {
    dots: BTreeSet<(u32, u32)>,
    folds: Vec<Fold>,
}

fn fold_all(dots: &BTreeSet<(u32, u32)>, folds: &[Fold]) -> Result<BTreeSet<(u32, u32)>, SolveError> {
    dots.iter()
        .map(|&dot| {
            folds
                .iter()
                .try_fold(dot, |dot, fold| fold.apply(dot))
                .ok_or_else(|| SolveError::failed(format!("dot {:?} folds off the paper", dot)))
        })
        .collect()
}

/// Draw the dots as rows of `#` and `.`
fn render(dots: &BTreeSet<(u32, u32)>) -> String {
    let width = dots.iter().map(|&(x, _)| x).max().map_or(0, |x| x + 1);
    let height = dots.iter().map(|&(_, y)| y).max().map_or(0, |y| y + 1);
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| if dots.contains(&(x, y)) { '#' } else { '.' })
                .collect::<String>()
        })
        .join("\n")
}

fn parse_dot(line: &str) -> anyhow::Result<(u32, u32)> {
    let (x, y) = line
        .split_once(',')
        .ok_or_else(|| anyhow!("expected `x,y`, found {:?}", line))?;
    Ok((
        x.parse().with_context(|| format!("bad x {:?}", x))?,
        y.parse().with_context(|| format!("bad y {:?}", y))?,
    ))
}

fn parse_fold(line: &str) -> anyhow::Result<Fold> {
    let rest = line
        .strip_prefix("fold along ")
        .ok_or_else(|| anyhow!("expected `fold along`, found {:?}", line))?;
    let (axis, at) = rest
        .split_once('=')
        .ok_or_else(|| anyhow!("missing `=` in {:?}", rest))?;
    let at = at.parse().with_context(|| format!("bad fold line {:?}", at))?;
    match axis {
        "x" => Ok(Fold::Left(at)),
        "y" => Ok(Fold::Up(at)),
        other => Err(anyhow!("unknown axis {:?}", other)),
    }
}

impl AocParser for Day13 {
    type SharedData<'a> = Manual;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut dots = BTreeSet::new();
        let mut folds = Vec::new();
        for (idx, line) in input.lines().map(str::trim).enumerate() {
            if line.is_empty() {
                continue;
            }
            if line.starts_with("fold") {
                folds.push(with_line(idx, parse_fold(line))?);
            } else {
                dots.insert(with_line(idx, parse_dot(line))?);
            }
        }
        if folds.is_empty() {
            return Err(ParseError::MissingData("no fold instructions".into()));
        }
        Ok(Manual { dots, folds })
    }
}

impl PartSolver<1> for Day13 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(fold_all(&shared.dots, &shared.folds[..1])?.len().to_string())
    }
}

impl PartSolver<2> for Day13 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(render(&fold_all(&shared.dots, &shared.folds)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2021::solve_all;

    const EXAMPLE: &str = "\
6,10
0,14
9,10
0,3
10,4
4,11
6,0
6,12
4,1
0,13
10,12
3,4
3,0
8,4
1,10
2,14
8,10
9,0

fold along y=7
fold along x=5
";

    #[test]
    fn test_example() {
        assert_eq!(
            solve_all::<Day13>(EXAMPLE),
            vec!["17", "#####\n#...#\n#...#\n#...#\n#####"]
        );
    }

    #[test]
    fn test_fold_past_edge_fails() {
        let mut manual = Day13::parse("9,0\nfold along x=2").unwrap();
        assert!(<Day13 as PartSolver<1>>::solve(&mut manual).is_err());
    }

    #[test]
    fn test_bad_fold_axis() {
        assert!(Day13::parse("1,1\nfold along z=3").is_err());
    }
}
