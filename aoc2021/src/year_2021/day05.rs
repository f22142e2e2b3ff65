use std::collections::HashMap;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::with_line;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 5, title = "Hydrothermal Venture", tags = ["2021", "grid"])]
pub struct Day05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vent {
    from: (i32, i32),
    to: (i32, i32),
}

impl Vent {
    fn is_axis_aligned(&self) -> bool {
        self.from.0 == self.to.0 || self.from.1 == self.to.1
    }

    fn points(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let dx = (self.to.0 - self.from.0).signum();
        let dy = (self.to.1 - self.from.1).signum();
        let steps = (self.to.0 - self.from.0)
            .abs()
            .max((self.to.1 - self.from.1).abs());
        let (x, y) = self.from;
        (0..=steps).map(move |i| (x + i * dx, y + i * dy))
    }
}

fn parse_point(text: &str) -> anyhow::Result<(i32, i32)> {
    let (x, y) = text
        .trim()
        .split_once(',')
        .ok_or_else(|| anyhow!("expected `x,y`, found {:?}", text))?;
    Ok((
        x.parse().with_context(|| format!("bad x {:?}", x))?,
        y.parse().with_context(|| format!("bad y {:?}", y))?,
    ))
}

fn parse_vent(line: &str) -> anyhow::Result<Vent> {
    let (from, to) = line
        .split_once("->")
        .ok_or_else(|| anyhow!("expected `x1,y1 -> x2,y2`"))?;
    let vent = Vent {
        from: parse_point(from)?,
        to: parse_point(to)?,
    };
    let (dx, dy) = (vent.to.0 - vent.from.0, vent.to.1 - vent.from.1);
    if !vent.is_axis_aligned() && dx.abs() != dy.abs() {
        return Err(anyhow!("line is neither straight nor at 45 degrees"));
    }
    Ok(vent)
}

fn overlaps<'v>(vents: impl Iterator<Item = &'v Vent>) -> usize {
    let mut counts: HashMap<(i32, i32), u32> = HashMap::new();
    for point in vents.flat_map(Vent::points) {
        *counts.entry(point).or_default() += 1;
    }
    counts.values().filter(|&&n| n >= 2).count()
}

impl AocParser for Day05 {
    type SharedData<'a> = Vec<Vent>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| with_line(idx, parse_vent(line)))
            .collect()
    }
}

impl PartSolver<1> for Day05 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(overlaps(shared.iter().filter(|v| v.is_axis_aligned())).to_string())
    }
}

impl PartSolver<2> for Day05 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(overlaps(shared.iter()).to_string())
    }
}
