use std::ops::RangeInclusive;

use anyhow::{Context, anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::invalid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 17, title = "Trick Shot", tags = ["2021", "simulation"])]
pub struct Day17;

/// Target area, which must lie right of and below the launcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    x: RangeInclusive<i64>,
    y: RangeInclusive<i64>,
}

impl Target {
    fn hit_by(&self, mut vx: i64, mut vy: i64) -> bool {
        let (mut x, mut y) = (0, 0);
        while x <= *self.x.end() && y >= *self.y.start() {
            if self.x.contains(&x) && self.y.contains(&y) {
                return true;
            }
            x += vx;
            y += vy;
            vx -= vx.signum();
            vy -= 1;
        }
        false
    }
}

fn parse_range(text: &str, axis: &str) -> anyhow::Result<RangeInclusive<i64>> {
    let bounds = text
        .trim()
        .strip_prefix(axis)
        .and_then(|rest| rest.strip_prefix('='))
        .ok_or_else(|| anyhow!("expected `{}=a..b`, found {:?}", axis, text))?;
    let (lo, hi) = bounds
        .split_once("..")
        .ok_or_else(|| anyhow!("expected `a..b`, found {:?}", bounds))?;
    let lo: i64 = lo.parse().with_context(|| format!("bad bound {:?}", lo))?;
    let hi: i64 = hi.parse().with_context(|| format!("bad bound {:?}", hi))?;
    ensure!(lo <= hi, "empty range {}..{}", lo, hi);
    Ok(lo..=hi)
}

fn parse_target(input: &str) -> anyhow::Result<Target> {
    let rest = input
        .trim()
        .strip_prefix("target area:")
        .ok_or_else(|| anyhow!("expected `target area: x=..., y=...`"))?;
    let (x, y) = rest
        .split_once(',')
        .ok_or_else(|| anyhow!("missing `,` between ranges"))?;
    let target = Target {
        x: parse_range(x, "x")?,
        y: parse_range(y, "y")?,
    };
    ensure!(*target.x.start() > 0, "target must be right of the launcher");
    ensure!(*target.y.end() < 0, "target must be below the launcher");
    Ok(target)
}

impl AocParser for Day17 {
    type SharedData<'a> = Target;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_target(input).map_err(|e| invalid(e.to_string()))
    }
}

impl PartSolver<1> for Day17 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // a probe launched upwards at vy passes y = 0 again moving at -(vy + 1),
        // so the fastest that still lands in the target is -y_min - 1
        let vy = -shared.y.start() - 1;
        Ok((vy * (vy + 1) / 2).to_string())
    }
}

impl PartSolver<2> for Day17 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let y_min = *shared.y.start();
        let hits = (1..=*shared.x.end())
            .flat_map(|vx| (y_min..=-y_min).map(move |vy| (vx, vy)))
            .filter(|&(vx, vy)| shared.hit_by(vx, vy))
            .count();
        Ok(hits.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2021::solve_all;

    const EXAMPLE: &str = "target area: x=20..30, y=-10..-5\n";

    #[test]
    fn test_example() {
        assert_eq!(solve_all::<Day17>(EXAMPLE), vec!["45", "112"]);
    }

    #[test]
    fn test_hits() {
        let target = Day17::parse(EXAMPLE).unwrap();
        assert!(target.hit_by(7, 2));
        assert!(target.hit_by(6, 3));
        assert!(target.hit_by(9, 0));
        assert!(!target.hit_by(17, -4));
    }

    #[test]
    fn test_rejects_target_above() {
        assert!(Day17::parse("target area: x=20..30, y=5..10").is_err());
    }
}
