use anyhow::{Context, anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::with_line;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 22, title = "Reactor Reboot", tags = ["2021", "geometry"])]
pub struct Day22;

/// Axis-aligned box of cubes, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cuboid {
    min: [i64; 3],
    max: [i64; 3],
}

impl Cuboid {
    /// `None` when the cube count does not fit an `i64`
    fn volume(&self) -> Option<i64> {
        (0..3).try_fold(1i64, |volume, a| {
            let extent = self.max[a].checked_sub(self.min[a])?.checked_add(1)?;
            volume.checked_mul(extent)
        })
    }

    fn intersect(&self, other: &Cuboid) -> Option<Cuboid> {
        let mut overlap = *self;
        for a in 0..3 {
            overlap.min[a] = self.min[a].max(other.min[a]);
            overlap.max[a] = self.max[a].min(other.max[a]);
            if overlap.min[a] > overlap.max[a] {
                return None;
            }
        }
        Some(overlap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    on: bool,
    cuboid: Cuboid,
}

/// Cubes left on after every step, restricted to `region` when given.
///
/// Keeps a list of signed cuboids whose volumes sum to the lit count. Each
/// step cancels its overlap with every listed cuboid by adding that overlap
/// with the opposite sign, then adds itself if it turns cubes on.
fn cubes_on(steps: &[Step], region: Option<&Cuboid>) -> Result<i64, SolveError> {
    let mut signed: Vec<(Cuboid, i64)> = Vec::new();
    for step in steps {
        let cuboid = match region {
            Some(region) => match step.cuboid.intersect(region) {
                Some(clipped) => clipped,
                None => continue,
            },
            None => step.cuboid,
        };
        let overlaps: Vec<_> = signed
            .iter()
            .filter_map(|(existing, sign)| Some((existing.intersect(&cuboid)?, -sign)))
            .collect();
        signed.extend(overlaps);
        if step.on {
            signed.push((cuboid, 1));
        }
    }
    signed
        .iter()
        .try_fold(0i64, |total, (c, sign)| {
            total.checked_add(c.volume()?.checked_mul(*sign)?)
        })
        .ok_or_else(|| SolveError::failed("cube count overflows 64 bits"))
}

fn parse_axis(text: &str, axis: char) -> anyhow::Result<(i64, i64)> {
    let bounds = text
        .strip_prefix(axis)
        .and_then(|rest| rest.strip_prefix('='))
        .ok_or_else(|| anyhow!("expected `{}=a..b`, found {:?}", axis, text))?;
    let (lo, hi) = bounds
        .split_once("..")
        .ok_or_else(|| anyhow!("expected `a..b`, found {:?}", bounds))?;
    let lo: i64 = lo.parse().with_context(|| format!("bad bound {:?}", lo))?;
    let hi: i64 = hi.parse().with_context(|| format!("bad bound {:?}", hi))?;
    ensure!(lo <= hi, "empty range {}..{}", lo, hi);
    Ok((lo, hi))
}

fn parse_step(line: &str) -> anyhow::Result<Step> {
    let (state, ranges) = line
        .split_once(' ')
        .ok_or_else(|| anyhow!("expected `on|off x=..,y=..,z=..`"))?;
    let on = match state {
        "on" => true,
        "off" => false,
        other => return Err(anyhow!("unknown state {:?}", other)),
    };
    let mut cuboid = Cuboid {
        min: [0; 3],
        max: [0; 3],
    };
    let mut parts = ranges.split(',');
    for (a, axis) in ['x', 'y', 'z'].into_iter().enumerate() {
        let part = parts
            .next()
            .ok_or_else(|| anyhow!("missing {} range", axis))?;
        (cuboid.min[a], cuboid.max[a]) = parse_axis(part.trim(), axis)?;
    }
    ensure!(parts.next().is_none(), "more than three ranges");
    Ok(Step { on, cuboid })
}

impl AocParser for Day22 {
    type SharedData<'a> = Vec<Step>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(idx, line)| with_line(idx, parse_step(line)))
            .collect()
    }
}

impl PartSolver<1> for Day22 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let initialization = Cuboid {
            min: [-50; 3],
            max: [50; 3],
        };
        Ok(cubes_on(shared, Some(&initialization))?.to_string())
    }
}

impl PartSolver<2> for Day22 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(cubes_on(shared, None)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2021::solve_all;
    use proptest::prelude::*;

    const SMALL: &str = "\
on x=10..12,y=10..12,z=10..12
on x=11..13,y=11..13,z=11..13
off x=9..11,y=9..11,z=9..11
on x=10..10,y=10..10,z=10..10
";

    #[test]
    fn test_small_example() {
        assert_eq!(solve_all::<Day22>(SMALL), vec!["39", "39"]);
    }

    #[test]
    fn test_region_clipping() {
        let steps = Day22::parse("on x=-60..60,y=0..0,z=0..0\non x=100..200,y=0..0,z=0..0").unwrap();
        let region = Cuboid {
            min: [-50; 3],
            max: [50; 3],
        };
        assert_eq!(cubes_on(&steps, Some(&region)).unwrap(), 101);
        assert_eq!(cubes_on(&steps, None).unwrap(), 121 + 101);
    }

    #[test]
    fn test_huge_bounds_fail_instead_of_overflowing() {
        let mut steps = Day22::parse(&format!(
            "on x={}..{},y=0..0,z=0..0",
            i64::MIN,
            i64::MAX
        ))
        .unwrap();
        assert!(matches!(
            <Day22 as PartSolver<2>>::solve(&mut steps),
            Err(SolveError::SolveFailed(_))
        ));
        // clipped to the initialization region the same step is fine
        assert_eq!(<Day22 as PartSolver<1>>::solve(&mut steps).unwrap(), "101");
    }

    #[test]
    fn test_rejects_malformed_steps() {
        assert!(Day22::parse("toggle x=1..2,y=1..2,z=1..2").is_err());
        assert!(Day22::parse("on x=1..2,y=1..2").is_err());
        assert!(Day22::parse("on x=3..2,y=1..2,z=1..2").is_err());
    }

    fn small_cuboid() -> impl Strategy<Value = Step> {
        (any::<bool>(), prop::array::uniform3(0i64..6), prop::array::uniform3(0i64..4)).prop_map(
            |(on, min, extent)| Step {
                on,
                cuboid: Cuboid {
                    min,
                    max: [min[0] + extent[0], min[1] + extent[1], min[2] + extent[2]],
                },
            },
        )
    }

    proptest! {
        #[test]
        fn prop_matches_brute_force(steps in prop::collection::vec(small_cuboid(), 1..8)) {
            let mut lit = std::collections::HashSet::new();
            for step in &steps {
                let c = step.cuboid;
                for x in c.min[0]..=c.max[0] {
                    for y in c.min[1]..=c.max[1] {
                        for z in c.min[2]..=c.max[2] {
                            if step.on {
                                lit.insert((x, y, z));
                            } else {
                                lit.remove(&(x, y, z));
                            }
                        }
                    }
                }
            }
            prop_assert_eq!(cubes_on(&steps, None).unwrap(), lit.len() as i64);
        }
    }
}
