use std::collections::HashMap;

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{invalid, with_line};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 12, title = "Passage Pathing", tags = ["2021", "graph"])]
pub struct Day12;

/// Cave system with caves numbered densely so visits fit in a `u64` mask
#[derive(Debug)]
pub struct Caves {
    links: Vec<Vec<usize>>,
    small: Vec<bool>,
    start: usize,
    end: usize,
}

impl Caves {
    fn count_paths(&self, from: usize, visited: u64, revisit_left: bool) -> u64 {
        if from == self.end {
            return 1;
        }
        let visited = if self.small[from] {
            visited | 1 << from
        } else {
            visited
        };
        self.links[from]
            .iter()
            .map(|&next| {
                if visited & 1 << next == 0 {
                    self.count_paths(next, visited, revisit_left)
                } else if revisit_left && next != self.start {
                    self.count_paths(next, visited, false)
                } else {
                    0
                }
            })
            .sum()
    }
}

fn is_big(name: &str) -> bool {
    !name.chars().all(|c| c.is_ascii_lowercase())
}

impl AocParser for Day12 {
    type SharedData<'a> = Caves;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut ids: HashMap<&str, usize> = HashMap::new();
        let mut links: Vec<Vec<usize>> = Vec::new();

        for (idx, line) in input.lines().map(str::trim).enumerate() {
            if line.is_empty() {
                continue;
            }
            let (a, b) = with_line(
                idx,
                line.split_once('-')
                    .ok_or_else(|| anyhow!("expected `cave-cave`, found {:?}", line)),
            )?;
            if is_big(a) && is_big(b) {
                // two linked big caves admit endless paths
                return Err(invalid(format!(
                    "(line {}) big caves {} and {} are linked",
                    idx + 1,
                    a,
                    b
                )));
            }
            let mut id = |name| -> usize {
                let next = ids.len();
                *ids.entry(name).or_insert_with(|| {
                    links.push(Vec::new());
                    next
                })
            };
            let (a, b) = (id(a), id(b));
            links[a].push(b);
            links[b].push(a);
        }

        if ids.len() > 64 {
            return Err(invalid(format!("{} caves do not fit a 64-bit mask", ids.len())));
        }
        let lookup = |name: &str| {
            ids.get(name)
                .copied()
                .ok_or_else(|| ParseError::MissingData(format!("no `{}` cave", name)))
        };
        let (start, end) = (lookup("start")?, lookup("end")?);

        let mut small = vec![false; ids.len()];
        for (name, &id) in &ids {
            small[id] = !is_big(name);
        }

        Ok(Caves {
            links,
            small,
            start,
            end,
        })
    }
}

impl PartSolver<1> for Day12 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.count_paths(shared.start, 0, false).to_string())
    }
}

impl PartSolver<2> for Day12 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.count_paths(shared.start, 0, true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2021::solve_all;

    const SMALL: &str = "start-A\nstart-b\nA-c\nA-b\nb-d\nA-end\nb-end\n";

    const LARGER: &str = "\
dc-end
HN-start
start-kj
dc-start
dc-HN
LN-dc
HN-end
kj-sa
kj-HN
kj-dc
";

    #[test]
    fn test_small_example() {
        assert_eq!(solve_all::<Day12>(SMALL), vec!["10", "36"]);
    }

    #[test]
    fn test_larger_example() {
        assert_eq!(solve_all::<Day12>(LARGER), vec!["19", "103"]);
    }

    #[test]
    fn test_rejects_linked_big_caves() {
        assert!(matches!(
            Day12::parse("start-A\nA-B\nB-end"),
            Err(ParseError::InvalidFormat(msg)) if msg.contains("line 2")
        ));
        assert!(Day12::parse("start-A\nA-A\nA-end").is_err());
    }

    #[test]
    fn test_missing_end() {
        assert!(matches!(
            Day12::parse("start-A\nA-b"),
            Err(ParseError::MissingData(_))
        ));
    }
}
