use std::cmp::Reverse;
use std::collections::BinaryHeap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 15, title = "Chiton", tags = ["2021", "grid", "search"])]
pub struct Day15;

/// Risk map, optionally tiled `tiles` × `tiles` times with risk growing by
/// one per tile step and wrapping from 9 back to 1
struct Cave<'g> {
    base: &'g Grid<u8>,
    tiles: usize,
}

impl Cave<'_> {
    fn width(&self) -> usize {
        self.base.width * self.tiles
    }

    fn height(&self) -> usize {
        self.base.height * self.tiles
    }

    fn risk(&self, (x, y): (usize, usize)) -> u32 {
        let (w, h) = (self.base.width, self.base.height);
        let base = u32::from(self.base[(x % w, y % h)]);
        let bump = (x / w + y / h) as u32;
        (base + bump - 1) % 9 + 1
    }

    /// Dijkstra from the top-left to the bottom-right corner
    fn lowest_total_risk(&self) -> Option<u32> {
        let (width, height) = (self.width(), self.height());
        let goal = (width - 1, height - 1);
        let index = |(x, y): (usize, usize)| y * width + x;

        let mut best = vec![u32::MAX; width * height];
        let mut queue = BinaryHeap::new();
        best[0] = 0;
        queue.push(Reverse((0u32, (0usize, 0usize))));

        let shape = Grid::new(width, height, ());
        while let Some(Reverse((risk, pos))) = queue.pop() {
            if pos == goal {
                return Some(risk);
            }
            if risk > best[index(pos)] {
                continue;
            }
            for next in shape.neighbors4(pos.0, pos.1) {
                let candidate = risk + self.risk(next);
                if candidate < best[index(next)] {
                    best[index(next)] = candidate;
                    queue.push(Reverse((candidate, next)));
                }
            }
        }
        None
    }
}

impl AocParser for Day15 {
    type SharedData<'a> = Grid<u8>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let grid = Grid::parse_digits(input)?;
        if grid.cells.contains(&0) {
            return Err(ParseError::InvalidFormat("risk levels must be 1-9".into()));
        }
        Ok(grid)
    }
}

fn solve_tiled(base: &Grid<u8>, tiles: usize) -> Result<String, SolveError> {
    Cave { base, tiles }
        .lowest_total_risk()
        .map(|risk| risk.to_string())
        .ok_or_else(|| SolveError::failed("bottom-right corner is unreachable"))
}

impl PartSolver<1> for Day15 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_tiled(shared, 1)
    }
}

impl PartSolver<2> for Day15 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_tiled(shared, 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2021::solve_all;

    const EXAMPLE: &str = "\
1163751742
1381373672
2136511328
3694931569
7463417111
1319128137
1359912421
3125421639
1293138521
2311944581
";

    #[test]
    fn test_example() {
        assert_eq!(solve_all::<Day15>(EXAMPLE), vec!["40", "315"]);
    }

    #[test]
    fn test_tiled_risk_wraps() {
        let base = Grid::parse_digits("8").unwrap();
        let cave = Cave { base: &base, tiles: 5 };
        let row: Vec<u32> = (0..5).map(|x| cave.risk((x, 0))).collect();
        assert_eq!(row, vec![8, 9, 1, 2, 3]);
        assert_eq!(cave.risk((4, 4)), 7);
    }

    #[test]
    fn test_single_cell() {
        assert_eq!(solve_all::<Day15>("7"), vec!["0", "38"]);
    }
}
