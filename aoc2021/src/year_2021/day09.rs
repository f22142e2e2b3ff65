use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::grid::Grid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 9, title = "Smoke Basin", tags = ["2021", "grid"])]
pub struct Day09;

const RIDGE: u8 = 9;

fn low_points(map: &Grid<u8>) -> impl Iterator<Item = (usize, usize)> + '_ {
    map.positions().filter(|&(x, y)| {
        let height = map[(x, y)];
        map.neighbors4(x, y).all(|n| map[n] > height)
    })
}

/// Cells reachable from `start` without crossing a height-9 ridge
fn basin_size(map: &Grid<u8>, start: (usize, usize)) -> usize {
    let mut seen = Grid::new(map.width, map.height, false);
    let mut stack = vec![start];
    seen[start] = true;
    let mut size = 0;
    while let Some((x, y)) = stack.pop() {
        size += 1;
        for next in map.neighbors4(x, y) {
            if !seen[next] && map[next] != RIDGE {
                seen[next] = true;
                stack.push(next);
            }
        }
    }
    size
}

impl AocParser for Day09 {
    type SharedData<'a> = Grid<u8>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Grid::parse_digits(input)
    }
}

impl PartSolver<1> for Day09 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let risk: u32 = low_points(shared)
            .map(|p| u32::from(shared[p]) + 1)
            .sum();
        Ok(risk.to_string())
    }
}

impl PartSolver<2> for Day09 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let largest = low_points(shared)
            .map(|p| basin_size(shared, p))
            .sorted_unstable_by(|a, b| b.cmp(a))
            .take(3)
            .collect_vec();
        if largest.len() < 3 {
            return Err(SolveError::failed(format!(
                "only {} basins found",
                largest.len()
            )));
        }
        Ok(largest.iter().product::<usize>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2021::solve_all;

    const EXAMPLE: &str = "\
2199943210
3987894921
9856789892
8767896789
9899965678
";

    #[test]
    fn test_example() {
        assert_eq!(solve_all::<Day09>(EXAMPLE), vec!["15", "1134"]);
    }

    #[test]
    fn test_basin_sizes() {
        let map = Day09::parse(EXAMPLE).unwrap();
        let mut sizes: Vec<_> = low_points(&map).map(|p| basin_size(&map, p)).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![3, 9, 9, 14]);
    }
}
