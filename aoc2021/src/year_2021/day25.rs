use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2021, day = 25, title = "Sea Cucumber", tags = ["2021", "grid", "simulation"])]
pub struct Day25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    East,
    South,
}

const MAX_STEPS: usize = 1_000_000;

/// Move every cucumber of `herd` that faces an empty cell; wraps at the edges
fn move_herd(floor: &mut Grid<Cell>, herd: Cell) -> bool {
    let (width, height) = (floor.width, floor.height);
    let ahead = |(x, y): (usize, usize)| match herd {
        Cell::East => ((x + 1) % width, y),
        _ => (x, (y + 1) % height),
    };
    let movers: Vec<_> = floor
        .positions()
        .filter(|&pos| floor[pos] == herd && floor[ahead(pos)] == Cell::Empty)
        .collect();
    for &pos in &movers {
        floor[pos] = Cell::Empty;
        floor[ahead(pos)] = herd;
    }
    !movers.is_empty()
}

impl AocParser for Day25 {
    type SharedData<'a> = Grid<Cell>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Grid::parse_with(input, |c| match c {
            '.' => Some(Cell::Empty),
            '>' => Some(Cell::East),
            'v' => Some(Cell::South),
            _ => None,
        })
    }
}

impl PartSolver<1> for Day25 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut floor = shared.clone();
        for step in 1..=MAX_STEPS {
            let east = move_herd(&mut floor, Cell::East);
            let south = move_herd(&mut floor, Cell::South);
            if !east && !south {
                return Ok(step.to_string());
            }
        }
        Err(SolveError::failed(format!(
            "sea cucumbers still moving after {} steps",
            MAX_STEPS
        )))
    }
}
