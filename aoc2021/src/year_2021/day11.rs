use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 11, title = "Dumbo Octopus", tags = ["2021", "grid", "simulation"])]
pub struct Day11;

const FLASH_AT: u8 = 10;
const MAX_STEPS: usize = 100_000;

/// Advance one step and return how many octopuses flashed
fn step(energy: &mut Grid<u8>) -> usize {
    let mut pending: Vec<(usize, usize)> = Vec::new();
    for pos in energy.positions() {
        energy[pos] += 1;
        if energy[pos] == FLASH_AT {
            pending.push(pos);
        }
    }

    let mut flashes = 0;
    while let Some((x, y)) = pending.pop() {
        flashes += 1;
        for next in energy.neighbors8(x, y) {
            // cells at FLASH_AT are already queued for this step
            if energy[next] < FLASH_AT {
                energy[next] += 1;
                if energy[next] == FLASH_AT {
                    pending.push(next);
                }
            }
        }
    }

    for cell in energy.cells.iter_mut().filter(|c| **c >= FLASH_AT) {
        *cell = 0;
    }
    flashes
}

impl AocParser for Day11 {
    type SharedData<'a> = Grid<u8>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Grid::parse_digits(input)
    }
}

impl PartSolver<1> for Day11 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut energy = shared.clone();
        let flashes: usize = (0..100).map(|_| step(&mut energy)).sum();
        Ok(flashes.to_string())
    }
}

impl PartSolver<2> for Day11 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut energy = shared.clone();
        let everyone = energy.cells.len();
        (1..=MAX_STEPS)
            .find(|_| step(&mut energy) == everyone)
            .map(|n| n.to_string())
            .ok_or_else(|| SolveError::failed(format!("no synchronised flash within {} steps", MAX_STEPS)))
    }
}
