use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;
use crate::utils::parse::invalid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 20, title = "Trench Map", tags = ["2021", "grid", "simulation"])]
pub struct Day20;

const ALGORITHM_LEN: usize = 512;

/// Finite window onto an infinite image; every pixel outside the window
/// shares the `background` value
#[derive(Debug, Clone)]
pub struct Image {
    pixels: Grid<bool>,
    background: bool,
}

impl Image {
    fn pixel(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return self.background;
        }
        self.pixels
            .get(x as usize, y as usize)
            .copied()
            .unwrap_or(self.background)
    }

    /// Apply the algorithm once; the window grows by one pixel on every side
    fn enhance(&self, algorithm: &[bool]) -> Image {
        let width = self.pixels.width + 2;
        let height = self.pixels.height + 2;
        let mut pixels = Grid::new(width, height, false);
        for (x, y) in pixels.positions() {
            // (x, y) in the new window is (x - 1, y - 1) in the old one
            let (cx, cy) = (x as isize - 1, y as isize - 1);
            let mut index = 0;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    index = index << 1 | usize::from(self.pixel(cx + dx, cy + dy));
                }
            }
            pixels[(x, y)] = algorithm[index];
        }
        let background = algorithm[if self.background { ALGORITHM_LEN - 1 } else { 0 }];
        Image { pixels, background }
    }

    fn lit(&self) -> usize {
        self.pixels.cells.iter().filter(|&&p| p).count()
    }
}

#[derive(Debug)]
pub struct Scan {
    algorithm: Vec<bool>,
    image: Image,
}

impl Scan {
    fn lit_after(&self, steps: usize) -> Result<usize, SolveError> {
        let mut image = self.image.clone();
        for _ in 0..steps {
            image = image.enhance(&self.algorithm);
        }
        if image.background {
            return Err(SolveError::failed(format!(
                "infinitely many pixels are lit after {} steps",
                steps
            )));
        }
        Ok(image.lit())
    }
}

fn pixel(c: char) -> Option<bool> {
    match c {
        '#' => Some(true),
        '.' => Some(false),
        _ => None,
    }
}

impl AocParser for Day20 {
    type SharedData<'a> = Scan;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let input = input.trim_start();
        let (first, rest) = input
            .split_once('\n')
            .ok_or_else(|| ParseError::MissingData("no input image".into()))?;
        let algorithm = first
            .trim()
            .chars()
            .map(|c| pixel(c).ok_or_else(|| invalid(format!("unexpected {:?} in algorithm", c))))
            .collect::<Result<Vec<_>, _>>()?;
        if algorithm.len() != ALGORITHM_LEN {
            return Err(invalid(format!(
                "algorithm has {} entries, expected {}",
                algorithm.len(),
                ALGORITHM_LEN
            )));
        }
        let pixels = Grid::parse_with(rest, pixel)?;
        Ok(Scan {
            algorithm,
            image: Image {
                pixels,
                background: false,
            },
        })
    }
}

impl PartSolver<1> for Day20 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.lit_after(2)?.to_string())
    }
}

impl PartSolver<2> for Day20 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.lit_after(50)?.to_string())
    }
}
