use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{invalid, numbers};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 4, title = "Giant Squid", tags = ["2021", "simulation"])]
pub struct Day04;

#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    cells: Vec<u32>,
    marked: Vec<bool>,
}

impl Board {
    fn parse(block: &str) -> Result<Self, ParseError> {
        let rows = block
            .lines()
            .map(|line| numbers::<u32>(line, ' '))
            .collect::<Result<Vec<_>, _>>()?;
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return Err(invalid(format!("board is not square:\n{}", block)));
        }
        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
            marked: vec![false; size * size],
        })
    }

    /// Mark `number`; true when this completes a row or column
    fn mark(&mut self, number: u32) -> bool {
        let Some(pos) = self.cells.iter().position(|&c| c == number) else {
            return false;
        };
        self.marked[pos] = true;
        let (row, col) = (pos / self.size, pos % self.size);
        (0..self.size).all(|c| self.marked[row * self.size + c])
            || (0..self.size).all(|r| self.marked[r * self.size + col])
    }

    fn unmarked_sum(&self) -> u32 {
        self.cells
            .iter()
            .zip(&self.marked)
            .filter(|&(_, marked)| !marked)
            .map(|(cell, _)| cell)
            .sum()
    }
}

#[derive(Debug)]
pub struct Bingo {
    draws: Vec<u32>,
    boards: Vec<Board>,
    /// Scores in the order boards win, filled on first use
    scores: Option<Vec<u32>>,
}

impl Bingo {
    fn scores(&mut self) -> &[u32] {
        self.scores.get_or_insert_with(|| {
            let mut boards = self.boards.clone();
            let mut won = vec![false; boards.len()];
            let mut scores = Vec::with_capacity(boards.len());
            for &number in &self.draws {
                for (board, won) in boards.iter_mut().zip(won.iter_mut()) {
                    if !*won && board.mark(number) {
                        *won = true;
                        scores.push(board.unmarked_sum() * number);
                    }
                }
            }
            scores
        })
    }
}

impl AocParser for Day04 {
    type SharedData<'a> = Bingo;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let input = input.replace("\r\n", "\n");
        let mut blocks = input.trim().split("\n\n");
        let draws = blocks
            .next()
            .map(|line| numbers::<u32>(line, ','))
            .transpose()?
            .ok_or_else(|| ParseError::MissingData("no draw order".into()))?;
        let boards = blocks.map(Board::parse).collect::<Result<Vec<_>, _>>()?;
        if boards.is_empty() {
            return Err(ParseError::MissingData("no boards".into()));
        }
        Ok(Bingo {
            draws,
            boards,
            scores: None,
        })
    }
}

impl PartSolver<1> for Day04 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .scores()
            .first()
            .map(u32::to_string)
            .ok_or_else(|| SolveError::failed("no board wins"))
    }
}

impl PartSolver<2> for Day04 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .scores()
            .last()
            .map(u32::to_string)
            .ok_or_else(|| SolveError::failed("no board wins"))
    }
}
