//! Dense row-major 2-D grids parsed from character maps

use std::ops::{Index, IndexMut};

use aoc_solver::ParseError;

use super::parse::invalid;

/// A `width` × `height` grid addressed by `(x, y)` with `(0, 0)` top left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<T>,
}

impl<T> Grid<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self
    where
        T: Clone,
    {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Parse one row per non-empty line, mapping each character with `cell`.
    ///
    /// Rows must all have the same length; `cell` returning `None` rejects
    /// the character.
    pub fn parse_with(input: &str, mut cell: impl FnMut(char) -> Option<T>) -> Result<Self, ParseError> {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();

        for (idx, line) in input.lines().map(str::trim).enumerate() {
            if line.is_empty() {
                continue;
            }
            let row_len = line.chars().count();
            match width {
                None => width = Some(row_len),
                Some(w) if w != row_len => {
                    return Err(invalid(format!(
                        "(line {}) expected {} cells, found {}",
                        idx + 1,
                        w,
                        row_len
                    )));
                }
                Some(_) => {}
            }
            for c in line.chars() {
                let value = cell(c)
                    .ok_or_else(|| invalid(format!("(line {}) unexpected {:?}", idx + 1, c)))?;
                cells.push(value);
            }
            height += 1;
        }

        let width = width.ok_or_else(|| ParseError::MissingData("empty grid".into()))?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        (x < self.width && y < self.height).then(|| &self.cells[y * self.width + x])
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x < self.width && y < self.height {
            Some(&mut self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Orthogonal neighbours that lie inside the grid
    pub fn neighbors4(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + use<T> {
        self.offsets(x, y, &[(0, -1), (-1, 0), (1, 0), (0, 1)])
    }

    /// Orthogonal and diagonal neighbours that lie inside the grid
    pub fn neighbors8(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + use<T> {
        self.offsets(
            x,
            y,
            &[
                (-1, -1),
                (0, -1),
                (1, -1),
                (-1, 0),
                (1, 0),
                (-1, 1),
                (0, 1),
                (1, 1),
            ],
        )
    }

    fn offsets(
        &self,
        x: usize,
        y: usize,
        deltas: &'static [(isize, isize)],
    ) -> impl Iterator<Item = (usize, usize)> + use<T> {
        let (width, height) = (self.width, self.height);
        deltas.iter().filter_map(move |&(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            (nx < width && ny < height).then_some((nx, ny))
        })
    }

    /// Every coordinate in row-major order
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + use<T> {
        let width = self.width;
        (0..self.width * self.height).map(move |i| (i % width, i / width))
    }

    /// Every cell with its coordinate, in row-major order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        self.positions().zip(self.cells.iter())
    }
}

impl Grid<u8> {
    /// Parse a map of decimal digits such as `2199943210`
    pub fn parse_digits(input: &str) -> Result<Self, ParseError> {
        Self::parse_with(input, |c| c.to_digit(10).map(|d| d as u8))
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        &self.cells[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        &mut self.cells[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_digits() {
        let grid = Grid::parse_digits("123\n456\n").unwrap();
        assert_eq!((grid.width, grid.height), (3, 2));
        assert_eq!(grid.get(2, 1), Some(&6));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid[(0, 1)], 4);
    }

    #[test]
    fn test_parse_rejects_ragged_rows_and_bad_cells() {
        assert!(matches!(
            Grid::parse_digits("123\n45\n"),
            Err(ParseError::InvalidFormat(msg)) if msg.contains("line 2")
        ));
        assert!(Grid::parse_digits("1a3").is_err());
        assert!(matches!(Grid::parse_digits("\n\n"), Err(ParseError::MissingData(_))));
    }

    #[test]
    fn test_neighbors_respect_edges() {
        let grid = Grid::new(3, 3, 0u8);
        let mut corner: Vec<_> = grid.neighbors4(0, 0).collect();
        corner.sort();
        assert_eq!(corner, vec![(0, 1), (1, 0)]);
        assert_eq!(grid.neighbors8(1, 1).count(), 8);
        assert_eq!(grid.neighbors8(2, 2).count(), 3);
    }

    #[test]
    fn test_iter_is_row_major() {
        let grid = Grid::parse_with("ab\ncd", Some).unwrap();
        let order: String = grid.iter().map(|(_, c)| *c).collect();
        assert_eq!(order, "abcd");
        assert_eq!(grid.positions().nth(2), Some((0, 1)));
    }
}
