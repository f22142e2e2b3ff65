use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::invalid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 23, title = "Amphipod", tags = ["2021", "search"])]
pub struct Day23;

const HALLWAY: usize = 11;
const ROOMS: usize = 4;
const EMPTY: u8 = 0;
/// Hallway squares directly outside each room
const DOORS: [usize; ROOMS] = [2, 4, 6, 8];
/// Rows unfolded from the diagram before solving part two
const FOLDED_ROWS: [[u8; ROOMS]; 2] = [[4, 3, 2, 1], [4, 2, 1, 3]];

fn energy(kind: u8) -> u32 {
    10u32.pow(u32::from(kind) - 1)
}

/// Hallway followed by the rooms, each listed top to bottom.
///
/// Cells hold `EMPTY` or an amphipod kind from 1 (`A`) to 4 (`D`); kind `k`
/// belongs in room `k - 1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Burrow {
    cells: Vec<u8>,
    depth: usize,
}

impl Burrow {
    fn room(&self, r: usize) -> &[u8] {
        let start = HALLWAY + r * self.depth;
        &self.cells[start..start + self.depth]
    }

    fn slot(&self, r: usize, d: usize) -> usize {
        HALLWAY + r * self.depth + d
    }

    /// Only amphipods that belong here, so arrivals may enter
    fn room_accepts(&self, r: usize) -> bool {
        self.room(r).iter().all(|&k| k == EMPTY || usize::from(k) == r + 1)
    }

    fn is_organised(&self) -> bool {
        (0..ROOMS).all(|r| self.room(r).iter().all(|&k| usize::from(k) == r + 1))
    }

    /// Hallway squares strictly between `from` and `to`, plus `to` itself, are empty
    fn hallway_clear(&self, from: usize, to: usize) -> bool {
        let squares = if from < to { from + 1..=to } else { to..=from - 1 };
        squares.into_iter().all(|h| self.cells[h] == EMPTY)
    }

    /// Lower bound on the energy still needed, ignoring blocking and the
    /// steps down into a room
    fn heuristic(&self) -> u32 {
        let mut total = 0;
        for h in 0..HALLWAY {
            let kind = self.cells[h];
            if kind != EMPTY {
                total += (h.abs_diff(DOORS[usize::from(kind) - 1]) as u32 + 1) * energy(kind);
            }
        }
        for r in 0..ROOMS {
            let room = self.room(r);
            for (d, &kind) in room.iter().enumerate() {
                if kind == EMPTY {
                    continue;
                }
                let home = usize::from(kind) - 1;
                let settled = home == r && room[d..].iter().all(|&k| k == kind);
                if settled {
                    continue;
                }
                let sideways = if home == r {
                    // step out and come back
                    2
                } else {
                    DOORS[r].abs_diff(DOORS[home])
                };
                total += (d + 1 + sideways + 1) as u32 * energy(kind);
            }
        }
        total
    }

    /// Every legal single move with its energy cost
    fn moves(&self) -> Vec<(u32, Burrow)> {
        let mut moves = Vec::new();

        // hallway into its own room
        for h in 0..HALLWAY {
            let kind = self.cells[h];
            if kind == EMPTY {
                continue;
            }
            let r = usize::from(kind) - 1;
            if !self.room_accepts(r) || !self.hallway_clear(h, DOORS[r]) {
                continue;
            }
            let Some(d) = self.room(r).iter().rposition(|&k| k == EMPTY) else {
                continue;
            };
            let mut next = self.clone();
            next.cells[h] = EMPTY;
            next.cells[self.slot(r, d)] = kind;
            let steps = h.abs_diff(DOORS[r]) + d + 1;
            moves.push((steps as u32 * energy(kind), next));
        }

        // top of a room out into the hallway
        for r in 0..ROOMS {
            if self.room_accepts(r) {
                continue;
            }
            let Some(d) = self.room(r).iter().position(|&k| k != EMPTY) else {
                continue;
            };
            let kind = self.room(r)[d];
            for h in (0..HALLWAY).filter(|h| !DOORS.contains(h)) {
                if !self.hallway_clear(DOORS[r], h) {
                    continue;
                }
                let mut next = self.clone();
                next.cells[self.slot(r, d)] = EMPTY;
                next.cells[h] = kind;
                let steps = d + 1 + DOORS[r].abs_diff(h);
                moves.push((steps as u32 * energy(kind), next));
            }
        }

        moves
    }

    /// A* over burrow states
    fn least_energy(&self) -> Option<u32> {
        let mut best: HashMap<Burrow, u32> = HashMap::new();
        let mut queue = BinaryHeap::new();
        best.insert(self.clone(), 0);
        queue.push(Reverse((self.heuristic(), 0u32, self.clone())));

        while let Some(Reverse((_, cost, burrow))) = queue.pop() {
            if burrow.is_organised() {
                return Some(cost);
            }
            if best.get(&burrow).is_some_and(|&known| known < cost) {
                continue;
            }
            for (step_cost, next) in burrow.moves() {
                let cost = cost + step_cost;
                if best.get(&next).is_none_or(|&known| cost < known) {
                    best.insert(next.clone(), cost);
                    queue.push(Reverse((cost + next.heuristic(), cost, next)));
                }
            }
        }
        None
    }

    /// Insert `rows` below the current top row of every room
    fn unfold(&self, rows: &[[u8; ROOMS]]) -> Burrow {
        let depth = self.depth + rows.len();
        let mut cells = self.cells[..HALLWAY].to_vec();
        for r in 0..ROOMS {
            let room = self.room(r);
            cells.push(room[0]);
            cells.extend(rows.iter().map(|row| row[r]));
            cells.extend_from_slice(&room[1..]);
        }
        Burrow { cells, depth }
    }
}

fn kind(c: char) -> Option<u8> {
    match c {
        'A'..='D' => Some(c as u8 - b'A' + 1),
        '.' => Some(EMPTY),
        _ => None,
    }
}

impl AocParser for Day23 {
    type SharedData<'a> = Burrow;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let lines: Vec<Vec<char>> = input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.chars().collect())
            .collect();

        let hallway = lines
            .get(1)
            .and_then(|line| line.get(1..=HALLWAY))
            .ok_or_else(|| ParseError::MissingData("no hallway row".into()))?;
        let mut cells = hallway
            .iter()
            .map(|&c| kind(c).ok_or_else(|| invalid(format!("unexpected {:?} in hallway", c))))
            .collect::<Result<Vec<_>, _>>()?;
        if DOORS.iter().any(|&door| cells[door] != EMPTY) {
            return Err(invalid("amphipod standing in a doorway"));
        }

        // room rows carry a letter or `.` under every door
        let rows: Vec<[u8; ROOMS]> = lines[2..]
            .iter()
            .map_while(|line| {
                let mut row = [EMPTY; ROOMS];
                for (r, door) in DOORS.iter().enumerate() {
                    row[r] = kind(*line.get(door + 1)?)?;
                }
                Some(row)
            })
            .collect();
        if rows.is_empty() {
            return Err(ParseError::MissingData("no room rows".into()));
        }

        for r in 0..ROOMS {
            cells.extend(rows.iter().map(|row| row[r]));
        }
        let burrow = Burrow {
            cells,
            depth: rows.len(),
        };

        for kind in 1..=ROOMS as u8 {
            let count = burrow.cells.iter().filter(|&&k| k == kind).count();
            if count != burrow.depth {
                return Err(invalid(format!(
                    "expected {} amphipods of kind {}, found {}",
                    burrow.depth,
                    (b'A' + kind - 1) as char,
                    count
                )));
            }
        }
        Ok(burrow)
    }
}

fn organise(burrow: &Burrow) -> Result<String, SolveError> {
    burrow
        .least_energy()
        .map(|energy| energy.to_string())
        .ok_or_else(|| SolveError::failed("the amphipods cannot be organised"))
}

impl PartSolver<1> for Day23 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        organise(shared)
    }
}

impl PartSolver<2> for Day23 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        organise(&shared.unfold(&FOLDED_ROWS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2021::solve_all;

    const EXAMPLE: &str = "\
#############
#...........#
###B#C#B#D###
  #A#D#C#A#
  #########
";

    #[test]
    fn test_example() {
        assert_eq!(solve_all::<Day23>(EXAMPLE), vec!["12521", "44169"]);
    }

    #[test]
    fn test_parse_layout() {
        let burrow = Day23::parse(EXAMPLE).unwrap();
        assert_eq!(burrow.depth, 2);
        assert_eq!(burrow.room(0), &[2, 1]);
        assert_eq!(burrow.room(3), &[4, 1]);

        let unfolded = burrow.unfold(&FOLDED_ROWS);
        assert_eq!(unfolded.depth, 4);
        assert_eq!(unfolded.room(0), &[2, 4, 4, 1]);
        assert_eq!(unfolded.room(2), &[2, 2, 1, 3]);
    }

    #[test]
    fn test_already_organised() {
        let done = "\
#############
#...........#
###A#B#C#D###
  #A#B#C#D#
  #########
";
        assert_eq!(solve_all::<Day23>(done)[0], "0");
    }

    #[test]
    fn test_single_swap() {
        let swapped = "\
#############
#...........#
###B#A#C#D###
  #A#B#C#D#
  #########
";
        // A waits right of B's room while B crosses over: 2 + 20 + 20 + 4
        assert_eq!(solve_all::<Day23>(swapped)[0], "46");
    }

    #[test]
    fn test_rejects_wrong_population() {
        let lopsided = "\
#############
#...........#
###A#A#C#D###
  #A#B#C#D#
  #########
";
        assert!(Day23::parse(lopsided).is_err());
    }
}
