use anyhow::{Context, anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::parse::with_line;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 21, title = "Dirac Dice", tags = ["2021", "dp"])]
pub struct Day21;

const TRACK: u32 = 10;

fn advance(position: u32, steps: u32) -> u32 {
    (position - 1 + steps) % TRACK + 1
}

/// Starting positions of player 1 and player 2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Start(u32, u32);

fn deterministic_game(start: Start) -> u64 {
    let mut positions = [start.0, start.1];
    let mut scores = [0u32; 2];
    let mut rolls = 0u32;
    let mut player = 0;
    loop {
        let moved: u32 = (0..3).map(|k| (rolls + k) % 100 + 1).sum();
        rolls += 3;
        positions[player] = advance(positions[player], moved);
        scores[player] += positions[player];
        if scores[player] >= 1000 {
            return u64::from(scores[1 - player]) * u64::from(rolls);
        }
        player = 1 - player;
    }
}

/// Sums of three rolls of the three-sided die, with how many of the 27
/// universes produce each sum
const DIRAC_ROLLS: [(u32, u64); 7] = [(3, 1), (4, 3), (5, 6), (6, 7), (7, 6), (8, 3), (9, 1)];
const DIRAC_GOAL: u32 = 21;

/// `(position, score)` of the player about to move, then of the other player
type Turn = ((u32, u32), (u32, u32));

/// Universes in which the player about to move wins, and in which the
/// other player wins
struct DiracWins;

impl DiracWins {
    /// Each roll outcome either ends the game or hands over to the other player
    fn outcomes(&((position, score), other): &Turn) -> impl Iterator<Item = (u64, Option<Turn>)> {
        DIRAC_ROLLS.into_iter().map(move |(sum, universes)| {
            let position = advance(position, sum);
            let score = score + position;
            let next = (score < DIRAC_GOAL).then_some((other, (position, score)));
            (universes, next)
        })
    }
}

impl DpProblem<Turn, (u64, u64)> for DiracWins {
    fn deps(&self, turn: &Turn) -> Vec<Turn> {
        Self::outcomes(turn).filter_map(|(_, next)| next).collect()
    }

    fn compute(&self, turn: &Turn, deps: Vec<(u64, u64)>) -> (u64, u64) {
        let mut deps = deps.into_iter();
        let (mut mine, mut theirs) = (0, 0);
        for (universes, next) in Self::outcomes(turn) {
            match next.and_then(|_| deps.next()) {
                // roles swap once the other player is the one to move
                Some((their_wins, my_wins)) => {
                    mine += universes * my_wins;
                    theirs += universes * their_wins;
                }
                None => mine += universes,
            }
        }
        (mine, theirs)
    }
}

fn dirac_game(start: Start) -> u64 {
    let cache = DpCache::with_problem(HashMapBackend::new(), DiracWins);
    let (first, second) = cache.get(&((start.0, 0), (start.1, 0)));
    first.max(second)
}

fn parse_start(line: &str, player: u32) -> anyhow::Result<u32> {
    let prefix = format!("Player {} starting position:", player);
    let position = line
        .strip_prefix(&prefix)
        .ok_or_else(|| anyhow!("expected `{} N`", prefix))?
        .trim();
    let position: u32 = position
        .parse()
        .with_context(|| format!("bad position {:?}", position))?;
    ensure!((1..=TRACK).contains(&position), "position {} is off the track", position);
    Ok(position)
}

impl AocParser for Day21 {
    type SharedData<'a> = Start;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut lines = input
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty());
        let mut next_player = |player| {
            let (idx, line) = lines
                .next()
                .ok_or_else(|| ParseError::MissingData(format!("no player {}", player)))?;
            with_line(idx, parse_start(line, player))
        };
        Ok(Start(next_player(1)?, next_player(2)?))
    }
}

impl PartSolver<1> for Day21 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(deterministic_game(*shared).to_string())
    }
}

impl PartSolver<2> for Day21 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(dirac_game(*shared).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2021::solve_all;

    const EXAMPLE: &str = "Player 1 starting position: 4\nPlayer 2 starting position: 8\n";

    #[test]
    fn test_example() {
        assert_eq!(
            solve_all::<Day21>(EXAMPLE),
            vec!["739785", "444356092776315"]
        );
    }

    #[test]
    fn test_dirac_universe_split() {
        let cache = DpCache::with_problem(HashMapBackend::new(), DiracWins);
        let (first, second) = cache.get(&((4, 0), (8, 0)));
        assert_eq!(first, 444356092776315);
        assert_eq!(second, 341960390180808);
    }

    #[test]
    fn test_rejects_bad_positions() {
        assert!(Day21::parse("Player 1 starting position: 11\nPlayer 2 starting position: 8").is_err());
        assert!(matches!(
            Day21::parse("Player 1 starting position: 3"),
            Err(ParseError::MissingData(_))
        ));
    }
}
