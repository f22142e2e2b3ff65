use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, VecBackend};
use crate::utils::parse::{invalid, numbers};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 6, title = "Lanternfish", tags = ["2021", "dp"])]
pub struct Day06;

const RESET_TIMER: usize = 6;
const NEWBORN_TIMER: usize = 8;

/// Population after `n` days descended from one fish whose timer is 0.
///
/// A fish with timer `t` left alone for `m` days is still a single fish
/// while `m <= t`, otherwise it behaves like a timer-0 fish with `m - t`
/// days to go. A timer-0 fish spends one day becoming a timer-6 fish plus a
/// timer-8 newborn.
struct Offspring;

impl Offspring {
    fn pending(timer: usize, days: usize) -> Option<usize> {
        (days > timer).then(|| days - timer)
    }
}

impl DpProblem<usize, u64> for Offspring {
    fn deps(&self, days: &usize) -> Vec<usize> {
        match days.checked_sub(1) {
            None => vec![],
            Some(rest) => [RESET_TIMER, NEWBORN_TIMER]
                .into_iter()
                .filter_map(|timer| Self::pending(timer, rest))
                .collect(),
        }
    }

    fn compute(&self, days: &usize, deps: Vec<u64>) -> u64 {
        if *days == 0 {
            return 1;
        }
        let settled = [RESET_TIMER, NEWBORN_TIMER]
            .into_iter()
            .filter(|&timer| Self::pending(timer, days - 1).is_none())
            .count() as u64;
        settled + deps.iter().sum::<u64>()
    }
}

fn population(timers: &[usize], days: usize) -> u64 {
    let cache = DpCache::with_problem(VecBackend::with_capacity(days + 1), Offspring);
    timers
        .iter()
        .map(|&timer| Offspring::pending(timer, days).map_or(1, |rest| cache.get(&rest)))
        .sum()
}

impl AocParser for Day06 {
    type SharedData<'a> = Vec<usize>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let timers = numbers::<usize>(input.trim(), ',')?;
        if let Some(bad) = timers.iter().find(|&&t| t > NEWBORN_TIMER) {
            return Err(invalid(format!("timer {} out of range", bad)));
        }
        Ok(timers)
    }
}

impl PartSolver<1> for Day06 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(population(shared, 80).to_string())
    }
}

impl PartSolver<2> for Day06 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(population(shared, 256).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2021::solve_all;
    use proptest::prelude::*;

    const EXAMPLE: &str = "3,4,3,1,2\n";

    /// Day-by-day simulation over timer buckets
    fn simulate(timers: &[usize], days: usize) -> u64 {
        let mut buckets = [0u64; 9];
        for &t in timers {
            buckets[t] += 1;
        }
        for _ in 0..days {
            buckets.rotate_left(1);
            buckets[RESET_TIMER] += buckets[NEWBORN_TIMER];
        }
        buckets.iter().sum()
    }

    #[test]
    fn test_example() {
        assert_eq!(solve_all::<Day06>(EXAMPLE), vec!["5934", "26984457539"]);
    }

    #[test]
    fn test_eighteen_days() {
        assert_eq!(population(&[3, 4, 3, 1, 2], 18), 26);
    }

    #[test]
    fn test_rejects_large_timer() {
        assert!(Day06::parse("3,9").is_err());
    }

    proptest! {
        #[test]
        fn prop_matches_bucket_simulation(
            timers in prop::collection::vec(0usize..=8, 1..20),
            days in 0usize..120,
        ) {
            prop_assert_eq!(population(&timers, days), simulate(&timers, days));
        }
    }
}
