use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::invalid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 3, title = "Binary Diagnostic", tags = ["2021"])]
pub struct Day03;

#[derive(Debug)]
pub struct Report {
    /// Bits per reading, taken from the first line
    width: usize,
    readings: Vec<u32>,
}

impl AocParser for Day03 {
    type SharedData<'a> = Report;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut width = None;
        let mut readings = Vec::new();

        for (idx, line) in input.lines().map(str::trim).enumerate() {
            if line.is_empty() {
                continue;
            }
            let w = *width.get_or_insert(line.len());
            if line.len() != w || w == 0 || w > 32 {
                return Err(invalid(format!(
                    "(line {}) expected {} bits, found {:?}",
                    idx + 1,
                    w,
                    line
                )));
            }
            let value = u32::from_str_radix(line, 2)
                .map_err(|e| invalid(format!("(line {}) {}", idx + 1, e)))?;
            readings.push(value);
        }

        let width = width.ok_or_else(|| ParseError::MissingData("no readings".into()))?;
        Ok(Report { width, readings })
    }
}

fn ones_at(values: &[u32], bit: usize) -> usize {
    values.iter().filter(|&&v| v >> bit & 1 == 1).count()
}

/// Filter by one bit at a time from the most significant until one value is left.
///
/// `keep_ones` decides, from the count of ones and zeros at the current bit,
/// whether readings with a 1 there survive.
fn rating(report: &Report, keep_ones: impl Fn(usize, usize) -> bool) -> Option<u32> {
    let mut remaining = report.readings.clone();
    for bit in (0..report.width).rev() {
        if remaining.len() <= 1 {
            break;
        }
        let ones = ones_at(&remaining, bit);
        let wanted = u32::from(keep_ones(ones, remaining.len() - ones));
        remaining.retain(|v| v >> bit & 1 == wanted);
    }
    match remaining.as_slice() {
        [value] => Some(*value),
        _ => None,
    }
}

impl PartSolver<1> for Day03 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let gamma = (0..shared.width)
            .filter(|&bit| ones_at(&shared.readings, bit) * 2 >= shared.readings.len())
            .fold(0u32, |acc, bit| acc | 1 << bit);
        let mask = u32::MAX >> (32 - shared.width);
        let epsilon = !gamma & mask;
        Ok((u64::from(gamma) * u64::from(epsilon)).to_string())
    }
}

impl PartSolver<2> for Day03 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let oxygen = rating(shared, |ones, zeros| ones >= zeros)
            .ok_or_else(|| SolveError::failed("oxygen rating is ambiguous"))?;
        let co2 = rating(shared, |ones, zeros| ones < zeros)
            .ok_or_else(|| SolveError::failed("CO2 rating is ambiguous"))?;
        Ok((u64::from(oxygen) * u64::from(co2)).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2021::solve_all;

    const EXAMPLE: &str = "\
00100
11110
10110
10111
10101
01111
00111
11100
10000
11001
00010
01010
";

    #[test]
    fn test_example() {
        assert_eq!(solve_all::<Day03>(EXAMPLE), vec!["198", "230"]);
    }

    #[test]
    fn test_ratings() {
        let report = Day03::parse(EXAMPLE).unwrap();
        assert_eq!(report.width, 5);
        assert_eq!(rating(&report, |ones, zeros| ones >= zeros), Some(23));
        assert_eq!(rating(&report, |ones, zeros| ones < zeros), Some(10));
    }

    #[test]
    fn test_width_mismatch() {
        assert!(Day03::parse("0101\n011\n").is_err());
        assert!(Day03::parse("0121\n").is_err());
    }
}
