use anyhow::{Context, anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::with_line;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 8, title = "Seven Segment Search", tags = ["2021", "deduction"])]
pub struct Day08;

/// One segment pattern as a bit set over `a..=g`
type Pattern = u8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    signals: [Pattern; 10],
    outputs: [Pattern; 4],
}

fn parse_pattern(word: &str) -> anyhow::Result<Pattern> {
    ensure!(!word.is_empty(), "empty pattern");
    word.bytes().try_fold(0u8, |acc, b| match b {
        b'a'..=b'g' => Ok(acc | 1 << (b - b'a')),
        _ => Err(anyhow!("bad segment {:?}", b as char)),
    })
}

fn parse_patterns<const N: usize>(text: &str) -> anyhow::Result<[Pattern; N]> {
    let patterns = text
        .split_whitespace()
        .map(parse_pattern)
        .collect::<anyhow::Result<Vec<_>>>()?;
    let found = patterns.len();
    patterns
        .try_into()
        .map_err(|_| anyhow!("expected {} patterns, found {}", N, found))
}

fn parse_entry(line: &str) -> anyhow::Result<Entry> {
    let (signals, outputs) = line
        .split_once('|')
        .ok_or_else(|| anyhow!("missing `|` separator"))?;
    Ok(Entry {
        signals: parse_patterns(signals).context("signal patterns")?,
        outputs: parse_patterns(outputs).context("output patterns")?,
    })
}

fn segments(pattern: Pattern) -> u32 {
    pattern.count_ones()
}

impl Entry {
    /// Work out which pattern shows which digit and read the output value.
    ///
    /// 1, 4, 7 and 8 have unique segment counts. Among the six-segment
    /// digits 9 covers 4, 0 covers 1, and 6 is what remains. Among the
    /// five-segment digits 3 covers 1, 5 shares three segments with 4, and 2
    /// is what remains.
    fn decode(&self) -> Option<u32> {
        let unique = |count| self.signals.iter().copied().find(|&p| segments(p) == count);
        let one = unique(2)?;
        let four = unique(4)?;

        let digit = |pattern: Pattern| -> Option<u32> {
            let covers = |other: Pattern| pattern & other == other;
            match segments(pattern) {
                2 => Some(1),
                3 => Some(7),
                4 => Some(4),
                7 => Some(8),
                6 if covers(four) => Some(9),
                6 if covers(one) => Some(0),
                6 => Some(6),
                5 if covers(one) => Some(3),
                5 if segments(pattern & four) == 3 => Some(5),
                5 => Some(2),
                _ => None,
            }
        };

        self.outputs
            .iter()
            .try_fold(0, |value, &pattern| Some(value * 10 + digit(pattern)?))
    }
}

impl AocParser for Day08 {
    type SharedData<'a> = Vec<Entry>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| with_line(idx, parse_entry(line)))
            .collect()
    }
}

impl PartSolver<1> for Day08 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let easy = shared
            .iter()
            .flat_map(|d| d.outputs.iter())
            .filter(|&&p| matches!(segments(p), 2 | 3 | 4 | 7))
            .count();
        Ok(easy.to_string())
    }
}

impl PartSolver<2> for Day08 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0u64;
        for (idx, display) in shared.iter().enumerate() {
            let value = display.decode().ok_or_else(|| {
                SolveError::failed(format!("entry {} cannot be decoded", idx + 1))
            })?;
            total += u64::from(value);
        }
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2021::solve_all;

    const SINGLE: &str =
        "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf\n";

    const FIRST_OF_LARGER: &str = "be cfbegad cbdgef fgaecd cgeb fdcge agebfd fecdb fabcd edb | fdgacbe cefdb cefbgd gcbe\n";

    #[test]
    fn test_single_entry() {
        assert_eq!(solve_all::<Day08>(SINGLE), vec!["0", "5353"]);
    }

    #[test]
    fn test_larger_example_entry() {
        assert_eq!(solve_all::<Day08>(FIRST_OF_LARGER), vec!["2", "8394"]);
    }

    #[test]
    fn test_wrong_pattern_count() {
        assert!(Day08::parse("ab cd | ab").is_err());
        assert!(Day08::parse("acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab cdfeb fcadb").is_err());
    }
}
