use std::collections::HashMap;

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::{Itertools, MinMaxResult};

use crate::utils::parse::with_line;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 14, title = "Extended Polymerization", tags = ["2021"])]
pub struct Day14;

type Pair = (u8, u8);

#[derive(Debug)]
pub struct Polymer {
    template: Vec<u8>,
    rules: HashMap<Pair, u8>,
}

impl Polymer {
    /// Most common minus least common element count after `steps` insertions.
    ///
    /// Only adjacent-pair counts are tracked; every element except the last
    /// one of the template is the first half of exactly one pair.
    fn spread_after(&self, steps: usize) -> Result<u64, SolveError> {
        let mut pairs: HashMap<Pair, u64> = self
            .template
            .iter()
            .copied()
            .tuple_windows()
            .counts()
            .into_iter()
            .map(|(pair, n)| (pair, n as u64))
            .collect();

        for _ in 0..steps {
            let mut next = HashMap::with_capacity(pairs.len() * 2);
            for (&(a, b), &n) in &pairs {
                let c = *self.rules.get(&(a, b)).ok_or_else(|| {
                    SolveError::failed(format!("no rule for {}{}", a as char, b as char))
                })?;
                *next.entry((a, c)).or_insert(0) += n;
                *next.entry((c, b)).or_insert(0) += n;
            }
            pairs = next;
        }

        let mut elements: HashMap<u8, u64> = HashMap::new();
        for (&(a, _), &n) in &pairs {
            *elements.entry(a).or_insert(0) += n;
        }
        if let Some(&last) = self.template.last() {
            *elements.entry(last).or_insert(0) += 1;
        }

        match elements.values().minmax() {
            MinMaxResult::MinMax(min, max) => Ok(max - min),
            _ => Ok(0),
        }
    }
}

fn parse_rule(line: &str) -> anyhow::Result<(Pair, u8)> {
    let (pair, insert) = line
        .split_once(" -> ")
        .ok_or_else(|| anyhow!("expected `AB -> C`, found {:?}", line))?;
    match (pair.as_bytes(), insert.as_bytes()) {
        ([a, b], [c]) => Ok(((*a, *b), *c)),
        _ => Err(anyhow!("expected `AB -> C`, found {:?}", line)),
    }
}

impl AocParser for Day14 {
    type SharedData<'a> = Polymer;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut lines = input.lines().map(str::trim).enumerate();
        let template = lines
            .by_ref()
            .find(|(_, line)| !line.is_empty())
            .map(|(_, line)| line.as_bytes().to_vec())
            .ok_or_else(|| ParseError::MissingData("no polymer template".into()))?;
        let rules = lines
            .filter(|(_, line)| !line.is_empty())
            .map(|(idx, line)| with_line(idx, parse_rule(line)))
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(Polymer { template, rules })
    }
}

impl PartSolver<1> for Day14 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.spread_after(10)?.to_string())
    }
}

impl PartSolver<2> for Day14 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.spread_after(40)?.to_string())
    }
}
