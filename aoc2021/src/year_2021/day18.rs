use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::invalid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 18, title = "Snailfish", tags = ["2021"])]
pub struct Day18;

/// A regular number and how many pairs enclose it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Leaf {
    value: u32,
    depth: u8,
}

/// Snailfish number flattened to its leaves in left-to-right order.
///
/// Leaf depths are enough to recover the tree: the leftmost leaf at the
/// greatest depth always pairs with the leaf right after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Number(Vec<Leaf>);

const EXPLODE_DEPTH: u8 = 5;
const SPLIT_AT: u32 = 10;

impl Number {
    fn parse(line: &str) -> Result<Self, ParseError> {
        if !line.starts_with('[') {
            return Err(invalid(format!("{} is not a pair", line)));
        }
        let mut leaves = Vec::new();
        let rest = parse_element(line, 0, &mut leaves)
            .map_err(|e| invalid(format!("{} in {}", e, line)))?;
        if !rest.is_empty() {
            return Err(invalid(format!("trailing {:?} after {}", rest, line)));
        }
        Ok(Self(leaves))
    }

    fn explode(&mut self) -> bool {
        let Some(i) = self.0.iter().position(|l| l.depth >= EXPLODE_DEPTH) else {
            return false;
        };
        let (Some(&left), Some(&right)) = (self.0.get(i), self.0.get(i + 1)) else {
            return false;
        };
        if i > 0 {
            self.0[i - 1].value += left.value;
        }
        if let Some(next) = self.0.get_mut(i + 2) {
            next.value += right.value;
        }
        self.0.splice(
            i..=i + 1,
            [Leaf {
                value: 0,
                depth: left.depth - 1,
            }],
        );
        true
    }

    fn split(&mut self) -> bool {
        let Some(i) = self.0.iter().position(|l| l.value >= SPLIT_AT) else {
            return false;
        };
        let Leaf { value, depth } = self.0[i];
        self.0.splice(
            i..=i,
            [
                Leaf {
                    value: value / 2,
                    depth: depth + 1,
                },
                Leaf {
                    value: value.div_ceil(2),
                    depth: depth + 1,
                },
            ],
        );
        true
    }

    fn reduce(&mut self) {
        while self.explode() || self.split() {}
    }

    fn add(&self, other: &Number) -> Number {
        let mut sum = Number(
            self.0
                .iter()
                .chain(&other.0)
                .map(|l| Leaf {
                    value: l.value,
                    depth: l.depth + 1,
                })
                .collect(),
        );
        sum.reduce();
        sum
    }

    fn magnitude(&self) -> u32 {
        let mut leaves = self.0.clone();
        while leaves.len() > 1 {
            let deepest = leaves.iter().map(|l| l.depth).max().unwrap_or_default();
            let Some(i) = leaves.iter().position(|l| l.depth == deepest) else {
                break;
            };
            let (Some(&left), Some(&right)) = (leaves.get(i), leaves.get(i + 1)) else {
                break;
            };
            leaves.splice(
                i..=i + 1,
                [Leaf {
                    value: 3 * left.value + 2 * right.value,
                    depth: left.depth - 1,
                }],
            );
        }
        leaves.first().map_or(0, |l| l.value)
    }
}

/// Parse one element at `depth`, pushing its leaves and returning the rest
fn parse_element<'a>(
    text: &'a str,
    depth: u8,
    leaves: &mut Vec<Leaf>,
) -> Result<&'a str, String> {
    let mut chars = text.chars();
    match chars.next() {
        Some('[') => {
            let depth = depth + 1;
            if depth >= EXPLODE_DEPTH {
                return Err("pair nested too deeply".to_string());
            }
            let rest = parse_element(chars.as_str(), depth, leaves)?;
            let rest = rest
                .strip_prefix(',')
                .ok_or_else(|| format!("expected `,` before {:?}", rest))?;
            let rest = parse_element(rest, depth, leaves)?;
            rest.strip_prefix(']')
                .ok_or_else(|| format!("expected `]` before {:?}", rest))
        }
        Some(c) => {
            // input numbers are already reduced, so every regular number is one digit
            let value = c
                .to_digit(10)
                .ok_or_else(|| format!("unexpected {:?}", c))?;
            leaves.push(Leaf { value, depth });
            Ok(chars.as_str())
        }
        None => Err("unexpected end".to_string()),
    }
}

impl AocParser for Day18 {
    type SharedData<'a> = Vec<Number>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let numbers = input
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(idx, line)| {
                Number::parse(line).map_err(|e| invalid(format!("(line {}) {}", idx + 1, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if numbers.is_empty() {
            return Err(ParseError::MissingData("no snailfish numbers".into()));
        }
        Ok(numbers)
    }
}

impl PartSolver<1> for Day18 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (first, rest) = shared
            .split_first()
            .ok_or_else(|| SolveError::failed("no snailfish numbers"))?;
        let total = rest.iter().fold(first.clone(), |acc, n| acc.add(n));
        Ok(total.magnitude().to_string())
    }
}

impl PartSolver<2> for Day18 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut best = 0;
        for (i, a) in shared.iter().enumerate() {
            for (j, b) in shared.iter().enumerate() {
                if i != j {
                    best = best.max(a.add(b).magnitude());
                }
            }
        }
        Ok(best.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2021::solve_all;

    const HOMEWORK: &str = "\
[[[0,[5,8]],[[1,7],[9,6]]],[[4,[1,2]],[[1,4],2]]]
[[[5,[2,8]],4],[5,[[9,9],0]]]
[6,[[[6,2],[5,6]],[[7,6],[4,7]]]]
[[[6,[0,7]],[0,9]],[4,[9,[9,0]]]]
[[[7,[6,4]],[3,[1,3]]],[[[5,5],1],9]]
[[6,[[7,3],[3,2]]],[[[3,8],[5,7]],4]]
[[[[5,4],[7,7]],8],[[8,3],8]]
[[9,3],[[9,9],[6,[4,9]]]]
[[2,[[7,7],7]],[[5,8],[[9,3],[0,2]]]]
[[[[5,2],5],[8,[3,7]]],[[5,[7,5]],[4,4]]]
";

    fn number(text: &str) -> Number {
        Number::parse(text).unwrap()
    }

    #[test]
    fn test_homework() {
        assert_eq!(solve_all::<Day18>(HOMEWORK), vec!["4140", "3993"]);
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(number("[[1,2],[[3,4],5]]").magnitude(), 143);
        assert_eq!(number("[[[[0,7],4],[[7,8],[6,0]]],[8,1]]").magnitude(), 1384);
        assert_eq!(number("[9,1]").magnitude(), 29);
    }

    #[test]
    fn test_explode() {
        let mut exploding = number("[[[[9,8],1],2],3]").add(&number("[4,0]"));
        exploding.reduce();
        assert_eq!(exploding, number("[[[[0,9],2],3],[4,0]]"));

        // [[[[[9,8],1],2],3],4]
        let mut single = Number(
            [(9, 5), (8, 5), (1, 4), (2, 3), (3, 2), (4, 1)]
                .into_iter()
                .map(|(value, depth)| Leaf { value, depth })
                .collect(),
        );
        assert!(single.explode());
        assert_eq!(single, number("[[[[0,9],2],3],4]"));
    }

    #[test]
    fn test_sums() {
        assert_eq!(
            solve_all::<Day18>("[1,1]\n[2,2]\n[3,3]\n[4,4]\n")[0],
            number("[[[[1,1],[2,2]],[3,3]],[4,4]]").magnitude().to_string()
        );
        let sum = number("[[[[4,3],4],4],[7,[[8,4],9]]]").add(&number("[1,1]"));
        assert_eq!(sum, number("[[[[0,7],4],[[7,8],[6,0]]],[8,1]]"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(Day18::parse("[1,2").is_err());
        assert!(Day18::parse("[1,x]").is_err());
        assert!(Day18::parse("[1,2,3]").is_err());
        assert!(Day18::parse("[[1,2]]").is_err());
        assert!(Day18::parse("[1,2]]").is_err());
        assert!(Day18::parse("7").is_err());
        assert!(Day18::parse("[12,3]").is_err());
        assert!(Day18::parse("[[[[[1,2],3],4],5],6]").is_err());
    }
}
