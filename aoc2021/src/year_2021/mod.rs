//! Advent of Code 2021

pub mod day01;
pub mod day02;
pub mod day03;
pub mod day04;
pub mod day05;
pub mod day06;
pub mod day07;
pub mod day08;
pub mod day09;
pub mod day10;
pub mod day11;
pub mod day12;
pub mod day13;
pub mod day14;
pub mod day15;
pub mod day16;
pub mod day17;
pub mod day18;
pub mod day20;
pub mod day21;
pub mod day22;
pub mod day23;
pub mod day25;

pub use day01::Day01;
pub use day02::Day02;
pub use day03::Day03;
pub use day04::Day04;
pub use day05::Day05;
pub use day06::Day06;
pub use day07::Day07;
pub use day08::Day08;
pub use day09::Day09;
pub use day10::Day10;
pub use day11::Day11;
pub use day12::Day12;
pub use day13::Day13;
pub use day14::Day14;
pub use day15::Day15;
pub use day16::Day16;
pub use day17::Day17;
pub use day18::Day18;
pub use day20::Day20;
pub use day21::Day21;
pub use day22::Day22;
pub use day23::Day23;
pub use day25::Day25;

/// Parse `input` and solve every part in order, panicking on any error
#[cfg(test)]
pub(crate) fn solve_all<S: aoc_solver::Solver>(input: &str) -> Vec<String> {
    let mut shared = S::parse(input).expect("example should parse");
    (1..=S::PARTS)
        .map(|part| S::solve_part(&mut shared, part).expect("example should solve"))
        .collect()
}
