//! Small parsing helpers shared by the puzzle parsers

use std::fmt::Display;
use std::str::FromStr;

use aoc_solver::ParseError;

/// `ParseError::InvalidFormat` carrying `msg`
pub fn invalid(msg: impl Into<String>) -> ParseError {
    ParseError::InvalidFormat(msg.into())
}

/// Prefix the error of `result` with a 1-based line number.
///
/// `line_idx` is the 0-based index as produced by `enumerate()`.
pub fn with_line<T, E: Display>(line_idx: usize, result: Result<T, E>) -> Result<T, ParseError> {
    result.map_err(|e| invalid(format!("(line {}) {}", line_idx + 1, e)))
}

/// Parse every `sep`-separated field of `line`, ignoring surrounding whitespace
/// and empty fields.
pub fn numbers<T>(line: &str, sep: char) -> Result<Vec<T>, ParseError>
where
    T: FromStr,
    T::Err: Display,
{
    line.split(sep)
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| {
            field
                .parse()
                .map_err(|e| invalid(format!("bad number {:?}: {}", field, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_with_separators() {
        assert_eq!(numbers::<u32>("3,4,3,1,2", ',').unwrap(), vec![3, 4, 3, 1, 2]);
        assert_eq!(numbers::<i32>(" 8  2 -23 ", ' ').unwrap(), vec![8, 2, -23]);
        assert!(numbers::<u8>("1,x", ',').is_err());
    }

    #[test]
    fn test_with_line_is_one_based() {
        let err = with_line::<u8, _>(2, "z".parse::<u8>()).unwrap_err();
        match err {
            ParseError::InvalidFormat(msg) => assert!(msg.starts_with("(line 3) ")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
