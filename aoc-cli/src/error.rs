//! Error types for the CLI

use itertools::Itertools;
use std::path::PathBuf;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),

    /// One or more parts did not produce an answer
    #[error("{failed} of {total} part(s) failed")]
    PartsFailed { failed: usize, total: usize },
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Input could not be loaded
    #[error(transparent)]
    Input(#[from] InputError),

    /// Solver construction or execution failed
    #[error("Solver execution failed: {0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Combine two Arc-wrapped errors into one, flattening nested `Multiple`s
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let errors = match (first.inner(), second.inner()) {
            (ExecutorError::Multiple(v1), ExecutorError::Multiple(v2)) => {
                let mut combined = v1.clone();
                combined.extend(v2.iter().cloned());
                combined
            }
            (_, ExecutorError::Multiple(v)) => {
                let mut combined = vec![first];
                combined.extend(v.iter().cloned());
                combined
            }
            (ExecutorError::Multiple(v), _) => {
                let mut combined = v.clone();
                combined.push(second);
                combined
            }
            _ => vec![first, second],
        };
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

/// Input store errors
#[derive(Error, Debug)]
pub enum InputError {
    /// No input file at any of the searched locations
    #[error("No input for {year}/{day:02} (looked in {})", join_paths(.searched))]
    Missing {
        year: u16,
        day: u8,
        searched: Vec<PathBuf>,
    },

    /// Input file exists but could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display()).join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(msg: &str) -> ArcExecutorError {
        ExecutorError::ThreadPool(msg.to_string()).into()
    }

    fn flattened(err: &ArcExecutorError) -> Vec<String> {
        match err.inner() {
            ExecutorError::Multiple(v) => v.iter().map(ToString::to_string).collect(),
            other => vec![other.to_string()],
        }
    }

    #[test]
    fn test_combine_flattens() {
        let ab = ArcExecutorError::combine(single("a"), single("b"));
        let cd = ArcExecutorError::combine(single("c"), single("d"));
        let all = ArcExecutorError::combine(ab.clone(), cd);
        assert_eq!(flattened(&all).len(), 4);

        let front = ArcExecutorError::combine(single("z"), ab.clone());
        assert_eq!(flattened(&front)[0], "Thread pool creation failed: z");

        let back = ArcExecutorError::combine(ab, single("z"));
        assert_eq!(flattened(&back)[2], "Thread pool creation failed: z");
    }

    #[test]
    fn test_combine_opt() {
        let lone = ArcExecutorError::combine_opt(None, single("a"));
        assert_eq!(flattened(&lone), ["Thread pool creation failed: a"]);

        let both = ArcExecutorError::combine_opt(Some(lone), single("b"));
        assert_eq!(both.to_string(), "Multiple errors occurred (2 total)");
    }

    #[test]
    fn test_missing_input_lists_searched_paths() {
        let err = InputError::Missing {
            year: 2021,
            day: 3,
            searched: vec![PathBuf::from("a/2021/day03.txt"), PathBuf::from("a/2021_day03.txt")],
        };
        assert_eq!(
            err.to_string(),
            "No input for 2021/03 (looked in a/2021/day03.txt, a/2021_day03.txt)"
        );
    }
}
