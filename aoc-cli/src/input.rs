//! Local puzzle input lookup

use crate::error::InputError;
use std::fs;
use std::path::{Path, PathBuf};

/// Finds puzzle inputs on disk
///
/// Searched layouts, in order:
/// - `{dir}/{year}/day{day:02}.txt`
/// - `{dir}/{year}_day{day:02}.txt`
///
/// An explicit override file, when set, is used for every lookup.
#[derive(Debug, Clone)]
pub struct InputStore {
    dir: PathBuf,
    override_file: Option<PathBuf>,
}

impl InputStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            override_file: None,
        }
    }

    /// Read every lookup from `file` instead of the directory
    pub fn with_override(mut self, file: Option<PathBuf>) -> Self {
        self.override_file = file;
        self
    }

    fn candidates(&self, year: u16, day: u8) -> Vec<PathBuf> {
        match &self.override_file {
            Some(file) => vec![file.clone()],
            None => vec![
                self.dir.join(year.to_string()).join(format!("day{:02}.txt", day)),
                self.dir.join(format!("{}_day{:02}.txt", year, day)),
            ],
        }
    }

    /// First existing file for a year/day
    pub fn path(&self, year: u16, day: u8) -> Option<PathBuf> {
        self.candidates(year, day).into_iter().find(|p| p.is_file())
    }

    /// Check if an input file exists
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_some()
    }

    /// Read the input for a year/day
    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        let searched = self.candidates(year, day);
        let Some(path) = searched.iter().find(|p| p.is_file()) else {
            return Err(InputError::Missing {
                year,
                day,
                searched,
            });
        };
        tracing::debug!(year, day, path = %path.display(), "reading input");
        read_file(path)
    }
}

fn read_file(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })
}
