//! Reads example and puzzle input from the data directory.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Top-level input category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Examples,
    Puzzles,
}

impl Category {
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Examples => "examples",
            Category::Puzzles => "puzzles",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Loads raw input lines from `<data_dir>/<category>/<year>/<identifier>.txt`.
#[derive(Debug, Clone)]
pub struct InputLoader {
    data_dir: PathBuf,
}

impl InputLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path(&self, category: Category, year: u16, identifier: &str) -> PathBuf {
        self.data_dir
            .join(category.dir_name())
            .join(year.to_string())
            .join(format!("{identifier}.txt"))
    }

    /// Read input lines verbatim.
    ///
    /// Any read failure is logged and yields `None`; it never aborts the caller.
    pub fn load(&self, category: Category, year: u16, identifier: &str) -> Option<Vec<String>> {
        let path = self.path(category, year, identifier);
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let lines: Vec<String> = contents.lines().map(str::to_string).collect();
                debug!(path = %path.display(), lines = lines.len(), "input loaded");
                Some(lines)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read {category} input");
                None
            }
        }
    }
}
