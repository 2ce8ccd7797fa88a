//! Line storage backing the results cache.
//!
//! The [`ResultsStore`] trait decouples the cache from where its lines live.
//! The CLI uses [`FileResultsStore`]; tests use [`MemoryResultsStore`].
//!
//! There is no locking: two processes writing the same file may interleave a
//! read-modify-write and lose one update.

use std::cell::{Cell, RefCell};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Abstraction over the durable results file.
pub trait ResultsStore {
    /// All stored lines in order. A store that does not exist yet is empty.
    fn read_lines(&self) -> Result<Vec<String>>;
    /// Append one line.
    fn append_line(&self, line: &str) -> Result<()>;
    /// Replace all lines.
    fn write_lines(&self, lines: &[String]) -> Result<()>;
}

/// Results stored in a flat text file, one record per line.
#[derive(Debug, Clone)]
pub struct FileResultsStore {
    path: PathBuf,
}

impl FileResultsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        Ok(())
    }
}

impl ResultsStore for FileResultsStore {
    fn read_lines(&self) -> Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => {
                Err(err).with_context(|| format!("read results {}", self.path.display()))
            }
        }
    }

    fn append_line(&self, line: &str) -> Result<()> {
        self.ensure_parent()?;
        // A hand-edited file may lack its final newline.
        let needs_newline = fs::read(&self.path)
            .map(|bytes| bytes.last().is_some_and(|last| *last != b'\n'))
            .unwrap_or(false);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open results {}", self.path.display()))?;
        if needs_newline {
            writeln!(file).with_context(|| format!("append results {}", self.path.display()))?;
        }
        writeln!(file, "{line}")
            .with_context(|| format!("append results {}", self.path.display()))?;
        debug!(path = %self.path.display(), "results line appended");
        Ok(())
    }

    /// Atomically rewrite the file (temp file + rename).
    fn write_lines(&self, lines: &[String]) -> Result<()> {
        self.ensure_parent()?;
        let mut buf = String::new();
        for line in lines {
            buf.push_str(line);
            buf.push('\n');
        }
        let tmp_path = self.path.with_extension("txt.tmp");
        fs::write(&tmp_path, buf)
            .with_context(|| format!("write temp results {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("replace results {}", self.path.display()))?;
        debug!(path = %self.path.display(), lines = lines.len(), "results rewritten");
        Ok(())
    }
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryResultsStore {
    lines: RefCell<Vec<String>>,
    writes: Cell<usize>,
}

impl MemoryResultsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines(lines: Vec<String>) -> Self {
        Self {
            lines: RefCell::new(lines),
            writes: Cell::new(0),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Number of append or rewrite operations performed.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl ResultsStore for MemoryResultsStore {
    fn read_lines(&self) -> Result<Vec<String>> {
        Ok(self.lines.borrow().clone())
    }

    fn append_line(&self, line: &str) -> Result<()> {
        self.lines.borrow_mut().push(line.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn write_lines(&self, lines: &[String]) -> Result<()> {
        *self.lines.borrow_mut() = lines.to_vec();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = FileResultsStore::new(temp.path().join("results.txt"));
        assert!(store.read_lines().expect("read").is_empty());
    }

    #[test]
    fn append_creates_parent_and_keeps_order() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = FileResultsStore::new(temp.path().join("cfg").join("results.txt"));
        store.append_line("a").expect("append a");
        store.append_line("b").expect("append b");
        assert_eq!(store.read_lines().expect("read"), vec!["a", "b"]);
        assert_eq!(
            fs::read_to_string(store.path()).expect("raw"),
            "a\nb\n"
        );
    }

    #[test]
    fn append_repairs_missing_final_newline() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = FileResultsStore::new(temp.path().join("results.txt"));
        fs::write(store.path(), "first").expect("seed");
        store.append_line("second").expect("append");
        assert_eq!(store.read_lines().expect("read"), vec!["first", "second"]);
    }

    #[test]
    fn write_lines_replaces_contents() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = FileResultsStore::new(temp.path().join("results.txt"));
        store.append_line("old").expect("append");
        store
            .write_lines(&["new-1".to_string(), "new-2".to_string()])
            .expect("write");
        assert_eq!(store.read_lines().expect("read"), vec!["new-1", "new-2"]);
        assert!(!temp.path().join("results.txt.tmp").exists());
    }

    #[test]
    fn memory_store_counts_writes() {
        let store = MemoryResultsStore::new();
        store.append_line("x").expect("append");
        store.write_lines(&[]).expect("write");
        assert_eq!(store.writes(), 2);
        assert!(store.lines().is_empty());
    }
}
