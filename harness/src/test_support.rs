//! Test-only helpers for building input fixtures and observing solver calls.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::io::input::{Category, InputLoader};
use crate::timing::Solver;

/// Temporary data directory laid out like the real input store.
pub struct TestData {
    dir: TempDir,
}

impl TestData {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir().context("create temp data dir")?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn loader(&self) -> InputLoader {
        InputLoader::new(self.dir.path())
    }

    /// Write `<category>/<year>/<identifier>.txt` with one entry per line.
    pub fn write(
        &self,
        category: Category,
        year: u16,
        identifier: &str,
        lines: &[&str],
    ) -> Result<()> {
        let path = self.loader().path(category, year, identifier);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let mut contents = lines.join("\n");
        contents.push('\n');
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }

    pub fn write_example(&self, year: u16, identifier: &str, lines: &[&str]) -> Result<()> {
        self.write(Category::Examples, year, identifier, lines)
    }

    pub fn write_puzzle(&self, year: u16, day_id: &str, lines: &[&str]) -> Result<()> {
        self.write(Category::Puzzles, year, day_id, lines)
    }
}

/// Solver wrapper that records every input it is called with.
pub struct CountingSolver<F> {
    inner: F,
    calls: RefCell<Vec<Vec<String>>>,
}

impl<F> CountingSolver<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Number of calls whose input equals `input`.
    pub fn calls_with(&self, input: &[&str]) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.iter().map(String::as_str).eq(input.iter().copied()))
            .count()
    }
}

impl<A, F> Solver<A> for CountingSolver<F>
where
    F: Fn(&[String]) -> Result<A>,
{
    fn solve(&self, input: &[String]) -> Result<A> {
        self.calls.borrow_mut().push(input.to_vec());
        (self.inner)(input)
    }
}

/// Count strictly increasing adjacent pairs of numbers.
pub fn count_increases(input: &[String]) -> Result<u64> {
    let depths = input
        .iter()
        .map(|line| {
            line.trim()
                .parse::<u64>()
                .with_context(|| format!("parse depth {line:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(depths.windows(2).filter(|pair| pair[1] > pair[0]).count() as u64)
}
