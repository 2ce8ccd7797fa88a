//! Shared deterministic types for harness logic.
//!
//! These types define stable contracts between the loader, evaluator, validator
//! and cache. They do not depend on external state.

use std::fmt;
use std::time::Duration;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// First year puzzles were published.
pub const FIRST_YEAR: u16 = 2015;
/// Puzzles per year.
pub const LAST_DAY: u8 = 25;

/// Which half of a day's puzzle is being solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Part {
    One,
    Two,
}

impl Part {
    pub fn number(self) -> u8 {
        match self {
            Part::One => 1,
            Part::Two => 2,
        }
    }

    pub fn from_number(number: u8) -> Result<Self> {
        match number {
            1 => Ok(Part::One),
            2 => Ok(Part::Two),
            other => bail!("part must be 1 or 2, got {other}"),
        }
    }
}

impl From<Part> for u8 {
    fn from(part: Part) -> Self {
        part.number()
    }
}

impl TryFrom<u8> for Part {
    type Error = anyhow::Error;

    fn try_from(number: u8) -> Result<Self> {
        Part::from_number(number)
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// The (year, day, part) triple identifying one puzzle variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProblemIdentity {
    pub year: u16,
    pub day: u8,
    pub part: Part,
}

impl ProblemIdentity {
    /// Build an identity, rejecting days outside `1..=25` and parts other than 1 or 2.
    pub fn new(year: u16, day: u8, part: u8) -> Result<Self> {
        if year < FIRST_YEAR {
            bail!("year must be >= {FIRST_YEAR}, got {year}");
        }
        if !(1..=LAST_DAY).contains(&day) {
            bail!("day must be in 1..={LAST_DAY}, got {day}");
        }
        Ok(Self {
            year,
            day,
            part: Part::from_number(part)?,
        })
    }

    /// Per-day identifier used for input file names (`"01"`..`"25"`).
    pub fn day_id(&self) -> String {
        format!("{:02}", self.day)
    }
}

impl fmt::Display for ProblemIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} day {} part {}", self.year, self.day, self.part)
    }
}

/// Expected behaviour of a solver on the worked example.
///
/// `Primary` and `Secondary` select which example file is read; `Skip` bypasses
/// example validation entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExampleSpec<A> {
    Primary(A),
    Secondary(A),
    Skip,
}

impl<A> ExampleSpec<A> {
    /// Example file suffix and expected answer, or `None` for `Skip`.
    pub fn expectation(&self) -> Option<(&'static str, &A)> {
        match self {
            ExampleSpec::Primary(expected) => Some(("primary", expected)),
            ExampleSpec::Secondary(expected) => Some(("secondary", expected)),
            ExampleSpec::Skip => None,
        }
    }
}

/// Result of one timed solver invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEvaluation<A> {
    pub result: A,
    pub duration: Duration,
}

impl<A> TimedEvaluation<A> {
    pub fn duration_secs(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}

/// Final confirmed result of a harness run.
///
/// `Some` only when the example (if any) matched and the puzzle evaluation
/// succeeded.
pub type Outcome<A> = Option<TimedEvaluation<A>>;
