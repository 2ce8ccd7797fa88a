//! Human-readable status lines for a harness run.
//!
//! Printing is presentation only: a disabled reporter changes nothing about
//! control flow or persistence.

use std::fmt::Display;
use std::time::Duration;

use crate::core::merge::MergeDecision;
use crate::core::types::{ProblemIdentity, TimedEvaluation};
use crate::execute::{Stage, StepFailure};

/// Diagnostics longer than this are cut.
pub const DIAGNOSTIC_LIMIT: usize = 160;

#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    enabled: bool,
}

impl Reporter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn example_skipped(&self, identity: ProblemIdentity) {
        self.line(format_args!("{identity}: example skipped"));
    }

    pub fn example_matched<A: Display>(
        &self,
        identity: ProblemIdentity,
        evaluation: &TimedEvaluation<A>,
    ) {
        self.line(format_args!(
            "{identity}: example ok ({}) in {}",
            evaluation.result,
            format_duration(evaluation.duration)
        ));
    }

    pub fn puzzle_solved<A: Display>(
        &self,
        identity: ProblemIdentity,
        evaluation: &TimedEvaluation<A>,
    ) {
        self.line(format_args!(
            "{identity}: answer {} in {}",
            evaluation.result,
            format_duration(evaluation.duration)
        ));
    }

    pub fn failed(&self, identity: ProblemIdentity, stage: Stage, failure: &StepFailure) {
        self.line(format_args!("{identity}: {stage} failed: {failure}"));
    }

    pub fn cached(&self, identity: ProblemIdentity, decision: MergeDecision) {
        let note = match decision {
            MergeDecision::Insert => "recorded",
            MergeDecision::Replace => "recorded as new best time",
            MergeDecision::Keep => "kept previous record",
        };
        self.line(format_args!("{identity}: cache {note}"));
    }

    fn line(&self, message: std::fmt::Arguments<'_>) {
        if self.enabled {
            println!("{message}");
        }
    }
}

/// Render a duration with a unit that keeps a few significant digits.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs >= 1.0 {
        format!("{secs:.3} s")
    } else if secs >= 1e-3 {
        format!("{:.3} ms", secs * 1e3)
    } else {
        format!("{:.3} µs", secs * 1e6)
    }
}

/// First non-empty line of `message`, cut to [`DIAGNOSTIC_LIMIT`] characters.
pub fn trim_diagnostic(message: &str) -> String {
    let first = message
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("no diagnostic");
    if first.chars().count() <= DIAGNOSTIC_LIMIT {
        return first.to_string();
    }
    let mut cut: String = first.chars().take(DIAGNOSTIC_LIMIT).collect();
    cut.push('…');
    cut
}
