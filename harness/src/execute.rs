//! Orchestration for a single harness run.
//!
//! A run moves through at most two evaluations:
//!
//! ```text
//! Start ─┬─ example required ─ evaluate example ─┬─ match ──┐
//!        │                                       ├─ mismatch ─ aborted
//!        │                                       └─ error ──── aborted
//!        └─ example skipped ─────────────────────────────────┤
//!                                   evaluate puzzle ─┬─ ok ─── persisted
//!                                                    └─ error ─ aborted
//! ```
//!
//! Every failure is recovered here into an empty [`Outcome`]; nothing escapes
//! to the caller, including solver panics.

use std::any::Any;
use std::fmt::{self, Display};
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, info, instrument, warn};

use crate::core::types::{ExampleSpec, Outcome, ProblemIdentity, TimedEvaluation};
use crate::core::validator::{ExampleVerdict, validate};
use crate::io::cache::ResultsCache;
use crate::io::input::{Category, InputLoader};
use crate::io::store::ResultsStore;
use crate::report::{Reporter, trim_diagnostic};
use crate::timing::{Solver, time};

/// Why a harness step produced no result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepFailure {
    #[error("could not read {category} input {identifier}")]
    ReadFailure {
        category: Category,
        identifier: String,
    },
    #[error("solver error: {diagnostic}")]
    SolvingError { diagnostic: String },
    #[error("answer {actual} does not match expected {expected}")]
    ExampleMismatch { expected: String, actual: String },
}

/// Which evaluation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Example,
    Puzzle,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Example => f.write_str("example"),
            Stage::Puzzle => f.write_str("puzzle"),
        }
    }
}

/// Runs solvers against stored input and records confirmed results.
#[derive(Debug)]
pub struct Harness<S> {
    loader: InputLoader,
    cache: ResultsCache<S>,
    reporter: Reporter,
}

impl<S: ResultsStore> Harness<S> {
    /// `print_progress` only controls status lines, never control flow.
    pub fn new(loader: InputLoader, cache: ResultsCache<S>, print_progress: bool) -> Self {
        Self {
            loader,
            cache,
            reporter: Reporter::new(print_progress),
        }
    }

    pub fn loader(&self) -> &InputLoader {
        &self.loader
    }

    pub fn cache(&self) -> &ResultsCache<S> {
        &self.cache
    }

    /// Validate `solver` on the example, then solve the puzzle and persist it.
    ///
    /// Returns `Some` only when the example (unless skipped) matched and the
    /// puzzle evaluation succeeded. The puzzle is never evaluated after a
    /// failed example.
    #[instrument(skip_all, fields(identity = %identity))]
    pub fn run<A, F>(
        &self,
        identity: ProblemIdentity,
        example: &ExampleSpec<A>,
        solver: &F,
    ) -> Outcome<A>
    where
        A: PartialEq + Display,
        F: Solver<A> + ?Sized,
    {
        if let Err(failure) = self.check_example(identity, example, solver) {
            self.abort(identity, Stage::Example, &failure);
            return None;
        }

        let evaluation = match self.solve_puzzle(identity, solver) {
            Ok(evaluation) => evaluation,
            Err(failure) => {
                self.abort(identity, Stage::Puzzle, &failure);
                return None;
            }
        };
        info!(
            answer = %evaluation.result,
            duration_secs = evaluation.duration_secs(),
            "puzzle solved"
        );
        self.reporter.puzzle_solved(identity, &evaluation);
        self.record(identity, &evaluation);
        Some(evaluation)
    }

    fn check_example<A, F>(
        &self,
        identity: ProblemIdentity,
        example: &ExampleSpec<A>,
        solver: &F,
    ) -> Result<(), StepFailure>
    where
        A: PartialEq + Display,
        F: Solver<A> + ?Sized,
    {
        let Some((suffix, expected)) = example.expectation() else {
            debug!("example skipped");
            self.reporter.example_skipped(identity);
            return Ok(());
        };

        let identifier = format!("{}-{suffix}", identity.day_id());
        let input = self
            .loader
            .load(Category::Examples, identity.year, &identifier)
            .ok_or_else(|| StepFailure::ReadFailure {
                category: Category::Examples,
                identifier,
            })?;

        let evaluation = evaluate(solver, &input)?;
        match validate(&evaluation, expected) {
            ExampleVerdict::Match => {
                debug!(duration_secs = evaluation.duration_secs(), "example matched");
                self.reporter.example_matched(identity, &evaluation);
                Ok(())
            }
            ExampleVerdict::Mismatch => Err(StepFailure::ExampleMismatch {
                expected: expected.to_string(),
                actual: evaluation.result.to_string(),
            }),
        }
    }

    fn solve_puzzle<A, F>(
        &self,
        identity: ProblemIdentity,
        solver: &F,
    ) -> Result<TimedEvaluation<A>, StepFailure>
    where
        F: Solver<A> + ?Sized,
    {
        let identifier = identity.day_id();
        let input = self
            .loader
            .load(Category::Puzzles, identity.year, &identifier)
            .ok_or_else(|| StepFailure::ReadFailure {
                category: Category::Puzzles,
                identifier,
            })?;
        evaluate(solver, &input)
    }

    fn record<A: Display>(&self, identity: ProblemIdentity, evaluation: &TimedEvaluation<A>) {
        match self.cache.persist(identity, evaluation) {
            Ok(decision) => self.reporter.cached(identity, decision),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "failed to persist result");
            }
        }
    }

    fn abort(&self, identity: ProblemIdentity, stage: Stage, failure: &StepFailure) {
        warn!(%stage, %failure, "run aborted");
        self.reporter.failed(identity, stage, failure);
    }
}

/// Time one solver call, turning returned errors and panics into `SolvingError`.
fn evaluate<A, F>(solver: &F, input: &[String]) -> Result<TimedEvaluation<A>, StepFailure>
where
    F: Solver<A> + ?Sized,
{
    match panic::catch_unwind(AssertUnwindSafe(|| time(solver, input))) {
        Ok(Ok(evaluation)) => Ok(evaluation),
        Ok(Err(err)) => Err(StepFailure::SolvingError {
            diagnostic: trim_diagnostic(&format!("{err:#}")),
        }),
        Err(payload) => Err(StepFailure::SolvingError {
            diagnostic: trim_diagnostic(&format!("panicked: {}", panic_message(payload.as_ref()))),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::MemoryResultsStore;
    use anyhow::{Result, bail};

    fn harness(data_dir: &std::path::Path) -> Harness<MemoryResultsStore> {
        Harness::new(
            InputLoader::new(data_dir),
            ResultsCache::new(MemoryResultsStore::new()),
            false,
        )
    }

    #[test]
    fn missing_example_input_aborts_without_evaluating() {
        let temp = tempfile::tempdir().expect("tempdir");
        let harness = harness(temp.path());
        let identity = ProblemIdentity::new(2023, 1, 1).expect("identity");
        let failure = harness
            .check_example(identity, &ExampleSpec::Primary(1u32), &|_: &[String]| -> Result<u32> {
                panic!("must not run")
            })
            .expect_err("read failure");
        assert_eq!(
            failure,
            StepFailure::ReadFailure {
                category: Category::Examples,
                identifier: "01-primary".to_string(),
            }
        );
    }

    #[test]
    fn solver_errors_become_trimmed_diagnostics() {
        let failing = |_: &[String]| -> Result<u32> { bail!("bad input\nsecond line") };
        let failure = evaluate(&failing, &[]).expect_err("solving error");
        assert_eq!(
            failure,
            StepFailure::SolvingError {
                diagnostic: "bad input".to_string()
            }
        );
    }

    #[test]
    fn solver_panics_are_caught() {
        let panicking = |input: &[String]| -> Result<usize> { Ok(input[5].len()) };
        let failure = evaluate(&panicking, &[]).expect_err("panic");
        match failure {
            StepFailure::SolvingError { diagnostic } => {
                assert!(diagnostic.starts_with("panicked: index out of bounds"));
            }
            other => panic!("expected solving error, got {other:?}"),
        }
    }
}
