//! Wall-clock timing around a solver call.

use std::time::Instant;

use anyhow::Result;

use crate::core::types::TimedEvaluation;

/// A solving function over raw input lines.
///
/// Implemented for any `Fn(&[String]) -> Result<A>`, so plain functions and
/// closures can be handed to the harness directly.
pub trait Solver<A> {
    fn solve(&self, input: &[String]) -> Result<A>;
}

impl<A, F> Solver<A> for F
where
    F: Fn(&[String]) -> Result<A>,
{
    fn solve(&self, input: &[String]) -> Result<A> {
        self(input)
    }
}

/// Run `solver` on `input` and measure how long it took.
///
/// Solver errors are returned unchanged and panics unwind through; the caller
/// decides how to classify them.
pub fn time<A, S>(solver: &S, input: &[String]) -> Result<TimedEvaluation<A>>
where
    S: Solver<A> + ?Sized,
{
    let start = Instant::now();
    let result = solver.solve(input)?;
    let duration = start.elapsed();
    Ok(TimedEvaluation { result, duration })
}
