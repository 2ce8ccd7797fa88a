//! Per-problem execution harness for puzzle solutions.
//!
//! A run validates a solving function against a worked example, evaluates it on
//! the real puzzle input, times both, and records the best known result in a
//! durable cache. The layout follows a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (identities, example validation,
//!   the cache line format and its merge rule). No I/O.
//! - **[`io`]**: Side-effecting operations (configuration, input files, the
//!   results store). Injected so tests can swap them out.
//!
//! Orchestration modules ([`timing`], [`execute`], [`report`]) combine the two
//! into the [`execute::Harness`] entry point.

pub mod core;
pub mod execute;
pub mod io;
pub mod logging;
pub mod report;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod timing;
