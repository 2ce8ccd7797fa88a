//! Best-known results per problem, persisted through a [`ResultsStore`].

use std::fmt::Display;

use anyhow::{Result, anyhow};
use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::core::merge::{MergeDecision, decide, replacement};
use crate::core::record::ResultRecord;
use crate::core::types::{ProblemIdentity, TimedEvaluation};
use crate::io::store::ResultsStore;

/// Keyed cache of confirmed results, at most one record per identity.
#[derive(Debug)]
pub struct ResultsCache<S> {
    store: S,
}

impl<S: ResultsStore> ResultsCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All well-formed records in file order. Malformed lines are skipped.
    pub fn records(&self) -> Result<Vec<ResultRecord>> {
        let lines = self.store.read_lines()?;
        Ok(lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| parse_line(index, line))
            .collect())
    }

    pub fn find(&self, identity: ProblemIdentity) -> Result<Option<ResultRecord>> {
        let lines = self.store.read_lines()?;
        Ok(locate(&lines, identity).map(|(_, record)| record))
    }

    /// Record a confirmed evaluation, applying the merge rule.
    ///
    /// New keys are appended unsubmitted. An existing record is replaced only
    /// by a strictly faster run of its already submitted answer.
    #[instrument(skip_all, fields(identity = %identity))]
    pub fn persist<A: Display>(
        &self,
        identity: ProblemIdentity,
        evaluation: &TimedEvaluation<A>,
    ) -> Result<MergeDecision> {
        let candidate = ResultRecord {
            identity,
            solution: evaluation.result.to_string(),
            duration_secs: evaluation.duration_secs(),
            recorded_at: Utc::now(),
            submitted: false,
        };
        let encoded = candidate.encode()?;

        let mut lines = self.store.read_lines()?;
        let existing = locate(&lines, identity);
        let decision = decide(existing.as_ref().map(|(_, record)| record), &candidate);
        match (decision, existing) {
            (MergeDecision::Insert, _) => {
                self.store.append_line(&encoded)?;
                info!(solution = %candidate.solution, duration_secs = candidate.duration_secs, "result recorded");
            }
            (MergeDecision::Replace, Some((index, existing))) => {
                lines[index] = replacement(&existing, &candidate).encode()?;
                self.store.write_lines(&lines)?;
                info!(
                    previous_secs = existing.duration_secs,
                    duration_secs = candidate.duration_secs,
                    "faster run replaced cached result"
                );
            }
            (MergeDecision::Replace, None) => {
                return Err(anyhow!("replace decided without an existing record"));
            }
            (MergeDecision::Keep, _) => {
                debug!(duration_secs = candidate.duration_secs, "cached result kept");
            }
        }
        Ok(decision)
    }

    /// Flag a cached result as submitted and accepted.
    ///
    /// Returns `false` when no record exists for `identity`.
    #[instrument(skip_all, fields(identity = %identity))]
    pub fn mark_submitted(&self, identity: ProblemIdentity) -> Result<bool> {
        let mut lines = self.store.read_lines()?;
        let Some((index, record)) = locate(&lines, identity) else {
            return Ok(false);
        };
        if record.submitted {
            debug!("result already submitted");
            return Ok(true);
        }
        lines[index] = ResultRecord {
            submitted: true,
            ..record
        }
        .encode()?;
        self.store.write_lines(&lines)?;
        info!("result marked submitted");
        Ok(true)
    }
}

/// Find the record for `identity` and its line index.
fn locate(lines: &[String], identity: ProblemIdentity) -> Option<(usize, ResultRecord)> {
    let mut found: Option<(usize, ResultRecord)> = None;
    for (index, line) in lines.iter().enumerate() {
        let Some(record) = parse_line(index, line) else {
            continue;
        };
        if record.identity != identity {
            continue;
        }
        if found.is_some() {
            warn!(%identity, line = index + 1, "duplicate cache record ignored");
            continue;
        }
        found = Some((index, record));
    }
    found
}

fn parse_line(index: usize, line: &str) -> Option<ResultRecord> {
    match ResultRecord::parse(line) {
        Ok(record) => Some(record),
        Err(err) => {
            warn!(line = index + 1, error = %format!("{err:#}"), "skipping malformed cache line");
            None
        }
    }
}
