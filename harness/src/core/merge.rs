//! Merge rule deciding whether a new observation replaces a cached record.
//!
//! A cached record is only ever replaced by a strictly faster run of the same,
//! already submitted answer. Everything else leaves the cache untouched.

use crate::core::record::ResultRecord;

/// What persisting a candidate record does to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDecision {
    /// No record exists for the key; the candidate is appended.
    Insert,
    /// The existing record is overwritten by the candidate.
    Replace,
    /// The existing record stays as it is; the candidate is discarded.
    Keep,
}

/// Decide how `candidate` merges with the `existing` record for the same key.
pub fn decide(existing: Option<&ResultRecord>, candidate: &ResultRecord) -> MergeDecision {
    let Some(existing) = existing else {
        return MergeDecision::Insert;
    };
    if existing.submitted
        && existing.solution == candidate.solution
        && existing.duration_secs > candidate.duration_secs
    {
        MergeDecision::Replace
    } else {
        MergeDecision::Keep
    }
}

/// Build the record that replaces `existing`.
///
/// The submitted flag is carried over; it is never cleared here.
pub fn replacement(existing: &ResultRecord, candidate: &ResultRecord) -> ResultRecord {
    ResultRecord {
        submitted: existing.submitted || candidate.submitted,
        ..candidate.clone()
    }
}
