//! Example answer classification.

use crate::core::types::TimedEvaluation;

/// Whether an example evaluation produced the expected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleVerdict {
    Match,
    Mismatch,
}

/// Compare an evaluation's answer to the expected value by plain equality.
pub fn validate<A: PartialEq>(evaluation: &TimedEvaluation<A>, expected: &A) -> ExampleVerdict {
    if evaluation.result == *expected {
        ExampleVerdict::Match
    } else {
        ExampleVerdict::Mismatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn evaluation<A>(result: A) -> TimedEvaluation<A> {
        TimedEvaluation {
            result,
            duration: Duration::from_millis(3),
        }
    }

    #[test]
    fn equal_answers_match() {
        assert_eq!(validate(&evaluation(2u64), &2), ExampleVerdict::Match);
        assert_eq!(
            validate(&evaluation("abc".to_string()), &"abc".to_string()),
            ExampleVerdict::Match
        );
    }

    #[test]
    fn no_tolerance_on_close_answers() {
        assert_eq!(validate(&evaluation(2u64), &3), ExampleVerdict::Mismatch);
        assert_eq!(validate(&evaluation(0.1f64 + 0.2), &0.3), ExampleVerdict::Mismatch);
    }
}
