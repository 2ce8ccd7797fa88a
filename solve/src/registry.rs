//! Static table of the solutions `solve` knows how to run.

use harness::core::types::{ExampleSpec, Part, ProblemIdentity};
use harness::execute::Harness;
use harness::io::store::ResultsStore;

use crate::solutions::{y2021_d01, y2023_d01};

/// Runs one registered solution through the harness; `true` if it produced an answer.
pub type RunFn<S> = fn(&Harness<S>, ProblemIdentity) -> bool;

pub struct Solution<S> {
    pub year: u16,
    pub day: u8,
    pub part: Part,
    pub title: &'static str,
    pub run: RunFn<S>,
}

impl<S> Solution<S> {
    pub fn matches(&self, identity: ProblemIdentity) -> bool {
        self.year == identity.year && self.day == identity.day && self.part == identity.part
    }
}

/// All registered solutions, ordered by year, day and part.
pub fn solutions<S: ResultsStore>() -> Vec<Solution<S>> {
    vec![
        Solution {
            year: 2021,
            day: 1,
            part: Part::One,
            title: "Sonar Sweep",
            run: |harness, identity| {
                harness
                    .run(identity, &ExampleSpec::Primary(7), &y2021_d01::part1)
                    .is_some()
            },
        },
        Solution {
            year: 2021,
            day: 1,
            part: Part::Two,
            title: "Sonar Sweep",
            run: |harness, identity| {
                harness
                    .run(identity, &ExampleSpec::Primary(5), &y2021_d01::part2)
                    .is_some()
            },
        },
        Solution {
            year: 2023,
            day: 1,
            part: Part::One,
            title: "Trebuchet?!",
            run: |harness, identity| {
                harness
                    .run(identity, &ExampleSpec::Primary(142), &y2023_d01::part1)
                    .is_some()
            },
        },
        Solution {
            year: 2023,
            day: 1,
            part: Part::Two,
            title: "Trebuchet?!",
            run: |harness, identity| {
                harness
                    .run(identity, &ExampleSpec::Secondary(281), &y2023_d01::part2)
                    .is_some()
            },
        },
    ]
}

pub fn find<S: ResultsStore>(identity: ProblemIdentity) -> Option<Solution<S>> {
    solutions()
        .into_iter()
        .find(|solution| solution.matches(identity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use harness::io::store::MemoryResultsStore;

    #[test]
    fn registry_is_sorted_and_unique() {
        let keys: Vec<(u16, u8, Part)> = solutions::<MemoryResultsStore>()
            .iter()
            .map(|solution| (solution.year, solution.day, solution.part))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn finds_registered_identity() {
        let identity = ProblemIdentity::new(2023, 1, 2).expect("identity");
        let solution = find::<MemoryResultsStore>(identity).expect("solution");
        assert_eq!(solution.title, "Trebuchet?!");
        assert!(find::<MemoryResultsStore>(ProblemIdentity::new(2023, 2, 1).expect("identity")).is_none());
    }
}
