use crate::error::PollError;
use crate::models::{OptionScore, PollDefinition, PollResult};
use log::{debug, info, warn};
use std::collections::HashSet;
use uuid::Uuid;

/// Tallies votes for one poll. The option list is fixed at construction;
/// only the per-option counts change afterwards.
#[derive(Debug)]
pub struct PollCounter {
    id: String,
    question: String,
    options: Vec<String>,
    scores: Vec<u64>,
    rejected: u64,
}

// A copy is a separate poll as far as the logs are concerned
impl Clone for PollCounter {
    fn clone(&self) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            question: self.question.clone(),
            options: self.options.clone(),
            scores: self.scores.clone(),
            rejected: self.rejected,
        }
    }
}

impl PollCounter {
    pub fn new(definition: PollDefinition) -> Result<Self, PollError> {
        let PollDefinition { question, options } = definition;

        if options.is_empty() {
            return Err(PollError::NoOptions);
        }

        // Labels double as keys in the snapshot, so each must be unique
        let mut seen = HashSet::new();
        for option in &options {
            if !seen.insert(option.as_str()) {
                return Err(PollError::DuplicateOption(option.clone()));
            }
        }

        let id = Uuid::new_v4().to_string();
        info!(
            "Created poll {} '{}' with {} option(s)",
            id,
            question,
            options.len()
        );

        Ok(Self {
            id,
            question,
            scores: vec![0; options.len()],
            options,
            rejected: 0,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    // Construction guarantees at least one option
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn total_votes(&self) -> u64 {
        self.scores.iter().sum()
    }

    /// Number of vote attempts that were turned away.
    pub fn rejected_votes(&self) -> u64 {
        self.rejected
    }

    /// Counts one vote for the 1-based `option_number`, or returns
    /// `InvalidOptionIndex`. A rejected call changes nothing, not even
    /// the rejected tally; that is left to [`PollCounter::vote`].
    pub fn try_vote(&mut self, option_number: i64) -> Result<(), PollError> {
        // Map the 1-based number onto a slot, dropping anything out of range
        let index = usize::try_from(option_number)
            .ok()
            .filter(|n| (1..=self.options.len()).contains(n))
            .map(|n| n - 1);

        let Some(i) = index else {
            return Err(PollError::InvalidOptionIndex {
                given: option_number.to_string(),
                max: self.options.len(),
            });
        };

        self.scores[i] += 1;
        debug!(
            "Poll {}: vote for '{}' ({} total)",
            self.id, self.options[i], self.scores[i]
        );
        Ok(())
    }

    /// Casts a vote and returns the resulting snapshot. An out-of-range
    /// number is logged and ignored; the snapshot is returned either way.
    pub fn vote(&mut self, option_number: i64) -> PollResult {
        match self.try_vote(option_number) {
            Ok(()) => self.snapshot(),
            Err(_) => self.reject(&option_number.to_string()),
        }
    }

    /// Like [`PollCounter::vote`], for raw text input. Anything that does not
    /// parse as an integer is rejected the same way as an out-of-range number.
    pub fn vote_input(&mut self, input: &str) -> PollResult {
        match input.trim().parse::<i64>() {
            Ok(number) => self.vote(number),
            Err(_) => self.reject(input),
        }
    }

    /// Records a vote attempt that could not be counted, for callers that
    /// received something other than an option number.
    pub fn reject(&mut self, given: &str) -> PollResult {
        self.rejected += 1;
        let e = PollError::InvalidOptionIndex {
            given: given.to_string(),
            max: self.options.len(),
        };
        warn!("Poll {}: {}", self.id, e);
        self.snapshot()
    }

    pub fn snapshot(&self) -> PollResult {
        PollResult {
            question: self.question.clone(),
            scores: self
                .options
                .iter()
                .zip(&self.scores)
                .map(|(option, votes)| OptionScore {
                    option: option.clone(),
                    votes: *votes,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> PollCounter {
        PollCounter::new(PollDefinition::new("Pick one", ["A", "B", "C"])).unwrap()
    }

    fn counts(result: &PollResult) -> Vec<u64> {
        result.scores.iter().map(|s| s.votes).collect()
    }

    #[test]
    fn test_new_starts_at_zero() {
        let poll = abc();
        assert_eq!(counts(&poll.snapshot()), vec![0, 0, 0]);
        assert_eq!(poll.len(), 3);
        assert!(!poll.is_empty());
        assert_eq!(poll.question(), "Pick one");
    }

    #[test]
    fn test_new_rejects_empty_options() {
        let err = PollCounter::new(PollDefinition::new("Q", Vec::<String>::new())).unwrap_err();
        assert!(matches!(err, PollError::NoOptions));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let err = PollCounter::new(PollDefinition::new("Q", ["A", "B", "A"])).unwrap_err();
        assert!(matches!(err, PollError::DuplicateOption(ref o) if o == "A"));
    }

    #[test]
    fn test_vote_example_sequence() {
        let mut poll = abc();
        poll.vote(1);
        poll.vote(3);
        poll.vote(3);
        let result = poll.vote(0);
        assert_eq!(counts(&result), vec![1, 0, 2]);
        assert_eq!(poll.total_votes(), 3);
        assert_eq!(poll.rejected_votes(), 1);
    }

    #[test]
    fn test_each_valid_index_increments_only_itself() {
        for i in 1..=3 {
            let mut poll = abc();
            let result = poll.vote(i);
            for (pos, votes) in counts(&result).into_iter().enumerate() {
                let expected = if pos as i64 == i - 1 { 1 } else { 0 };
                assert_eq!(votes, expected, "vote({}) at position {}", i, pos);
            }
        }
    }

    #[test]
    fn test_invalid_indices_leave_state_unchanged() {
        let mut poll = abc();
        poll.vote(2);
        let before = poll.snapshot();
        for bad in [0, -1, 4, i64::MIN, i64::MAX] {
            assert_eq!(poll.vote(bad), before);
        }
        assert_eq!(poll.rejected_votes(), 5);
    }

    #[test]
    fn test_try_vote_reports_error() {
        let mut poll = abc();
        let err = poll.try_vote(4).unwrap_err();
        match err {
            PollError::InvalidOptionIndex { given, max } => {
                assert_eq!(given, "4");
                assert_eq!(max, 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(poll.try_vote(3).is_ok());
    }

    #[test]
    fn test_try_vote_does_not_count_rejections() {
        let mut poll = abc();
        assert!(poll.try_vote(0).is_err());
        assert!(poll.try_vote(-2).is_err());
        assert_eq!(poll.rejected_votes(), 0);
        assert_eq!(poll.total_votes(), 0);

        poll.vote(0);
        assert_eq!(poll.rejected_votes(), 1);
    }

    #[test]
    fn test_reject_counts_and_returns_snapshot() {
        let mut poll = abc();
        poll.vote(2);
        let result = poll.reject("null");
        assert_eq!(counts(&result), vec![0, 1, 0]);
        assert_eq!(poll.rejected_votes(), 1);
    }

    #[test]
    fn test_clone_gets_its_own_id() {
        let mut poll = abc();
        poll.vote(1);
        let copy = poll.clone();
        assert_ne!(copy.id(), poll.id());
        assert_eq!(copy.snapshot(), poll.snapshot());
        assert_eq!(copy.options(), poll.options());
    }

    #[test]
    fn test_vote_input_parses_integers() {
        let mut poll = abc();
        poll.vote_input(" 2 ");
        let result = poll.vote_input("3");
        assert_eq!(counts(&result), vec![0, 1, 1]);
    }

    #[test]
    fn test_vote_input_rejects_non_integers() {
        let mut poll = abc();
        for bad in ["2.5", "abc", "", "1e0", "0"] {
            poll.vote_input(bad);
        }
        assert_eq!(poll.total_votes(), 0);
        assert_eq!(poll.rejected_votes(), 5);
    }

    #[test]
    fn test_snapshot_is_stable() {
        let mut poll = abc();
        poll.vote(1);
        let first = poll.snapshot();
        let second = poll.snapshot();
        assert_eq!(first, second);
        assert_eq!(poll.total_votes(), 1);
    }

    #[test]
    fn test_snapshot_keeps_definition_order() {
        let mut poll = PollCounter::new(PollDefinition::new("Q", ["z", "a", "m"])).unwrap();
        poll.vote(3);
        let snapshot = poll.snapshot();
        let labels: Vec<&str> = snapshot.scores.iter().map(|s| s.option.as_str()).collect();
        assert_eq!(labels, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_counters_are_independent() {
        let mut first = abc();
        let mut second = PollCounter::new(PollDefinition::new("Other", ["Oui", "Non"])).unwrap();
        first.vote(1);
        second.vote(2);
        second.vote(2);
        assert_eq!(counts(&first.snapshot()), vec![1, 0, 0]);
        assert_eq!(counts(&second.snapshot()), vec![0, 2]);
        assert_ne!(first.id(), second.id());
    }
}
