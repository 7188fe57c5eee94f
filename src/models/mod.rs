use serde::{Deserialize, Serialize};
use std::fmt;

/// A question and its options, in the order voters see them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollDefinition {
    pub question: String,
    pub options: Vec<String>,
}

impl PollDefinition {
    pub fn new<Q, I, S>(question: Q, options: I) -> Self
    where
        Q: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionScore {
    pub option: String,
    pub votes: u64,
}

/// Snapshot of a poll's tallies at the moment it was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollResult {
    pub question: String,
    pub scores: Vec<OptionScore>,
}

impl PollResult {
    pub fn votes_for(&self, option: &str) -> Option<u64> {
        self.scores
            .iter()
            .find(|score| score.option == option)
            .map(|score| score.votes)
    }

    pub fn total_votes(&self) -> u64 {
        self.scores.iter().map(|score| score.votes).sum()
    }
}

impl fmt::Display for PollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.question)?;
        for score in &self.scores {
            write!(f, "\n{}: {} vote(s)", score.option, score.votes)?;
        }
        Ok(())
    }
}
