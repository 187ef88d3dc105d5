//! Turning a finished editor session into an attempt record.

use crate::{Attempt, ChallengeId, ChallengeStore, Keys};
use chrono::{DateTime, Utc};

/// Outcome of one editor session before it is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    keys: Keys,
    correct: bool,
    submitted: bool,
}

impl Evaluation {
    /// Compare the edited text with the expected output, byte for byte.
    pub fn new(keys: Keys, expected: &[u8], actual: &[u8]) -> Self {
        Self {
            keys,
            correct: expected == actual,
            submitted: false,
        }
    }

    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    pub fn correct(&self) -> bool {
        self.correct
    }

    pub fn score(&self) -> u32 {
        self.keys.score()
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    /// Correct and not yet submitted.
    pub fn can_submit(&self) -> bool {
        self.correct && !self.submitted
    }

    /// Note a successful submission. Incorrect entries are never marked.
    pub fn mark_submitted(&mut self) -> bool {
        if self.correct {
            self.submitted = true;
        }
        self.submitted
    }
}

/// Appends evaluated sessions to a challenge's history.
pub struct AttemptRecorder<'a, S> {
    store: &'a S,
}

impl<'a, S: ChallengeStore> AttemptRecorder<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Record an evaluation with the current time.
    pub fn record(&self, id: &ChallengeId, evaluation: &Evaluation) -> Result<Attempt, S::Error> {
        self.record_at(id, evaluation, Utc::now())
    }

    pub fn record_at(
        &self,
        id: &ChallengeId,
        evaluation: &Evaluation,
        timestamp: DateTime<Utc>,
    ) -> Result<Attempt, S::Error> {
        let attempt = Attempt::new(
            &evaluation.keys,
            evaluation.correct,
            evaluation.submitted,
            timestamp,
        );
        self.store.append_attempt(id, &attempt)?;
        tracing::debug!(
            challenge = %id,
            correct = attempt.correct,
            score = attempt.score,
            submitted = attempt.submitted,
            "attempt recorded"
        );
        Ok(attempt)
    }
}
