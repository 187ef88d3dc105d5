use crate::Keys;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded play-through of a challenge.
///
/// Attempts are append-only: once written to a store they are never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    /// Key representations joined together, e.g. `dd:wq<CR>`.
    pub keys: String,
    pub correct: bool,
    /// Number of key presses. Only meaningful when `correct`.
    pub score: u32,
    #[serde(default)]
    pub submitted: bool,
    pub timestamp: DateTime<Utc>,
}

impl Attempt {
    pub fn new(keys: &Keys, correct: bool, submitted: bool, timestamp: DateTime<Utc>) -> Self {
        Self {
            keys: keys.to_string(),
            correct,
            score: keys.score(),
            submitted,
            timestamp,
        }
    }

    /// Whether the session ended with `ZQ`, i.e. quitting without saving.
    pub fn is_abandoned(&self) -> bool {
        self.keys.ends_with("ZQ")
    }
}

/// Lowest score among the correct attempts.
pub fn best_score(attempts: &[Attempt]) -> Option<u32> {
    attempts
        .iter()
        .filter(|attempt| attempt.correct)
        .map(|attempt| attempt.score)
        .min()
}

/// Aggregate view of a challenge's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttemptSummary {
    pub attempts: usize,
    pub correct: usize,
    pub submitted: usize,
    pub best_score: Option<u32>,
}

impl AttemptSummary {
    pub fn from_attempts(attempts: &[Attempt]) -> Self {
        Self {
            attempts: attempts.len(),
            correct: attempts.iter().filter(|a| a.correct).count(),
            submitted: attempts.iter().filter(|a| a.submitted).count(),
            best_score: best_score(attempts),
        }
    }

    pub fn played(&self) -> bool {
        self.attempts > 0
    }
}
