use crate::{Attempt, Challenge, ChallengeId};

/// Persistence of challenges and their attempt history, keyed by id.
///
/// A missing challenge is not an error: `get` returns `Ok(None)`. Errors are
/// reserved for storage failures.
pub trait ChallengeStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get(&self, id: &ChallengeId) -> Result<Option<Challenge>, Self::Error>;

    /// Cache a challenge, replacing an earlier copy.
    fn put(&self, challenge: &Challenge) -> Result<(), Self::Error>;

    fn append_attempt(&self, id: &ChallengeId, attempt: &Attempt) -> Result<(), Self::Error>;

    /// Attempts in the order they were made.
    fn list_attempts(&self, id: &ChallengeId) -> Result<Vec<Attempt>, Self::Error>;
}
