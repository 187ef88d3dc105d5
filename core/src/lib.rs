pub mod attempt;
pub mod challenge;
pub mod keys;
pub mod listing;
pub mod recorder;
pub mod store;

pub use attempt::{Attempt, AttemptSummary, best_score};
pub use challenge::{
    Challenge, ChallengeId, ChallengeIdError, Document, normalize_text, sanitize_extension,
};
pub use keys::{KeyToken, Keys, KeysError};
pub use listing::{ListingEntry, ListingRow, annotate};
pub use recorder::{AttemptRecorder, Evaluation};
pub use store::ChallengeStore;
