//! Annotating a remote challenge listing with local history.

use crate::{AttemptSummary, ChallengeId, ChallengeStore};

/// A challenge as it appears on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub id: ChallengeId,
    pub name: String,
    /// Number of entries the service reports, when the page shows it.
    pub entries: Option<u32>,
}

/// A listing entry combined with what the local store knows about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    /// 1-based position on the page, used for `+N` shortcuts.
    pub position: usize,
    pub entry: ListingEntry,
    /// The store holds at least one attempt.
    pub played: bool,
    /// At least one attempt was submitted.
    pub submitted: bool,
    pub best_score: Option<u32>,
}

/// Merge a listing page with the store, keeping the page order.
///
/// Reads the store only; nothing is written.
pub fn annotate<S: ChallengeStore>(
    entries: Vec<ListingEntry>,
    store: &S,
) -> Result<Vec<ListingRow>, S::Error> {
    entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            let attempts = store.list_attempts(&entry.id)?;
            let summary = AttemptSummary::from_attempts(&attempts);
            Ok(ListingRow {
                position: idx + 1,
                entry,
                played: summary.played(),
                submitted: summary.submitted > 0,
                best_score: summary.best_score,
            })
        })
        .collect()
}
