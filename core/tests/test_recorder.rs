use chrono::{Duration, TimeZone, Utc};
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use vimgolf_core::{
    Attempt, AttemptRecorder, Challenge, ChallengeId, ChallengeStore, Document, Evaluation, Keys,
    ListingEntry, annotate, best_score,
};

/// Store keeping everything in memory.
#[derive(Default)]
struct MemoryStore {
    challenges: RefCell<HashMap<ChallengeId, Challenge>>,
    attempts: RefCell<HashMap<ChallengeId, Vec<Attempt>>>,
}

impl ChallengeStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, id: &ChallengeId) -> Result<Option<Challenge>, Self::Error> {
        Ok(self.challenges.borrow().get(id).cloned())
    }

    fn put(&self, challenge: &Challenge) -> Result<(), Self::Error> {
        self.challenges
            .borrow_mut()
            .insert(challenge.id.clone(), challenge.clone());
        Ok(())
    }

    fn append_attempt(&self, id: &ChallengeId, attempt: &Attempt) -> Result<(), Self::Error> {
        self.attempts
            .borrow_mut()
            .entry(id.clone())
            .or_default()
            .push(attempt.clone());
        Ok(())
    }

    fn list_attempts(&self, id: &ChallengeId) -> Result<Vec<Attempt>, Self::Error> {
        Ok(self.attempts.borrow().get(id).cloned().unwrap_or_default())
    }
}

fn id(s: &str) -> ChallengeId {
    ChallengeId::new(s).unwrap()
}

fn keys(notation: &str) -> Keys {
    Keys::from_notation(notation).unwrap()
}

#[test]
fn test_local_play_records_one_unsubmitted_attempt() {
    let store = MemoryStore::default();
    let challenge = Challenge::new(
        id("abc123"),
        Document::new("hello\nworld\n", ".txt"),
        Document::new("world\n", ".txt"),
    );
    store.put(&challenge).unwrap();

    // the editor turned the input into the expected output with `dd`
    let evaluation = Evaluation::new(keys("dd"), b"world\n", b"world\n");
    AttemptRecorder::new(&store)
        .record(&challenge.id, &evaluation)
        .unwrap();

    let attempts = store.list_attempts(&challenge.id).unwrap();
    assert_eq!(attempts.len(), 1);
    assert!(attempts[0].correct);
    assert!(!attempts[0].submitted);
    assert_eq!(attempts[0].keys, "dd");
    assert_eq!(attempts[0].score, 2);
}

#[test]
fn test_correctness_matches_byte_equality() {
    let store = MemoryStore::default();
    let recorder = AttemptRecorder::new(&store);
    let challenge_id = id("abc123");
    let outputs: [(&[u8], &[u8]); 4] = [
        (b"a\n", b"a\n"),
        (b"a\n", b"a"),
        (b"a\n", b"A\n"),
        (b"", b""),
    ];

    for (expected, actual) in outputs {
        recorder
            .record(&challenge_id, &Evaluation::new(keys("x"), expected, actual))
            .unwrap();
    }

    let correct: Vec<bool> = store
        .list_attempts(&challenge_id)
        .unwrap()
        .iter()
        .map(|attempt| attempt.correct)
        .collect();
    assert_eq!(correct, vec![true, false, false, true]);
}

#[test]
fn test_failed_submission_is_still_recorded() {
    let store = MemoryStore::default();
    let challenge_id = id("abc123");
    let evaluation = Evaluation::new(keys("dd"), b"x\n", b"x\n");
    // upload failed: the evaluation is never marked
    let attempt = AttemptRecorder::new(&store)
        .record(&challenge_id, &evaluation)
        .unwrap();
    assert!(attempt.correct);
    assert!(!attempt.submitted);
    assert_eq!(store.list_attempts(&challenge_id).unwrap(), vec![attempt]);
}

#[test]
fn test_best_score_only_counts_correct_attempts() {
    let store = MemoryStore::default();
    let recorder = AttemptRecorder::new(&store);
    let challenge_id = id("abc123");
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let sessions = [("dd", false), ("ddjddZZ", true), ("x", false), ("dGZZ", true)];
    for (idx, (notation, correct)) in sessions.into_iter().enumerate() {
        let actual: &[u8] = if correct { b"ok\n" } else { b"nope\n" };
        recorder
            .record_at(
                &challenge_id,
                &Evaluation::new(keys(notation), b"ok\n", actual),
                start + Duration::minutes(idx as i64),
            )
            .unwrap();
    }

    let attempts = store.list_attempts(&challenge_id).unwrap();
    assert_eq!(best_score(&attempts), Some(4));
}

#[test]
fn test_listing_after_tracked_submission() {
    let store = MemoryStore::default();
    let played = id("abc123");
    let fresh = id("def456");

    let mut evaluation = Evaluation::new(keys("dWZZ:"), b"ok\n", b"ok\n");
    assert!(evaluation.mark_submitted());
    AttemptRecorder::new(&store)
        .record(&played, &evaluation)
        .unwrap();

    let page = vec![
        ListingEntry {
            id: fresh.clone(),
            name: "Fresh".to_string(),
            entries: Some(3),
        },
        ListingEntry {
            id: played.clone(),
            name: "Played".to_string(),
            entries: None,
        },
    ];
    let rows = annotate(page, &store).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].position, 1);
    assert_eq!(rows[0].entry.id, fresh);
    assert!(!rows[0].played);
    assert_eq!(rows[0].best_score, None);

    assert_eq!(rows[1].position, 2);
    assert!(rows[1].played);
    assert!(rows[1].submitted);
    assert_eq!(rows[1].best_score, Some(5));
}

#[test]
fn test_listing_marks_played_even_without_correct_attempts() {
    let store = MemoryStore::default();
    let challenge_id = id("abc123");
    AttemptRecorder::new(&store)
        .record(&challenge_id, &Evaluation::new(keys("ZQ"), b"a\n", b"b\n"))
        .unwrap();

    let rows = annotate(
        vec![ListingEntry {
            id: challenge_id,
            name: "Only failures".to_string(),
            entries: Some(1),
        }],
        &store,
    )
    .unwrap();
    assert!(rows[0].played);
    assert!(!rows[0].submitted);
    assert_eq!(rows[0].best_score, None);
}
