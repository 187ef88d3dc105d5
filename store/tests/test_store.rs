use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;
use vimgolf_core::{
    Attempt, AttemptRecorder, Challenge, ChallengeId, ChallengeStore, Document, Evaluation, Keys,
    ListingEntry, annotate,
};
use vimgolf_store::{ApiKey, FsChallengeStore, IdLookup, Paths, StoreError};

fn store() -> (TempDir, FsChallengeStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = FsChallengeStore::open(&Paths::under(dir.path()));
    (dir, store)
}

fn challenge(id: &str) -> Challenge {
    let mut challenge = Challenge::new(
        ChallengeId::new(id).unwrap(),
        Document::new("hello\nworld\n", ".rb"),
        Document::new("world\n", ".rb"),
    );
    challenge.title = Some("Delete a line".to_string());
    challenge.client = Some("0.5.0".to_string());
    challenge
}

fn attempt(keys: &str, correct: bool, minutes: i64) -> Attempt {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    Attempt::new(
        &Keys::from_notation(keys).unwrap(),
        correct,
        false,
        start + Duration::minutes(minutes),
    )
}

#[test]
fn test_put_then_get_round_trips() {
    let (_dir, store) = store();
    let challenge = challenge("abc123");
    store.put(&challenge).unwrap();

    assert_eq!(store.get(&challenge.id).unwrap(), Some(challenge.clone()));

    let dir = store.challenge_dir(&challenge.id);
    assert_eq!(
        std::fs::read_to_string(dir.join("in.rb")).unwrap(),
        "hello\nworld\n"
    );
    assert_eq!(std::fs::read_to_string(dir.join("out.rb")).unwrap(), "world\n");
}

#[test]
fn test_put_overwrites_earlier_copy() {
    let (_dir, store) = store();
    let mut challenge = challenge("abc123");
    store.put(&challenge).unwrap();
    challenge.description = Some("Now with a description".to_string());
    store.put(&challenge).unwrap();

    let cached = store.get(&challenge.id).unwrap().unwrap();
    assert_eq!(cached.description.as_deref(), Some("Now with a description"));
}

#[test]
fn test_missing_challenge_is_not_an_error() {
    let (_dir, store) = store();
    let id = ChallengeId::new("abc123").unwrap();
    assert_eq!(store.get(&id).unwrap(), None);
    assert!(store.list_attempts(&id).unwrap().is_empty());
}

#[test]
fn test_attempts_append_without_a_cached_challenge() {
    let (_dir, store) = store();
    let id = ChallengeId::new("abc123").unwrap();
    store.append_attempt(&id, &attempt("dd", true, 0)).unwrap();
    store.append_attempt(&id, &attempt("x", false, 1)).unwrap();

    let attempts = store.list_attempts(&id).unwrap();
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0].keys, "dd");
    assert_eq!(attempts[1].keys, "x");
    assert_eq!(store.get(&id).unwrap(), None);
}

#[test]
fn test_attempts_are_ordered_by_timestamp() {
    let (_dir, store) = store();
    let id = ChallengeId::new("abc123").unwrap();
    store.append_attempt(&id, &attempt("late", true, 5)).unwrap();
    store.append_attempt(&id, &attempt("early", true, 1)).unwrap();
    store.append_attempt(&id, &attempt("tie", false, 5)).unwrap();

    let keys: Vec<String> = store
        .list_attempts(&id)
        .unwrap()
        .into_iter()
        .map(|attempt| attempt.keys)
        .collect();
    assert_eq!(keys, vec!["early", "late", "tie"]);
}

#[test]
fn test_truncated_attempt_line_is_skipped() {
    let (_dir, store) = store();
    let id = ChallengeId::new("abc123").unwrap();
    store.append_attempt(&id, &attempt("dd", true, 0)).unwrap();

    let path = store.challenge_dir(&id).join("attempts.jsonl");
    let mut contents = std::fs::read_to_string(&path).unwrap();
    contents.push_str("{\"keys\":\"x\",\"corr");
    std::fs::write(&path, contents).unwrap();

    assert_eq!(store.list_attempts(&id).unwrap().len(), 1);
}

#[test]
fn test_id_lookup_persists() {
    let dir = tempfile::tempdir().unwrap();
    let paths = Paths::under(dir.path());
    assert!(IdLookup::load(&paths.id_lookup_path()).unwrap().is_empty());

    let lookup = IdLookup::from_rows([(1, ChallengeId::new("abc123").unwrap())]);
    lookup.save(&paths.id_lookup_path()).unwrap();

    let loaded = IdLookup::load(&paths.id_lookup_path()).unwrap();
    assert_eq!(loaded.expand("+1").map(ChallengeId::as_str), Some("abc123"));
}

#[test]
fn test_api_key_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = Paths::under(dir.path()).api_key_path();
    assert_eq!(ApiKey::load(&path).unwrap(), None);

    let key = ApiKey::new("0123456789abcdef0123456789abcdef").unwrap();
    key.save(&path).unwrap();
    assert_eq!(ApiKey::load(&path).unwrap(), Some(key));

    std::fs::write(&path, "not a key").unwrap();
    assert_eq!(ApiKey::load(&path).unwrap(), None);
}

#[test]
fn test_unreadable_challenge_file_is_an_error() {
    let (_dir, store) = store();
    let id = ChallengeId::new("abc123").unwrap();
    std::fs::create_dir_all(store.challenge_dir(&id)).unwrap();
    std::fs::write(store.challenge_dir(&id).join("challenge.json"), "{").unwrap();
    assert!(matches!(store.get(&id), Err(StoreError::Json(_))));
}

#[test]
fn test_recorded_attempts_annotate_listing() {
    let (_dir, store) = store();
    let played = challenge("abc123");
    store.put(&played).unwrap();

    // a correct local play with `dd`
    let recorder = AttemptRecorder::new(&store);
    let local = Evaluation::new(Keys::from_notation("dd").unwrap(), b"world\n", b"world\n");
    let attempt = recorder.record(&played.id, &local).unwrap();
    assert!(attempt.correct);
    assert!(!attempt.submitted);

    // a tracked submission scoring 5
    let mut submitted =
        Evaluation::new(Keys::from_notation("dWZZ:").unwrap(), b"world\n", b"world\n");
    assert!(submitted.mark_submitted());
    recorder.record(&played.id, &submitted).unwrap();

    let entries = vec![
        ListingEntry {
            id: played.id.clone(),
            name: "Delete a line".to_string(),
            entries: Some(3),
        },
        ListingEntry {
            id: ChallengeId::new("def456").unwrap(),
            name: "Untouched".to_string(),
            entries: None,
        },
    ];
    let rows = annotate(entries, &store).unwrap();

    assert_eq!(rows[0].position, 1);
    assert!(rows[0].played);
    assert!(rows[0].submitted);
    assert_eq!(rows[0].best_score, Some(2));
    assert_eq!(store.list_attempts(&played.id).unwrap().len(), 2);

    assert_eq!(rows[1].position, 2);
    assert!(!rows[1].played);
    assert!(!rows[1].submitted);
    assert_eq!(rows[1].best_score, None);
    assert!(store.list_attempts(&rows[1].entry.id).unwrap().is_empty());
}

#[test]
fn test_listing_after_tracked_submission() {
    let (_dir, store) = store();
    let id = ChallengeId::new("abc123").unwrap();
    let mut evaluation =
        Evaluation::new(Keys::from_notation("dWZZ:").unwrap(), b"x\n", b"x\n");
    evaluation.mark_submitted();
    AttemptRecorder::new(&store).record(&id, &evaluation).unwrap();

    let entry = ListingEntry {
        id,
        name: "Delete".to_string(),
        entries: None,
    };
    let rows = annotate(vec![entry], &store).unwrap();
    assert!(rows[0].played);
    assert!(rows[0].submitted);
    assert_eq!(rows[0].best_score, Some(5));
}
