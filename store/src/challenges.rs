//! Filesystem-backed challenge cache and attempt log.
//!
//! Each challenge gets its own directory:
//!
//! ```text
//! <root>/<id>/challenge.json
//! <root>/<id>/in<ext>
//! <root>/<id>/out<ext>
//! <root>/<id>/attempts.jsonl
//! ```

use crate::{Paths, StoreError};
use std::{
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, Write},
    path::PathBuf,
};
use vimgolf_core::{Attempt, Challenge, ChallengeId, ChallengeStore};

const CHALLENGE_FILE: &str = "challenge.json";
const ATTEMPTS_FILE: &str = "attempts.jsonl";

#[derive(Debug, Clone)]
pub struct FsChallengeStore {
    root: PathBuf,
}

impl FsChallengeStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn open(paths: &Paths) -> Self {
        Self::new(paths.challenges_dir())
    }

    pub fn challenge_dir(&self, id: &ChallengeId) -> PathBuf {
        self.root.join(id.as_str())
    }

    fn attempts_path(&self, id: &ChallengeId) -> PathBuf {
        self.challenge_dir(id).join(ATTEMPTS_FILE)
    }
}

impl ChallengeStore for FsChallengeStore {
    type Error = StoreError;

    fn get(&self, id: &ChallengeId) -> Result<Option<Challenge>, StoreError> {
        let path = self.challenge_dir(id).join(CHALLENGE_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let file = File::open(&path)?;
        let challenge: Challenge = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(challenge))
    }

    fn put(&self, challenge: &Challenge) -> Result<(), StoreError> {
        let dir = self.challenge_dir(&challenge.id);
        std::fs::create_dir_all(&dir)?;

        let json = serde_json::to_string_pretty(challenge)?;
        std::fs::write(dir.join(CHALLENGE_FILE), json)?;
        std::fs::write(
            dir.join(challenge.input.file_name("in")),
            &challenge.input.text,
        )?;
        std::fs::write(
            dir.join(challenge.output.file_name("out")),
            &challenge.output.text,
        )?;

        tracing::debug!(challenge = %challenge.id, dir = %dir.display(), "challenge cached");
        Ok(())
    }

    fn append_attempt(&self, id: &ChallengeId, attempt: &Attempt) -> Result<(), StoreError> {
        std::fs::create_dir_all(self.challenge_dir(id))?;

        let mut line = serde_json::to_string(attempt)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.attempts_path(id))?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn list_attempts(&self, id: &ChallengeId) -> Result<Vec<Attempt>, StoreError> {
        let path = self.attempts_path(id);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&path)?);
        let mut attempts = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Attempt>(&line) {
                Ok(attempt) => attempts.push(attempt),
                // a line cut short by an interrupted write
                Err(err) => tracing::warn!(
                    path = %path.display(),
                    line = idx + 1,
                    "skipping unreadable attempt: {}",
                    err
                ),
            }
        }

        attempts.sort_by_key(|attempt| attempt.timestamp);
        Ok(attempts)
    }
}
