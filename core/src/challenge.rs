use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Length of the identifiers vimgolf.com hands out.
pub const REMOTE_ID_LEN: usize = 24;

const MAX_ID_LEN: usize = 64;
const LOCAL_PREFIX: &str = "local-";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChallengeIdError {
    #[error("challenge id is empty")]
    Empty,
    #[error("challenge id `{0}` is longer than {MAX_ID_LEN} characters")]
    TooLong(String),
    #[error("challenge id `{0}` may only contain letters, digits, '-' and '_'")]
    InvalidChar(String),
    #[error("`{0}` is not a vimgolf.com challenge id")]
    NotRemote(String),
}

/// Identifier a challenge is stored under.
///
/// Either a vimgolf.com id (24 word characters) or a locally assigned
/// alias. Ids are used as directory names, so only `[A-Za-z0-9_-]` is
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChallengeId(String);

impl ChallengeId {
    pub fn new(id: impl Into<String>) -> Result<Self, ChallengeIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ChallengeIdError::Empty);
        }
        if id.len() > MAX_ID_LEN {
            return Err(ChallengeIdError::TooLong(id));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ChallengeIdError::InvalidChar(id));
        }
        Ok(Self(id))
    }

    /// Parse an id that must name a vimgolf.com challenge.
    pub fn remote(id: impl Into<String>) -> Result<Self, ChallengeIdError> {
        let id = Self::new(id)?;
        if id.is_remote() {
            Ok(id)
        } else {
            Err(ChallengeIdError::NotRemote(id.0))
        }
    }

    /// Alias for a challenge played from local files.
    ///
    /// Derived from the texts, so replaying the same files keeps adding to
    /// the same history.
    pub fn local(input: &str, output: &str) -> Self {
        Self(format!("{LOCAL_PREFIX}{:016x}", local_hash(input, output)))
    }

    pub fn is_remote(&self) -> bool {
        self.0.len() == REMOTE_ID_LEN
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    pub fn is_local(&self) -> bool {
        self.0.starts_with(LOCAL_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 64-bit FNV-1a over `input`, a NUL separator and `output`.
fn local_hash(input: &str, output: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    input
        .bytes()
        .chain(std::iter::once(0))
        .chain(output.bytes())
        .fold(OFFSET, |hash, b| (hash ^ u64::from(b)).wrapping_mul(PRIME))
}

impl fmt::Display for ChallengeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ChallengeId {
    type Error = ChallengeIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChallengeId> for String {
    fn from(id: ChallengeId) -> Self {
        id.0
    }
}

/// Convert to Unix line endings and make sure the text ends with a newline.
pub fn normalize_text(text: &str) -> String {
    let mut text = text.replace("\r\n", "\n").replace('\r', "\n");
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Turn a file type such as `rb` or `c++` into an extension (`.rb`, `.c__`).
pub fn sanitize_extension(file_type: &str) -> String {
    let cleaned: String = file_type
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(".{}", cleaned)
}

/// One side of a challenge: the text and the extension its file gets, so
/// that the editor picks the right filetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    #[serde(default)]
    pub extension: String,
}

impl Document {
    /// Build a document, normalizing the text.
    pub fn new(text: &str, extension: impl Into<String>) -> Self {
        Self {
            text: normalize_text(text),
            extension: extension.into(),
        }
    }

    /// File name for this side, e.g. `in.rb`.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}{}", stem, self.extension)
    }
}

/// A cached challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: ChallengeId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub input: Document,
    pub output: Document,
    /// Client version the service declared when this was fetched.
    #[serde(default)]
    pub client: Option<String>,
    pub cached_at: DateTime<Utc>,
}

impl Challenge {
    pub fn new(id: ChallengeId, input: Document, output: Document) -> Self {
        Self {
            id,
            title: None,
            description: None,
            input,
            output,
            client: None,
            cached_at: Utc::now(),
        }
    }

    /// Name to show for this challenge, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(self.id.as_str())
    }
}
