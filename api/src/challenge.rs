//! The JSON form of a challenge served at `/challenges/<id>.json`.

use crate::Compliance;
use serde::Deserialize;
use vimgolf_core::{Challenge, ChallengeId, Document, sanitize_extension};

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteDocument {
    pub data: String,
    /// File type such as `rb` or `txt`.
    #[serde(rename = "type", default)]
    pub file_type: String,
}

impl RemoteDocument {
    fn into_document(self) -> Document {
        let extension = if self.file_type.is_empty() {
            String::new()
        } else {
            sanitize_extension(&self.file_type)
        };
        Document::new(&self.data, extension)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteChallenge {
    #[serde(rename = "in")]
    pub input: RemoteDocument,
    #[serde(rename = "out")]
    pub output: RemoteDocument,
    /// Client version the service accepts entries from.
    #[serde(default)]
    pub client: Option<String>,
}

impl RemoteChallenge {
    pub fn compliance(&self) -> Compliance {
        Compliance::check(self.client.as_deref())
    }

    /// Build the cached form, with normalized texts and sanitized extensions.
    pub fn into_challenge(self, id: ChallengeId) -> Challenge {
        let mut challenge = Challenge::new(
            id,
            self.input.into_document(),
            self.output.into_document(),
        );
        challenge.client = self.client;
        challenge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"{
        "in": {"data": "one\r\ntwo", "type": "c++"},
        "out": {"data": "two\none\n", "type": "c++"},
        "client": "0.5.0"
    }"#;

    #[test]
    fn test_into_challenge() {
        let remote: RemoteChallenge = serde_json::from_str(JSON).unwrap();
        assert!(remote.compliance().is_compliant());

        let id = ChallengeId::new("9v00686695ea000000000723").unwrap();
        let challenge = remote.into_challenge(id.clone());
        assert_eq!(challenge.id, id);
        assert_eq!(challenge.input.text, "one\ntwo\n");
        assert_eq!(challenge.input.extension, ".c__");
        assert_eq!(challenge.output.file_name("out"), "out.c__");
        assert_eq!(challenge.client.as_deref(), Some("0.5.0"));
    }

    #[test]
    fn test_missing_type_and_client() {
        let remote: RemoteChallenge =
            serde_json::from_str(r#"{"in": {"data": "a"}, "out": {"data": "b"}}"#).unwrap();
        assert_eq!(remote.compliance(), Compliance::Update);
        let challenge = remote.into_challenge(ChallengeId::new("abc").unwrap());
        assert_eq!(challenge.input.file_name("in"), "in");
    }
}
