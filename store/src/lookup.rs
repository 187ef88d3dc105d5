//! The `+N` shortcuts written by `list`.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};
use vimgolf_core::ChallengeId;

/// Maps the 1-based rows of the last listing to challenge ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdLookup(BTreeMap<usize, ChallengeId>);

impl IdLookup {
    pub fn from_rows(rows: impl IntoIterator<Item = (usize, ChallengeId)>) -> Self {
        Self(rows.into_iter().collect())
    }

    /// Load the table, or an empty one if `list` never ran.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn get(&self, position: usize) -> Option<&ChallengeId> {
        self.0.get(&position)
    }

    /// Resolve `+N` to the id listed on row N.
    ///
    /// Returns `None` for arguments that are not `+N` shortcuts and for rows
    /// the last listing did not have.
    pub fn expand(&self, arg: &str) -> Option<&ChallengeId> {
        let position = arg.strip_prefix('+')?.parse::<usize>().ok()?;
        self.get(position)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup() -> IdLookup {
        IdLookup::from_rows([
            (1, ChallengeId::new("5ca2bc786b547e000c77fd52").unwrap()),
            (2, ChallengeId::new("9v0063a7bc7e3a6c0000e96b").unwrap()),
        ])
    }

    #[test]
    fn test_expand() {
        let lookup = lookup();
        assert_eq!(
            lookup.expand("+2").map(ChallengeId::as_str),
            Some("9v0063a7bc7e3a6c0000e96b")
        );
        assert_eq!(lookup.expand("+3"), None);
        assert_eq!(lookup.expand("2"), None);
        assert_eq!(lookup.expand("+x"), None);
    }

    #[test]
    fn test_json_uses_string_keys() {
        let json = serde_json::to_string(&lookup()).unwrap();
        assert!(json.starts_with("{\"1\":\"5ca2bc786b547e000c77fd52\""));
        let back: IdLookup = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lookup());
    }
}
