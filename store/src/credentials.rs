//! The vimgolf.com API key.

use crate::StoreError;
use std::{fmt, path::Path};

const API_KEY_LEN: usize = 32;

/// A validated API key. `Debug` never prints the key itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: &str) -> Result<Self, StoreError> {
        let key = key.trim();
        let valid = key.len() == API_KEY_LEN
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(Self(key.to_string()))
        } else {
            Err(StoreError::InvalidApiKey)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read the stored key. A missing or malformed file means no key.
    pub fn load(path: &Path) -> Result<Option<Self>, StoreError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)?;
        match Self::new(&contents) {
            Ok(key) => Ok(Some(key)),
            Err(_) => {
                tracing::warn!(path = %path.display(), "ignoring malformed API key file");
                Ok(None)
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &self.0)?;
        Ok(())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
