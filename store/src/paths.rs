//! Where vimgolf keeps its files.
//!
//! The API key lives in the config directory, cached challenges and the
//! `+N` lookup table in the data directory, logs in the cache directory.

use crate::StoreError;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "vimgolf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl Paths {
    /// Platform directories (`~/.config/vimgolf`, `~/.local/share/vimgolf`
    /// and `~/.cache/vimgolf` on Linux).
    pub fn from_env() -> Result<Self, StoreError> {
        let config = dirs::config_dir().ok_or(StoreError::NoHomeDir)?;
        let data = dirs::data_dir().ok_or(StoreError::NoHomeDir)?;
        let cache = dirs::cache_dir().ok_or(StoreError::NoHomeDir)?;
        Ok(Self {
            config_dir: config.join(APP_DIR),
            data_dir: data.join(APP_DIR),
            cache_dir: cache.join(APP_DIR),
        })
    }

    /// Same layout below a single root directory.
    pub fn under(root: &Path) -> Self {
        Self {
            config_dir: root.join("config"),
            data_dir: root.join("data"),
            cache_dir: root.join("cache"),
        }
    }

    pub fn challenges_dir(&self) -> PathBuf {
        self.data_dir.join("challenges")
    }

    pub fn id_lookup_path(&self) -> PathBuf {
        self.data_dir.join("id_lookup.json")
    }

    pub fn api_key_path(&self) -> PathBuf {
        self.config_dir.join("api_key")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.cache_dir.join("log")
    }

    /// Create the config, data and cache directories.
    pub fn ensure(&self) -> Result<(), StoreError> {
        for dir in [&self.config_dir, &self.data_dir, &self.cache_dir] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}
