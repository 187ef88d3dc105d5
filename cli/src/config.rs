//! Settings resolved once at startup and passed to the commands.

use vimgolf_api::DEFAULT_HOST;
use vimgolf_store::{ApiKey, Paths, StoreError};

pub const HOST_ENV: &str = "GOLF_HOST";
pub const EDITOR_ENV: &str = "GOLF_VIM";
pub const DEFAULT_EDITOR: &str = "vim";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the service.
    pub host: String,
    /// Editor program, looked up on the PATH.
    pub editor: String,
    pub paths: Paths,
    /// `None` until `vimgolf config` stores a key.
    pub api_key: Option<ApiKey>,
}

impl Config {
    /// Platform directories and the process environment.
    pub fn load() -> Result<Self, StoreError> {
        Self::load_from(Paths::from_env()?, |name| std::env::var(name).ok())
    }

    pub fn load_from(
        paths: Paths,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, StoreError> {
        let setting = |name: &str, default: &str| {
            env(name)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let api_key = ApiKey::load(&paths.api_key_path())?;

        Ok(Self {
            host: setting(HOST_ENV, DEFAULT_HOST),
            editor: setting(EDITOR_ENV, DEFAULT_EDITOR),
            paths,
            api_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(Paths::under(dir.path()), |_| None).unwrap();
        assert_eq!(config.host, "https://www.vimgolf.com");
        assert_eq!(config.editor, "vim");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_environment_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::under(dir.path());
        ApiKey::new("0123456789abcdef0123456789abcdef")
            .unwrap()
            .save(&paths.api_key_path())
            .unwrap();

        let config = Config::load_from(paths, |name| match name {
            HOST_ENV => Some("http://localhost:3000".to_string()),
            EDITOR_ENV => Some("  ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.host, "http://localhost:3000");
        assert_eq!(config.editor, "vim");
        assert!(config.api_key.is_some());
    }
}
