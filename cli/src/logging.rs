//! File logging.
//!
//! Every run writes `vimgolf-<unix-ts>-<pid>.log` into the log directory.
//! Only the newest [`LOG_LIMIT`] files are kept.

use color_eyre::eyre::{Result, eyre};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "VIMGOLF_LOG";
pub const LOG_LIMIT: usize = 10;

const DEFAULT_FILTER: &str =
    "info,vimgolf=debug,vimgolf_core=debug,vimgolf_store=debug,vimgolf_api=debug";
const PREFIX: &str = "vimgolf-";
const SUFFIX: &str = ".log";

/// Install the global subscriber. Returns the path of this run's log.
pub fn init(log_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(log_dir)?;
    remove_stale_logs(log_dir, LOG_LIMIT - 1)?;

    let path = log_dir.join(format!(
        "{}{}-{}{}",
        PREFIX,
        chrono::Utc::now().timestamp(),
        std::process::id(),
        SUFFIX
    ));
    let file = File::create(&path)?;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| eyre!("failed to install logger: {}", err))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "vimgolf started");
    Ok(path)
}

/// Unix timestamp embedded in a log file name.
fn log_timestamp(name: &str) -> Option<i64> {
    let stem = name.strip_prefix(PREFIX)?.strip_suffix(SUFFIX)?;
    let (timestamp, pid) = stem.split_once('-')?;
    pid.parse::<u32>().ok()?;
    timestamp.parse().ok()
}

/// Names to delete so that at most `keep` logs remain, oldest first.
fn stale_logs(names: &[String], keep: usize) -> Vec<String> {
    let mut logs: Vec<(i64, &String)> = names
        .iter()
        .filter_map(|name| log_timestamp(name).map(|ts| (ts, name)))
        .collect();
    logs.sort();
    let excess = logs.len().saturating_sub(keep);
    logs.into_iter()
        .take(excess)
        .map(|(_, name)| name.clone())
        .collect()
}

fn remove_stale_logs(log_dir: &Path, keep: usize) -> Result<()> {
    let names: Vec<String> = std::fs::read_dir(log_dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    for name in stale_logs(&names, keep) {
        std::fs::remove_file(log_dir.join(&name))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_timestamp() {
        assert_eq!(log_timestamp("vimgolf-1700000000-42.log"), Some(1700000000));
        assert_eq!(log_timestamp("vimgolf-1700000000.log"), None);
        assert_eq!(log_timestamp("notes.txt"), None);
    }

    #[test]
    fn test_stale_logs_keeps_newest() {
        let names: Vec<String> = (0..12)
            .map(|i| format!("vimgolf-{}-1.log", 1_700_000_000 + i))
            .chain(["README".to_string()])
            .collect();
        let stale = stale_logs(&names, 9);
        assert_eq!(stale.len(), 3);
        assert_eq!(stale[0], "vimgolf-1700000000-1.log");
        assert_eq!(stale[2], "vimgolf-1700000002-1.log");
    }

    #[test]
    fn test_remove_stale_logs() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..4 {
            std::fs::write(dir.path().join(format!("vimgolf-{}-7.log", 100 + i)), "").unwrap();
        }
        std::fs::write(dir.path().join("other.txt"), "").unwrap();

        remove_stale_logs(dir.path(), 2).unwrap();
        let mut left: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        left.sort();
        assert_eq!(left, ["other.txt", "vimgolf-102-7.log", "vimgolf-103-7.log"]);
    }
}
