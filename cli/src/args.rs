//! Command line definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use vimgolf_api::DEFAULT_LISTING_LIMIT;

#[derive(Parser, Debug)]
#[command(name = "vimgolf")]
#[command(about = "Play vimgolf.com challenges from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Store or show your vimgolf.com API key
    Config {
        /// 32 character key from your vimgolf.com profile
        api_key: Option<String>,
    },

    /// Play a challenge made of two local files
    Local {
        /// Start file
        input: PathBuf,
        /// Expected end file
        output: PathBuf,
        /// Keys replayed before you take over, e.g. `dd`
        keys: Option<String>,
    },

    /// Play a vimgolf.com challenge
    Put {
        /// Challenge id, or `+N` for row N of the last listing
        challenge: String,
        /// Keys replayed before you take over
        keys: Option<String>,
    },

    /// List vimgolf.com challenges
    List {
        /// `[PAGE][:LIMIT]`, e.g. `2`, `2:5` or `:5`
        #[arg(default_value = "")]
        spec: ListSpec,
    },

    /// Show a vimgolf.com challenge
    Show {
        /// Challenge id, or `+N`
        challenge: String,
        /// Include your local attempts
        #[arg(short, long)]
        tracked: bool,
    },

    /// Compare a challenge's start and end files in the editor
    Diff {
        /// Challenge id, or `+N`
        challenge: String,
    },

    /// Print the version
    Version,
}

/// Which listing page to fetch and how many rows to show.
///
/// Parsing never fails: malformed parts fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSpec {
    pub page: Option<u32>,
    pub limit: usize,
}

impl Default for ListSpec {
    fn default() -> Self {
        Self {
            page: None,
            limit: DEFAULT_LISTING_LIMIT,
        }
    }
}

impl FromStr for ListSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (page, limit) = match s.split_once(':') {
            Some((page, limit)) => (page, Some(limit)),
            None => (s, None),
        };
        let default = ListSpec::default();
        Ok(Self {
            page: page.trim().parse().ok(),
            limit: limit
                .and_then(|limit| limit.trim().parse().ok())
                .unwrap_or(default.limit),
        })
    }
}
