//! One module per subcommand.

pub mod config;
pub mod diff;
pub mod list;
pub mod local;
pub mod put;
pub mod show;
