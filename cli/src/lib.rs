mod app;
pub use app::App;

pub mod args;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod logging;
pub mod output;
pub mod play;
pub mod prompt;
pub mod theme;
