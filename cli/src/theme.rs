//! Colors used for terminal output.

use crossterm::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Progress and prompts.
    pub info: Color,
    /// Correct entries, uploads, section titles.
    pub success: Color,
    /// Failures, on stderr.
    pub error: Color,
    /// Keys written with more than one character, such as `<Esc>`.
    pub key: Color,
    /// Challenge ids.
    pub id: Color,
}

pub const DEFAULT: Theme = Theme {
    info: Color::Yellow,
    success: Color::Green,
    error: Color::Red,
    key: Color::Magenta,
    id: Color::Yellow,
};
