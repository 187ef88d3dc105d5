//! Line-oriented terminal output.
//!
//! Colors are only emitted when the stream is a terminal.

use crate::theme::{DEFAULT, Theme};
use crossterm::style::{Color, Stylize};
use crossterm::tty::IsTty;
use std::io::Write;

/// Dashes between the sections of `show`.
pub const SEPARATOR_WIDTH: usize = 50;

pub fn theme() -> &'static Theme {
    &DEFAULT
}

pub fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        text.with(color).to_string()
    } else {
        text.to_string()
    }
}

fn stdout_colors() -> bool {
    std::io::stdout().is_tty()
}

fn stderr_colors() -> bool {
    std::io::stderr().is_tty()
}

pub fn plain(text: impl AsRef<str>) {
    println!("{}", text.as_ref());
}

pub fn info(text: impl AsRef<str>) {
    println!("{}", paint(text.as_ref(), theme().info, stdout_colors()));
}

pub fn success(text: impl AsRef<str>) {
    println!("{}", paint(text.as_ref(), theme().success, stdout_colors()));
}

pub fn error(text: impl AsRef<str>) {
    eprintln!("{}", paint(text.as_ref(), theme().error, stderr_colors()));
}

pub fn separator() {
    plain("-".repeat(SEPARATOR_WIDTH));
}

/// Print `text` without a newline, e.g. a prompt.
pub fn prompt(text: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}", paint(text, theme().info, stdout_colors()))?;
    stdout.flush()
}

/// `name (id)` with the id highlighted.
pub fn title_with_id(name: &str, id: &str) -> String {
    format!("{} ({})", name, paint(id, theme().id, stdout_colors()))
}

/// Join key representations, highlighting the multi-character ones.
pub fn keys_line(reprs: &[String], colors: bool) -> String {
    reprs
        .iter()
        .map(|repr| {
            if repr.chars().count() > 1 {
                paint(repr, theme().key, colors)
            } else {
                repr.clone()
            }
        })
        .collect()
}

pub fn print_keys(reprs: &[String]) {
    plain(keys_line(reprs, stdout_colors()));
}

pub fn mark(value: bool) -> &'static str {
    if value { "✓" } else { "✗" }
}

/// Plain ASCII table, sized to its widest cells.
#[derive(Debug, Clone, Default)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate() {
                let width = cell.chars().count();
                match widths.get_mut(idx) {
                    Some(w) => *w = (*w).max(width),
                    None => widths.push(width),
                }
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let border = widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+");
        let border = format!("+{}+", border);

        let line = |cells: &[String]| {
            let padded = widths
                .iter()
                .enumerate()
                .map(|(idx, w)| {
                    let cell = cells.get(idx).map(String::as_str).unwrap_or("");
                    let pad = w - cell.chars().count();
                    format!(" {}{} ", cell, " ".repeat(pad))
                })
                .collect::<Vec<_>>()
                .join("|");
            format!("|{}|", padded)
        };

        let mut out = vec![border.clone(), line(self.header.as_slice()), border.clone()];
        out.extend(self.rows.iter().map(|row| line(row.as_slice())));
        out.push(border);
        out.join("\n")
    }
}
