//! Reading answers from the terminal.

use crate::error::CliError;
use crate::output;
use std::io::BufRead;

/// Ask until a non-empty line is entered. End of input aborts.
pub fn input_loop(prompt: &str) -> Result<String, CliError> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    loop {
        output::prompt(prompt)?;
        if let Some(answer) = read_answer(&mut input)? {
            return Ok(answer);
        }
    }
}

/// Ask a yes/no question.
pub fn confirm(question: &str) -> Result<bool, CliError> {
    let prompt = format!("{} [y/n] ", question);
    loop {
        let answer = input_loop(&prompt)?;
        if let Some(yes) = parse_yes_no(&answer) {
            return Ok(yes);
        }
    }
}

/// One trimmed line; `None` when it was blank.
fn read_answer(input: &mut impl BufRead) -> Result<Option<String>, CliError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(CliError::Aborted);
    }
    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
