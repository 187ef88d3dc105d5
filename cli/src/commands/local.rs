use crate::App;
use crate::error::CliError;
use crate::play::Session;
use color_eyre::eyre::{Result, WrapErr};
use std::path::Path;
use vimgolf_core::{Challenge, ChallengeId, ChallengeStore, Document, Keys, sanitize_extension};

pub async fn local_command(
    app: &App,
    input: &Path,
    output: &Path,
    keys: Option<&str>,
) -> Result<()> {
    let script = keys
        .map(Keys::from_notation)
        .transpose()
        .map_err(CliError::from)?;

    let input_text = std::fs::read_to_string(input)
        .wrap_err_with(|| format!("failed to read {}", input.display()))?;
    let output_text = std::fs::read_to_string(output)
        .wrap_err_with(|| format!("failed to read {}", output.display()))?;

    let challenge = local_challenge(input, &input_text, output, &output_text);
    tracing::info!(challenge = %challenge.id, "local challenge");
    app.store().put(&challenge)?;

    let editor = app.editor()?;
    Session::new(&challenge, &editor, app.store())
        .with_script(script)
        .run()
        .await
}

/// A challenge built from two files, stored under an alias derived from
/// their contents.
pub fn local_challenge(
    input_path: &Path,
    input_text: &str,
    output_path: &Path,
    output_text: &str,
) -> Challenge {
    let input = Document::new(input_text, file_extension(input_path));
    let output = Document::new(output_text, file_extension(output_path));
    let id = ChallengeId::local(&input.text, &output.text);

    let mut challenge = Challenge::new(id, input, output);
    challenge.title = Some(format!(
        "{} / {}",
        input_path.display(),
        output_path.display()
    ));
    challenge
}

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(sanitize_extension)
        .unwrap_or_default()
}
