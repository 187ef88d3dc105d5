use crate::App;
use crate::editor::Editor;
use crate::error::CliError;
use crate::play::Workspace;
use color_eyre::eyre::Result;

/// Open the end file next to the start file in a vertical diff.
pub async fn diff_command(app: &App, arg: &str) -> Result<()> {
    let id = app.resolve_id(arg)?;
    if !id.is_remote() && app.cached(&id)?.is_none() {
        return Err(CliError::NotCached(id).into());
    }
    let challenge = app.load_challenge(&id).await?;

    let editor = app.editor()?;
    let workspace = Workspace::new(&challenge)?;
    editor.run(
        workspace.path(),
        Editor::diff_args(workspace.output(), workspace.input()),
    )?;
    Ok(())
}
