use crate::App;
use crate::commands::config::show_api_key_help;
use crate::error::CliError;
use crate::play::{Session, Uploader};
use crate::{output, prompt};
use color_eyre::eyre::Result;
use vimgolf_api::Compliance;
use vimgolf_core::Keys;

pub async fn put_command(app: &App, arg: &str, keys: Option<&str>) -> Result<()> {
    let script = keys
        .map(Keys::from_notation)
        .transpose()
        .map_err(CliError::from)?;
    let id = app.resolve_remote_id(arg)?;

    let api_key = app.config().api_key.as_ref();
    if api_key.is_none() {
        output::error("An API key has not been configured");
        output::error("Uploading to vimgolf.com is disabled");
        show_api_key_help();
        if !prompt::confirm("Play without uploads?")? {
            return Err(CliError::Aborted.into());
        }
    }

    let challenge = app.load_challenge(&id).await?;
    let compliance = Compliance::check(challenge.client.as_deref());
    if !compliance.is_compliant() {
        tracing::warn!(client = ?challenge.client, ?compliance, "service is not compliant");
        output::error(format!(
            "vimgolf {} is not compliant with vimgolf.com",
            env!("CARGO_PKG_VERSION")
        ));
        output::error("Uploading to vimgolf.com is disabled");
        output::error("vimgolf may not function properly");
        if let Some(action) = compliance.action() {
            output::info(format!("Please {} vimgolf to a compliant version", action));
        }
        if !prompt::confirm("Try to play without uploads?")? {
            return Err(CliError::Aborted.into());
        }
    }

    let uploader = api_key
        .filter(|_| compliance.is_compliant())
        .map(|api_key| Uploader {
            client: app.client(),
            api_key,
        });
    let editor = app.editor()?;
    Session::new(&challenge, &editor, app.store())
        .with_uploads(uploader)
        .with_script(script)
        .run()
        .await
}
