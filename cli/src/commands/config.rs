use crate::App;
use crate::error::CliError;
use crate::output;
use color_eyre::eyre::Result;
use vimgolf_store::ApiKey;

pub fn config_command(app: &App, api_key: Option<String>) -> Result<()> {
    let Some(api_key) = api_key.filter(|key| !key.is_empty()) else {
        match &app.config().api_key {
            Some(key) => output::plain(key.as_str()),
            None => show_api_key_help(),
        }
        return Ok(());
    };

    // reported once, by main, with a hint
    let key = ApiKey::new(&api_key).map_err(|_| CliError::InvalidApiKey)?;
    key.save(&app.config().paths.api_key_path())?;
    tracing::info!("API key stored");
    output::success("API key saved");
    Ok(())
}

pub fn show_api_key_help() {
    output::info("An API key can be obtained from vimgolf.com");
    output::info("Please run \"vimgolf config API_KEY\" to set your API key");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use vimgolf_store::Paths;

    fn app(root: &std::path::Path) -> App {
        App::new(Config::load_from(Paths::under(root), |_| None).unwrap())
    }

    #[test]
    fn test_invalid_key_is_one_error() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());

        let err = config_command(&app, Some("too-short".to_string())).unwrap_err();
        let cli_err = err.downcast_ref::<CliError>().unwrap();
        assert!(matches!(cli_err, CliError::InvalidApiKey));
        assert_eq!(err.chain().count(), 1);
        assert_eq!(cli_err.hint(), Some("Please check your API key on vimgolf.com"));
        assert!(!app.config().paths.api_key_path().exists());
    }

    #[test]
    fn test_valid_key_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());

        config_command(&app, Some("0123456789abcdef0123456789abcdef".to_string())).unwrap();
        let saved = ApiKey::load(&app.config().paths.api_key_path()).unwrap();
        assert_eq!(
            saved.as_ref().map(ApiKey::as_str),
            Some("0123456789abcdef0123456789abcdef")
        );
    }
}
