use crate::args::Commands;
use crate::commands;
use crate::config::Config;
use crate::editor::Editor;
use crate::error::CliError;
use crate::output;
use color_eyre::eyre::Result;
use vimgolf_api::{GolfClient, ProviderError, RemoteChallenge};
use vimgolf_core::{Challenge, ChallengeId, ChallengeIdError, ChallengeStore};
use vimgolf_store::{FsChallengeStore, IdLookup};

/// Shared state of one invocation.
pub struct App {
    config: Config,
    store: FsChallengeStore,
    client: GolfClient,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        Self {
            store: FsChallengeStore::open(&config.paths),
            client: GolfClient::new(config.host.as_str()),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &FsChallengeStore {
        &self.store
    }

    pub fn client(&self) -> &GolfClient {
        &self.client
    }

    /// Run one command to completion.
    pub async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Config { api_key } => {
                tracing::info!(with_key = api_key.is_some(), "config");
                commands::config::config_command(self, api_key)
            }
            Commands::Local {
                input,
                output,
                keys,
            } => {
                tracing::info!(input = %input.display(), output = %output.display(), "local");
                commands::local::local_command(self, &input, &output, keys.as_deref()).await
            }
            Commands::Put { challenge, keys } => {
                tracing::info!(challenge = %challenge, "put");
                commands::put::put_command(self, &challenge, keys.as_deref()).await
            }
            Commands::List { spec } => {
                tracing::info!(?spec, "list");
                commands::list::list_command(self, spec).await
            }
            Commands::Show { challenge, tracked } => {
                tracing::info!(challenge = %challenge, tracked, "show");
                commands::show::show_command(self, &challenge, tracked).await
            }
            Commands::Diff { challenge } => {
                tracing::info!(challenge = %challenge, "diff");
                commands::diff::diff_command(self, &challenge).await
            }
            Commands::Version => {
                output::plain(env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }

    pub fn editor(&self) -> Result<Editor, CliError> {
        Editor::resolve(&self.config.editor)
    }

    /// Turn a command line argument into an id, expanding `+N` shortcuts.
    pub fn resolve_id(&self, arg: &str) -> Result<ChallengeId> {
        if arg.starts_with('+') {
            let lookup = IdLookup::load(&self.config.paths.id_lookup_path())?;
            let id = lookup
                .expand(arg)
                .cloned()
                .ok_or_else(|| CliError::UnknownShortcut(arg.to_string()))?;
            tracing::debug!(arg, challenge = %id, "shortcut expanded");
            return Ok(id);
        }
        Ok(ChallengeId::new(arg).map_err(CliError::from)?)
    }

    /// Like [`App::resolve_id`], for commands that talk to vimgolf.com.
    pub fn resolve_remote_id(&self, arg: &str) -> Result<ChallengeId> {
        let id = self.resolve_id(arg)?;
        if !id.is_remote() {
            return Err(CliError::from(ChallengeIdError::NotRemote(id.to_string())).into());
        }
        Ok(id)
    }

    pub fn cached(&self, id: &ChallengeId) -> Result<Option<Challenge>> {
        Ok(self.store.get(id)?)
    }

    /// Download a challenge. An unknown id is reported as such.
    pub async fn download(&self, id: &ChallengeId) -> Result<RemoteChallenge> {
        output::info(format!("Downloading vimgolf challenge {}", id));
        match self.client.fetch_challenge(id).await {
            Ok(remote) => Ok(remote),
            Err(ProviderError::NotFound(_)) => Err(CliError::ChallengeNotFound(id.clone()).into()),
            Err(err) => Err(err.into()),
        }
    }

    /// The cached copy, or a fresh download that is cached on the way.
    pub async fn load_challenge(&self, id: &ChallengeId) -> Result<Challenge> {
        if let Some(challenge) = self.cached(id)? {
            output::info(format!("Using locally cached challenge {}", id));
            return Ok(challenge);
        }
        let challenge = self.download(id).await?.into_challenge(id.clone());
        self.store.put(&challenge)?;
        Ok(challenge)
    }
}
