use thiserror::Error;
use vimgolf_core::{ChallengeId, ChallengeIdError, KeysError};

/// Failures the user can act on.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("invalid challenge id: {0}")]
    InvalidChallengeId(#[from] ChallengeIdError),

    #[error("`{0}` does not match a row of the last `vimgolf list`")]
    UnknownShortcut(String),

    #[error("invalid keys: {0}")]
    InvalidKeys(#[from] KeysError),

    #[error("challenge {0} was not found on vimgolf.com")]
    ChallengeNotFound(ChallengeId),

    #[error("challenge {0} is not cached")]
    NotCached(ChallengeId),

    #[error("unable to find `{0}` on the PATH")]
    EditorNotFound(String),

    #[error("the editor exited with {0}")]
    EditorFailed(std::process::ExitStatus),

    #[error("invalid API key: expected 32 letters, digits or underscores")]
    InvalidApiKey,

    #[error("aborted")]
    Aborted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Extra advice printed below the error.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CliError::InvalidChallengeId(_)
            | CliError::UnknownShortcut(_)
            | CliError::ChallengeNotFound(_) => Some("Please check the challenge ID on vimgolf.com"),
            CliError::InvalidKeys(_) => Some(
                "Keys use vim notation such as `ihello<Esc>ZZ`; write `<lt>` for a literal `<`",
            ),
            CliError::InvalidApiKey => Some("Please check your API key on vimgolf.com"),
            CliError::NotCached(_) => Some("Play it with `vimgolf local` first"),
            CliError::EditorNotFound(_) => {
                Some("Set GOLF_VIM or update your PATH to include the editor")
            }
            _ => None,
        }
    }
}
