use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Fetch error: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Serde parse error: {0}")]
    SerdeParseError(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Unexpected page layout: {0}")]
    InvalidPage(String),

    #[error("Entry rejected by the server: {0}")]
    Rejected(String),
}
