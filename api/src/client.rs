//! HTTP access to vimgolf.com.

use crate::ProviderError;
use crate::challenge::RemoteChallenge;
use crate::pages::{ChallengePage, parse_challenge_page, parse_listing};
use crate::util::{form_body, http_client};
use serde::Deserialize;
use vimgolf_core::{ChallengeId, ListingEntry};

/// Default service, overridden by `GOLF_HOST`.
pub const DEFAULT_HOST: &str = "https://www.vimgolf.com";

#[derive(Debug, Deserialize)]
struct EntryReply {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GolfClient {
    host: String,
    client: reqwest::Client,
}

impl Default for GolfClient {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

impl GolfClient {
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into().trim_end_matches('/').to_string();
        Self {
            host,
            client: http_client(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Page of a challenge on the website.
    pub fn challenge_url(&self, id: &ChallengeId) -> String {
        format!("{}/challenges/{}", self.host, id)
    }

    fn challenge_json_url(&self, id: &ChallengeId) -> String {
        format!("{}.json", self.challenge_url(id))
    }

    fn listing_url(&self, page: Option<u32>) -> String {
        match page {
            Some(page) => format!("{}/?page={}", self.host, page),
            None => self.host.clone(),
        }
    }

    async fn get_text(&self, url: &str) -> Result<String, ProviderError> {
        tracing::debug!(url, "GET");
        let res = self.client.get(url).send().await?;

        let status = res.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(res.text().await?)
    }

    /// Download the JSON form of a challenge.
    pub async fn fetch_challenge(&self, id: &ChallengeId) -> Result<RemoteChallenge, ProviderError> {
        let body = self.get_text(&self.challenge_json_url(id)).await?;
        let challenge: RemoteChallenge = serde_json::from_str(&body)?;
        tracing::info!(challenge = %id, client = ?challenge.client, "challenge downloaded");
        Ok(challenge)
    }

    /// Download and scrape the challenge page.
    pub async fn fetch_challenge_page(
        &self,
        id: &ChallengeId,
    ) -> Result<ChallengePage, ProviderError> {
        let body = self.get_text(&self.challenge_url(id)).await?;
        parse_challenge_page(&body)
    }

    /// Download a listing page. `None` is the front page.
    pub async fn fetch_listing(
        &self,
        page: Option<u32>,
        limit: usize,
    ) -> Result<Vec<ListingEntry>, ProviderError> {
        let body = self.get_text(&self.listing_url(page)).await?;
        let entries = parse_listing(&body, limit);
        tracing::info!(?page, rows = entries.len(), "listing downloaded");
        Ok(entries)
    }

    /// Upload an entry: the raw keylog bytes of a correct attempt.
    pub async fn submit_entry(
        &self,
        id: &ChallengeId,
        api_key: &str,
        raw_keys: &[u8],
    ) -> Result<(), ProviderError> {
        let url = format!("{}/entry.json", self.host);
        let body = form_body(&[
            ("challenge_id", id.as_str().as_bytes()),
            ("apikey", api_key.as_bytes()),
            ("entry", raw_keys),
        ]);

        let res = self
            .client
            .post(&url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ProviderError::Status {
                status: res.status().as_u16(),
                url,
            });
        }

        let reply: EntryReply = serde_json::from_str(&res.text().await?)?;
        match reply.status.as_deref() {
            Some("ok") => {
                tracing::info!(challenge = %id, "entry accepted");
                Ok(())
            }
            other => Err(ProviderError::Rejected(
                other.unwrap_or("no status").to_string(),
            )),
        }
    }
}
