//! Playlist retrieval client
//!
//! Asks the remote service for an ordered list of playable items matching
//! a (mood, language) pair. The transport never substitutes an empty
//! success for a failure; whether an empty list is acceptable is the
//! session's decision.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::remote::{envelope, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::session::playlist::PlaylistItem;

/// Request payload for the playlist endpoint
#[derive(Debug, Serialize)]
struct PlaylistRequest<'a> {
    emotion: &'a str,
    language: &'a str,
}

/// Inner payload of a playlist response
#[derive(Debug, Deserialize)]
struct PlaylistBody {
    #[serde(default)]
    playlist: Vec<PlaylistItem>,
}

/// Client for the remote playlist endpoint
pub struct PlaylistClient {
    http_client: reqwest::Client,
    url: String,
}

impl PlaylistClient {
    pub fn new(url: String) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self { http_client, url })
    }

    /// Fetch the playlist for a mood/language pair.
    pub async fn fetch(&self, mood: &str, language: &str) -> Result<Vec<PlaylistItem>> {
        tracing::debug!(url = %self.url, mood = %mood, language = %language, "Requesting playlist");

        let response = self
            .http_client
            .post(&self.url)
            .json(&PlaylistRequest {
                emotion: mood,
                language,
            })
            .send()
            .await
            .map_err(|e| Error::PlaylistFetch(format!("network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::PlaylistFetch(format!(
                "playlist service returned {}",
                status
            )));
        }

        let raw = response
            .text()
            .await
            .map_err(|e| Error::PlaylistFetch(format!("network error: {}", e)))?;

        let body: PlaylistBody =
            envelope::decode_body(&raw).map_err(|e| Error::PlaylistFetch(e.to_string()))?;

        tracing::info!(
            mood = %mood,
            language = %language,
            items = body.playlist.len(),
            "Playlist received"
        );
        Ok(body.playlist)
    }
}
