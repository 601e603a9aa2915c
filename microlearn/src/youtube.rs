//! Video search provider
//!
//! `VideoSearch` is the seam the curator talks to. `YouTubeSearchClient`
//! implements it against the YouTube Data API v3 `search` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::SearchError;

pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Parameters of one short-video search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: String,
    pub max_results: u32,
}

#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Return candidate video identifiers in provider order. Items without an
    /// identifier are skipped; shape validation is left to the caller.
    async fn search_short_videos(&self, query: &SearchQuery) -> Result<Vec<String>, SearchError>;
}

pub struct YouTubeSearchClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeSearchClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_key))
    }

    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_YOUTUBE_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl VideoSearch for YouTubeSearchClient {
    async fn search_short_videos(&self, query: &SearchQuery) -> Result<Vec<String>, SearchError> {
        let max_results = query.max_results.to_string();
        let response = self
            .client
            .get(self.url("/search"))
            .query(&[
                ("part", "id"),
                ("q", query.q.as_str()),
                ("type", "video"),
                ("videoDuration", "short"),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status_code: status.as_u16(),
                message,
            });
        }

        let body: SearchResponse = response.json().await?;
        Ok(body
            .items
            .into_iter()
            .filter_map(|item| item.id.and_then(|id| id.video_id))
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: Option<SearchItemId>,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId", default)]
    video_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_skips_items_without_video_id() {
        let body: SearchResponse = serde_json::from_str(
            r#"{"items": [
                {"id": {"kind": "youtube#video", "videoId": "N20k-rV-iXQ"}},
                {"id": {"kind": "youtube#channel", "channelId": "UC123"}},
                {"snippet": {}}
            ]}"#,
        )
        .unwrap();

        let ids: Vec<String> = body
            .items
            .into_iter()
            .filter_map(|item| item.id.and_then(|id| id.video_id))
            .collect();
        assert_eq!(ids, vec!["N20k-rV-iXQ".to_string()]);
    }

    #[test]
    fn test_missing_items_key_is_empty() {
        let body: SearchResponse = serde_json::from_str(r#"{"kind": "youtube#searchListResponse"}"#).unwrap();
        assert!(body.items.is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = YouTubeSearchClient::with_client(Client::new(), "key")
            .with_base_url("http://127.0.0.1:1234/youtube/v3/");
        assert_eq!(client.url("/search"), "http://127.0.0.1:1234/youtube/v3/search");
    }
}
