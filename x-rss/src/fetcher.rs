use crate::config::{FetchConfig, Secret};
use crate::types::{Result, XRssError};
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use url::Url;

const SEARCH_PATH: &str = "2/tweets/search/recent";
const TWEET_FIELDS: &str = "created_at,author_id,text,entities,public_metrics,attachments,referenced_tweets";
const EXPANSIONS: &str = "attachments.media_keys";
const MEDIA_FIELDS: &str = "url,preview_image_url,type,alt_text";

/// Thin client for the recent-search endpoint.
pub struct SearchClient {
    client: Client,
    search_url: Url,
    bearer_token: Secret,
}

impl SearchClient {
    pub fn new(config: &FetchConfig, api_base_url: &str, bearer_token: Secret) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        // Keep any path prefix on the base URL.
        let mut base = Url::parse(api_base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let search_url = base.join(SEARCH_PATH)?;

        Ok(Self { client, search_url, bearer_token })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    /// One page of recent posts for `keyword`, returned as the raw JSON document.
    pub async fn search_recent(&self, keyword: &str, max_results: u32) -> Result<Value> {
        let start_time = Instant::now();
        let max_results = max_results.to_string();
        let params = [
            ("query", keyword),
            ("max_results", max_results.as_str()),
            ("tweet.fields", TWEET_FIELDS),
            ("expansions", EXPANSIONS),
            ("media.fields", MEDIA_FIELDS),
        ];

        info!("Calling API: {}", self.search_url);
        debug!("Request params: {:?}", params);

        let response = self
            .client
            .get(self.search_url.clone())
            .query(&params)
            .bearer_auth(self.bearer_token.expose())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                "API Error Response: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            );
            error!("Error Details: {}", body);
            return Err(XRssError::Api { status: status.as_u16(), body });
        }

        let body = response.text().await?;
        debug!(
            "Search responded in {}ms ({} bytes)",
            start_time.elapsed().as_millis(),
            body.len()
        );

        Ok(serde_json::from_str(&body)?)
    }
}
