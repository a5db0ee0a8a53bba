use crate::capture::save_capture;
use crate::config::{FetchConfig, Secret};
use crate::fetcher::SearchClient;
use crate::response::batch_from_value;
use crate::traits::PostSource;
use crate::types::{FetchOutcome, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Live keyword search against the recent-search endpoint.
pub struct LiveSearchSource {
    client: SearchClient,
    capture_dir: Option<PathBuf>,
}

impl LiveSearchSource {
    pub fn new(config: &FetchConfig, api_base_url: &str, bearer_token: Secret) -> Result<Self> {
        Ok(Self {
            client: SearchClient::new(config, api_base_url, bearer_token)?,
            capture_dir: None,
        })
    }

    /// Save every raw response under `dir` for later replay.
    pub fn with_capture_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.capture_dir = dir;
        self
    }
}

#[async_trait]
impl PostSource for LiveSearchSource {
    fn source_name(&self) -> String {
        format!("X recent search ({})", self.client.search_url())
    }

    async fn fetch(&self, keyword: &str, max_results: u32) -> FetchOutcome {
        let response = match self.client.search_recent(keyword, max_results).await {
            Ok(response) => response,
            Err(e) => {
                error!("Error searching X posts: {}", e);
                return FetchOutcome::Failed(e.to_string());
            }
        };

        if let Some(dir) = &self.capture_dir {
            if let Err(e) = save_capture(dir, keyword, &response).await {
                warn!("Error saving X API response to {}: {}", dir.display(), e);
            }
        }

        match batch_from_value(response) {
            Ok(batch) => {
                info!(
                    "Search returned {} posts and {} media objects",
                    batch.posts.len(),
                    batch.media.len()
                );
                FetchOutcome::Posts(batch)
            }
            Err(e) => {
                error!("Malformed search response: {}", e);
                FetchOutcome::Failed(e.to_string())
            }
        }
    }
}
