use crate::response::parse_response;
use crate::traits::PostSource;
use crate::types::{FetchOutcome, PostBatch, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Replays a saved search response instead of calling the API.
pub struct CaptureReplaySource {
    path: PathBuf,
}

impl CaptureReplaySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<PostBatch> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        parse_response(&contents)
    }
}

#[async_trait]
impl PostSource for CaptureReplaySource {
    fn source_name(&self) -> String {
        format!("capture file {}", self.path.display())
    }

    /// The capture already holds one page, so `keyword` and `max_results` are ignored.
    async fn fetch(&self, _keyword: &str, _max_results: u32) -> FetchOutcome {
        info!("Using local JSON file: {}", self.path.display());

        match self.load().await {
            Ok(batch) => {
                info!("Loaded {} posts from file", batch.posts.len());
                FetchOutcome::Posts(batch)
            }
            Err(e) => {
                error!("Error loading posts from file {}: {}", self.path.display(), e);
                FetchOutcome::Failed(e.to_string())
            }
        }
    }
}
