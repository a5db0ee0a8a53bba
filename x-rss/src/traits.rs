use crate::types::{FetchOutcome, Result};
use async_trait::async_trait;

/// Where a run gets its posts from (live search or a replayed capture).
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Human-readable name for logs
    fn source_name(&self) -> String;

    /// Fetch one batch for `keyword`.
    ///
    /// Upstream problems come back as [`FetchOutcome::Failed`], never as `Err`.
    async fn fetch(&self, keyword: &str, max_results: u32) -> FetchOutcome;
}

/// Where a rendered feed ends up. Each save fully replaces the previous artifact.
#[async_trait]
pub trait FeedSink: Send + Sync {
    /// Description of the target, e.g. a file path or blob URL without credentials
    fn target(&self) -> String;

    async fn save(&self, content: &str) -> Result<()>;
}
