use crate::config::{Config, DEFAULT_MAX_RESULTS};
use crate::processing::{filter_reposts, join_media};
use crate::render::render_feed;
use crate::sources;
use crate::traits::{FeedSink, PostSource};
use crate::types::{FetchOutcome, PipelineOutcome, Post, PostBatch, Result, XRssError};
use tracing::{error, info};

/// Source → repost filter → media joiner → renderer, run once per invocation.
pub struct XRssPipeline {
    source: Box<dyn PostSource>,
    keyword: String,
    max_results: u32,
}

impl XRssPipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        PipelineBuilder::new()
            .keyword(config.keyword.clone())
            .max_results(config.max_results)
            .source(sources::from_config(config)?)
            .build()
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Produce the feed text without persisting it.
    pub async fn generate(&self) -> PipelineOutcome {
        info!("X RSS generation started.");
        info!("Searching X for keyword: {} via {}", self.keyword, self.source.source_name());

        let batch = match self.source.fetch(&self.keyword, self.max_results).await {
            FetchOutcome::Posts(batch) => batch,
            FetchOutcome::Failed(reason) => {
                error!("Fetching posts failed, skipping RSS generation: {}", reason);
                return PipelineOutcome::FetchFailed(reason);
            }
        };

        let posts = process_batch(batch);
        info!("Found {} posts", posts.len());

        if posts.is_empty() {
            info!("No posts found, skipping RSS generation");
            return PipelineOutcome::NoPosts;
        }

        info!("Generating RSS content");
        let rss = render_feed(&posts, &self.keyword);
        PipelineOutcome::Feed { rss, items: posts.len() }
    }

    /// Generate, then hand any produced feed to `sink`. Only sink failures are errors.
    pub async fn run(&self, sink: &dyn FeedSink) -> Result<PipelineOutcome> {
        let outcome = self.generate().await;

        match &outcome {
            PipelineOutcome::Feed { rss, items } => {
                info!("Saving RSS ({} items, {} bytes) to {}", items, rss.len(), sink.target());
                sink.save(rss).await.map_err(|e| {
                    error!("Error saving RSS to {}: {}", sink.target(), e);
                    e
                })?;
                info!("RSS saved successfully");
            }
            PipelineOutcome::NoPosts => info!("No RSS content was generated"),
            PipelineOutcome::FetchFailed(_) => info!("No RSS content was generated (fetch failed)"),
        }

        Ok(outcome)
    }
}

/// Filter reposts, then attach media, keeping the original order.
pub fn process_batch(batch: PostBatch) -> Vec<Post> {
    let total = batch.posts.len();
    let filtered = filter_reposts(batch.posts);
    info!("Total tweets: {}, After filtering retweets: {}", total, filtered.len());

    join_media(filtered, &batch.media)
}

/// Builder for [`XRssPipeline`].
pub struct PipelineBuilder {
    keyword: Option<String>,
    max_results: u32,
    source: Option<Box<dyn PostSource>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            keyword: None,
            max_results: DEFAULT_MAX_RESULTS,
            source: None,
        }
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn source(mut self, source: Box<dyn PostSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn build(self) -> Result<XRssPipeline> {
        let keyword = self
            .keyword
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| XRssError::Config("Search keyword is not defined".to_string()))?;
        let source = self
            .source
            .ok_or_else(|| XRssError::Config("No post source configured".to_string()))?;

        Ok(XRssPipeline {
            source,
            keyword,
            max_results: self.max_results,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
