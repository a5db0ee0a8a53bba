use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference type the platform uses for a plain repost.
pub const REPOSTED: &str = "retweeted";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author_id: Option<String>,
    pub referenced_posts: Vec<ReferencedPost>,
    pub media_keys: Vec<String>,
    /// Filled in by the media joiner, in `media_keys` order.
    pub media: Vec<Media>,
}

impl Post {
    pub fn is_repost(&self) -> bool {
        self.referenced_posts.iter().any(|r| r.kind == REPOSTED)
    }

    /// Canonical status URL, used as both link and guid.
    pub fn status_url(&self) -> String {
        format!("https://x.com/x/status/{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencedPost {
    /// `retweeted`, `quoted`, `replied_to`, or whatever else the platform sends.
    pub kind: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub media_key: String,
    pub kind: MediaKind,
    pub url: Option<String>,
    pub preview_image_url: Option<String>,
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Photo,
    Video,
    AnimatedGif,
    Other(String),
}

impl MediaKind {
    pub fn from_api(value: &str) -> Self {
        match value {
            "photo" => MediaKind::Photo,
            "video" => MediaKind::Video,
            "animated_gif" => MediaKind::AnimatedGif,
            other => MediaKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
            MediaKind::AnimatedGif => "animated_gif",
            MediaKind::Other(other) => other,
        }
    }
}

/// Posts plus the media list that came back with them in the same response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostBatch {
    pub posts: Vec<Post>,
    pub media: Vec<Media>,
}

impl PostBatch {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// What a post source produced for one fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Posts(PostBatch),
    Failed(String),
}

/// What one pipeline run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    Feed { rss: String, items: usize },
    NoPosts,
    FetchFailed(String),
}

impl PipelineOutcome {
    pub fn feed(&self) -> Option<&str> {
        match self {
            PipelineOutcome::Feed { rss, .. } => Some(rss),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum XRssError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Storage returned HTTP {status}: {body}")]
    Storage { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, XRssError>;
