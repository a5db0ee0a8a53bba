//! Wire format of the recent-search endpoint and its validation into
//! [`PostBatch`].
//!
//! Records are decoded one at a time so a single malformed post or media
//! object is skipped with a warning instead of failing the whole batch.

use crate::types::{Media, MediaKind, Post, PostBatch, ReferencedPost, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<Value>>,
    #[serde(default)]
    includes: Option<Includes>,
}

#[derive(Debug, Deserialize)]
struct Includes {
    #[serde(default)]
    media: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct RawPost {
    id: Option<String>,
    text: Option<String>,
    created_at: Option<String>,
    author_id: Option<String>,
    referenced_tweets: Option<Vec<RawReference>>,
    attachments: Option<RawAttachments>,
}

#[derive(Debug, Deserialize)]
struct RawReference {
    #[serde(rename = "type")]
    kind: Option<String>,
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAttachments {
    media_keys: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawMedia {
    media_key: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    url: Option<String>,
    preview_image_url: Option<String>,
    alt_text: Option<String>,
}

/// Decode a full search response body.
pub fn parse_response(body: &str) -> Result<PostBatch> {
    let value: Value = serde_json::from_str(body)?;
    batch_from_value(value)
}

/// Decode an already-parsed response document.
pub fn batch_from_value(value: Value) -> Result<PostBatch> {
    let response: SearchResponse = serde_json::from_value(value)?;

    let posts = response
        .data
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| decode_post(index, raw))
        .collect();

    let media = response
        .includes
        .and_then(|includes| includes.media)
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| decode_media(index, raw))
        .collect();

    Ok(PostBatch { posts, media })
}

fn decode_post(index: usize, raw: Value) -> Option<Post> {
    let raw: RawPost = match serde_json::from_value(raw) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Skipping malformed post record #{}: {}", index, e);
            return None;
        }
    };

    let Some(id) = raw.id else {
        warn!("Skipping post record #{} without id", index);
        return None;
    };
    let Some(text) = raw.text else {
        warn!("Skipping post {} without text", id);
        return None;
    };
    let created_at = match raw.created_at.as_deref().map(DateTime::parse_from_rfc3339) {
        Some(Ok(ts)) => ts.with_timezone(&Utc),
        Some(Err(e)) => {
            warn!("Skipping post {} with unparseable created_at: {}", id, e);
            return None;
        }
        None => {
            warn!("Skipping post {} without created_at", id);
            return None;
        }
    };

    let referenced_posts = raw
        .referenced_tweets
        .unwrap_or_default()
        .into_iter()
        .filter_map(|r| match (r.kind, r.id) {
            (Some(kind), target) => Some(ReferencedPost { kind, id: target.unwrap_or_default() }),
            (None, _) => {
                debug!("Dropping reference without type on post {}", id);
                None
            }
        })
        .collect();

    Some(Post {
        id,
        text,
        created_at,
        author_id: raw.author_id,
        referenced_posts,
        media_keys: raw.attachments.and_then(|a| a.media_keys).unwrap_or_default(),
        media: Vec::new(),
    })
}

fn decode_media(index: usize, raw: Value) -> Option<Media> {
    let raw: RawMedia = match serde_json::from_value(raw) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Skipping malformed media record #{}: {}", index, e);
            return None;
        }
    };

    match (raw.media_key, raw.kind) {
        (Some(media_key), Some(kind)) => Some(Media {
            media_key,
            kind: MediaKind::from_api(&kind),
            url: raw.url,
            preview_image_url: raw.preview_image_url,
            alt_text: raw.alt_text,
        }),
        _ => {
            warn!("Skipping media record #{} without media_key or type", index);
            None
        }
    }
}
