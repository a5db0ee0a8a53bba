use crate::types::{Media, MediaKind, Post};
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rss::{ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use std::collections::BTreeMap;
use tracing::debug;

pub const TITLE_MAX_CHARS: usize = 100;
pub const DEFAULT_ALT_TEXT: &str = "X image";
pub const GENERATOR: &str = "X-RSS Generator";
pub const LANGUAGE: &str = "ja";
pub const COPYRIGHT: &str = "All content belongs to their respective owners on X/X";
const MANAGING_EDITOR: &str = "no-reply@example.com (X-RSS Generator)";
const RSS_DOCS: &str = "https://validator.w3.org/feed/docs/rss2.html";
const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";

/// Characters left alone by JavaScript's `encodeURIComponent`.
const COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Channel-level fields, which depend only on the keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedMetadata {
    pub title: String,
    pub description: String,
    pub link: String,
}

impl FeedMetadata {
    pub fn for_keyword(keyword: &str) -> Self {
        Self {
            title: format!("X search results for {}", keyword),
            description: format!("Latest tweets containing {}", keyword),
            link: format!("https://x.com/search?q={}", utf8_percent_encode(keyword, COMPONENT_SET)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub content: String,
    pub published_at: DateTime<Utc>,
}

impl FeedItem {
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: truncate_title(&post.text),
            link: post.status_url(),
            content: render_content(&post.text, &post.media),
            published_at: post.created_at,
        }
    }

    fn to_rss_item(&self) -> Item {
        ItemBuilder::default()
            .title(Some(self.title.clone()))
            .link(Some(self.link.clone()))
            .guid(Some(GuidBuilder::default().value(self.link.clone()).permalink(true).build()))
            .description(Some(self.content.clone()))
            .content(Some(self.content.clone()))
            .pub_date(Some(self.published_at.to_rfc2822()))
            .build()
    }
}

/// First 100 characters, with "..." only when something was cut.
pub fn truncate_title(text: &str) -> String {
    match text.char_indices().nth(TITLE_MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Post text plus an HTML fragment per renderable media item. The `<br><br>`
/// separator is only added when at least one fragment was produced.
pub fn render_content(text: &str, media: &[Media]) -> String {
    let fragments: String = media.iter().filter_map(render_media).collect();
    if fragments.is_empty() {
        return text.to_string();
    }
    format!("{}<br><br>{}", text, fragments)
}

fn render_media(item: &Media) -> Option<String> {
    match &item.kind {
        MediaKind::Photo => {
            let src = present(&item.url).or(present(&item.preview_image_url))?;
            let alt = present(&item.alt_text).unwrap_or(DEFAULT_ALT_TEXT);
            Some(format!(
                r#"<img src="{}" alt="{}" style="max-width:100%;"><br>"#,
                escape_attribute(src),
                escape_attribute(alt)
            ))
        }
        MediaKind::Video | MediaKind::AnimatedGif => {
            let preview = present(&item.preview_image_url)?;
            Some(format!(
                r#"<img src="{}" alt="Video thumbnail" style="max-width:100%;"><br><p>[This is a {}. Click the link to view on X]</p><br>"#,
                escape_attribute(preview),
                item.kind.as_str()
            ))
        }
        MediaKind::Other(kind) => {
            debug!("Not rendering media {} of kind {}", item.media_key, kind);
            None
        }
    }
}

/// Empty strings from the API count as missing.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Serialize `posts` as an RSS 2.0 document for `keyword`.
pub fn render_feed(posts: &[Post], keyword: &str) -> String {
    render_feed_at(posts, keyword, Utc::now())
}

pub fn render_feed_at(posts: &[Post], keyword: &str, built_at: DateTime<Utc>) -> String {
    let metadata = FeedMetadata::for_keyword(keyword);
    let items: Vec<Item> = posts.iter().map(|post| FeedItem::from_post(post).to_rss_item()).collect();

    let mut namespaces = BTreeMap::new();
    namespaces.insert("content".to_string(), CONTENT_NAMESPACE.to_string());

    let channel = ChannelBuilder::default()
        .title(metadata.title)
        .link(metadata.link)
        .description(metadata.description)
        .language(Some(LANGUAGE.to_string()))
        .copyright(Some(COPYRIGHT.to_string()))
        .managing_editor(Some(MANAGING_EDITOR.to_string()))
        .generator(Some(GENERATOR.to_string()))
        .docs(Some(RSS_DOCS.to_string()))
        .last_build_date(Some(built_at.to_rfc2822()))
        .namespaces(namespaces)
        .items(items)
        .build();

    channel.to_string()
}
