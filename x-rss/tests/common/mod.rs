#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use std::path::PathBuf;
use std::sync::Once;
use x_rss::{Media, MediaKind, Post, ReferencedPost};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("fixture should be readable")
}

pub fn post(id: &str, text: &str) -> Post {
    Post {
        id: id.to_string(),
        text: text.to_string(),
        created_at: Utc.with_ymd_and_hms(2026, 4, 1, 3, 0, 0).unwrap(),
        author_id: Some("42".to_string()),
        referenced_posts: Vec::new(),
        media_keys: Vec::new(),
        media: Vec::new(),
    }
}

pub fn with_reference(mut post: Post, kind: &str) -> Post {
    post.referenced_posts.push(ReferencedPost {
        kind: kind.to_string(),
        id: "1".to_string(),
    });
    post
}

pub fn with_keys(mut post: Post, keys: &[&str]) -> Post {
    post.media_keys = keys.iter().map(|k| k.to_string()).collect();
    post
}

pub fn media(key: &str, kind: MediaKind) -> Media {
    Media {
        media_key: key.to_string(),
        kind,
        url: None,
        preview_image_url: None,
        alt_text: None,
    }
}

pub fn photo(key: &str, url: &str) -> Media {
    Media {
        url: Some(url.to_string()),
        ..media(key, MediaKind::Photo)
    }
}
