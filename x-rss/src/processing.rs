use crate::types::{Media, Post};
use std::collections::HashMap;
use tracing::debug;

/// Drop every post carrying a `retweeted` reference. Quotes and replies stay.
pub fn filter_reposts(posts: Vec<Post>) -> Vec<Post> {
    let total = posts.len();
    let kept: Vec<Post> = posts.into_iter().filter(|post| !post.is_repost()).collect();

    debug!("Repost filter kept {} of {} posts", kept.len(), total);
    kept
}

/// Attach media to each post in `media_keys` order. Keys with no matching
/// media object are dropped.
pub fn join_media(posts: Vec<Post>, media: &[Media]) -> Vec<Post> {
    // First occurrence wins if a key is ever repeated.
    let mut by_key: HashMap<&str, &Media> = HashMap::with_capacity(media.len());
    for item in media {
        by_key.entry(item.media_key.as_str()).or_insert(item);
    }

    posts
        .into_iter()
        .map(|mut post| {
            post.media = post
                .media_keys
                .iter()
                .filter_map(|key| by_key.get(key.as_str()).map(|m| (*m).clone()))
                .collect();

            if post.media.len() < post.media_keys.len() {
                debug!(
                    "Post {}: resolved {} of {} media keys",
                    post.id,
                    post.media.len(),
                    post.media_keys.len()
                );
            }
            post
        })
        .collect()
}
