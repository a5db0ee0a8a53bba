//! Debug captures of raw search responses, replayable with
//! [`CaptureReplaySource`](crate::sources::CaptureReplaySource).

use crate::types::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Write `response` pretty-printed into `dir`, creating the directory if needed.
pub async fn save_capture(dir: &Path, keyword: &str, response: &Value) -> Result<PathBuf> {
    fs::create_dir_all(dir).await?;

    let path = dir.join(capture_file_name(keyword, Utc::now()));
    let contents = serde_json::to_string_pretty(response)?;
    fs::write(&path, contents).await?;

    info!("X API response saved to {}", path.display());
    Ok(path)
}

/// `X-{keyword}-{timestamp}.json`, whitespace runs in the keyword collapsed to `-`.
/// Path separators become `-` too, so the file always lands directly in the capture dir.
pub fn capture_file_name(keyword: &str, at: DateTime<Utc>) -> String {
    let mut slug = String::with_capacity(keyword.len());
    let mut in_space = false;
    for c in keyword.chars() {
        if c == '/' || c == '\\' {
            slug.push('-');
            in_space = false;
        } else if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.push(c);
            in_space = false;
        }
    }

    let timestamp = at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");

    format!("X-{}-{}.json", slug, timestamp)
}
