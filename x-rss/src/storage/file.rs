use crate::traits::FeedSink;
use crate::types::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl FeedSink for FileSink {
    fn target(&self) -> String {
        self.path.display().to_string()
    }

    async fn save(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        // Rename over the target so readers never see a half-written feed.
        let temp = self.temp_path();
        debug!("Writing {} bytes to {}", content.len(), temp.display());
        fs::write(&temp, content).await?;
        fs::rename(&temp, &self.path).await?;

        info!("RSS content saved to file: {}", self.path.display());
        Ok(())
    }
}
