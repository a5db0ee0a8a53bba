use crate::traits::FeedSink;
use crate::types::Result;
use async_trait::async_trait;
use std::sync::Mutex;

/// Keeps every saved feed in memory. Handy for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    saved: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Vec<String> {
        self.saved.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl FeedSink for MemorySink {
    fn target(&self) -> String {
        "memory".to_string()
    }

    async fn save(&self, content: &str) -> Result<()> {
        self.saved
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(content.to_string());
        Ok(())
    }
}
