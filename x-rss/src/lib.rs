pub mod types;
pub mod config;
pub mod response;
pub mod fetcher;
pub mod capture;
pub mod traits;
pub mod sources;
pub mod processing;
pub mod render;
pub mod storage;
pub mod pipeline;
pub mod scheduler;

pub use types::*;
pub use config::Config;
pub use fetcher::SearchClient;
pub use traits::{FeedSink, PostSource};
pub use sources::{CaptureReplaySource, LiveSearchSource};
pub use processing::{filter_reposts, join_media};
pub use render::{render_feed, FeedItem, FeedMetadata};
pub use storage::{BlobSink, FileSink, MemorySink, StorageTarget};
pub use pipeline::{PipelineBuilder, XRssPipeline};
pub use scheduler::{run_once, Scheduler};
