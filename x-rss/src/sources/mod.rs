pub mod live;
pub mod replay;

pub use live::LiveSearchSource;
pub use replay::CaptureReplaySource;

use crate::config::{Config, SourceMode};
use crate::traits::PostSource;
use crate::types::Result;

/// Pick the source strategy the configuration asks for.
pub fn from_config(config: &Config) -> Result<Box<dyn PostSource>> {
    match &config.source {
        SourceMode::Live { bearer_token, api_base_url } => {
            let source = LiveSearchSource::new(&config.fetch, api_base_url, bearer_token.clone())?
                .with_capture_dir(config.capture_dir.clone());
            Ok(Box::new(source))
        }
        SourceMode::Replay { path } => Ok(Box::new(CaptureReplaySource::new(path.clone()))),
    }
}
