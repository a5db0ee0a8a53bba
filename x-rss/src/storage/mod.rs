pub mod blob;
pub mod file;
pub mod memory;

pub use blob::{BlobEndpoint, BlobSink};
pub use file::FileSink;
pub use memory::MemorySink;

use crate::config::Config;
use crate::traits::FeedSink;
use crate::types::Result;

/// Which persistence collaborator a run writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StorageTarget {
    File,
    Blob,
}

pub fn from_config(config: &Config, target: StorageTarget) -> Result<Box<dyn FeedSink>> {
    let storage = &config.storage;
    match target {
        StorageTarget::File => Ok(Box::new(FileSink::new(&storage.output_name))),
        StorageTarget::Blob => Ok(Box::new(BlobSink::new(
            &config.fetch,
            storage.connection_string()?,
            &storage.container,
            &storage.output_name,
        )?)),
    }
}
