//! Loading options and configuration.

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Default block size (characters) for splitting unmarked text.
pub const DEFAULT_BLOCK_SIZE: usize = 1000;

/// Options for resolving and loading documents.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Character threshold at which an unmarked text block is closed
    pub block_size: usize,

    /// Directory of raw uploads, relative to the project root
    pub raw_dir: PathBuf,

    /// Directory of curated overrides, relative to the project root
    pub processed_dir: PathBuf,

    /// Consult the processed directory before the raw directory
    pub prefer_processed: bool,
}

impl LoadOptions {
    /// Create new load options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the block size used for unmarked text.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Set the raw directory (relative to the project root).
    pub fn with_raw_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.raw_dir = dir.into();
        self
    }

    /// Set the processed directory (relative to the project root).
    pub fn with_processed_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.processed_dir = dir.into();
        self
    }

    /// Ignore curated overrides and always load the raw upload.
    pub fn raw_only(mut self) -> Self {
        self.prefer_processed = false;
        self
    }

    /// Check that option values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(Error::InvalidOption(
                "block_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            raw_dir: PathBuf::from("data").join("raw"),
            processed_dir: PathBuf::from("data").join("processed"),
            prefer_processed: true,
        }
    }
}
