//! Local file sources.

use std::path::Path;

use super::{Result, check_size};
use crate::error::FetchError;

/// Reads documents from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    max_bytes: usize,
}

impl FileFetcher {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    pub async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let io_err = |source| FetchError::Io {
            path: path.display().to_string(),
            source,
        };

        let metadata = tokio::fs::metadata(path).await.map_err(io_err)?;
        check_size(metadata.len() as usize, self.max_bytes)?;
        tokio::fs::read(path).await.map_err(io_err)
    }
}
