//! Dispatch pipeline: fetch, read pages, classify, extract, assemble.
//!
//! A document moves through `Fetched -> Classified -> Extracted -> Assembled`
//! or stops as failed at any stage. Batches isolate failures per document.

mod batch;

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{ExtractionError, FetchError, Result};
use crate::fetch::{DocumentFetcher, SourceFetcher};
use crate::forms::{classify, extractor_for};
use crate::models::config::FormsiftConfig;
use crate::models::record::ProcessedDocument;
use crate::pdf::read_pages;
use crate::text::{normalize, normalize_pages};

/// Orchestrates extraction for single documents and batches.
pub struct Pipeline<F = SourceFetcher> {
    config: FormsiftConfig,
    fetcher: F,
}

impl Pipeline<SourceFetcher> {
    /// Build a pipeline with the default source fetcher.
    pub fn new(config: FormsiftConfig) -> Result<Self> {
        let fetcher = SourceFetcher::new(&config.fetch)?;
        Ok(Self { config, fetcher })
    }
}

impl<F: DocumentFetcher> Pipeline<F> {
    /// Build a pipeline with a custom fetcher.
    pub fn with_fetcher(config: FormsiftConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &FormsiftConfig {
        &self.config
    }

    /// Classify and extract from ordered per-page text.
    pub fn process_pages<S: AsRef<str>>(&self, pages: &[S]) -> Result<ProcessedDocument> {
        let start = Instant::now();

        let text = normalize_pages(pages);
        if text.is_empty() {
            return Err(ExtractionError::NoText.into());
        }

        let first_page = pages.first().map(|p| normalize(p.as_ref())).unwrap_or_default();
        let form_type = classify(&first_page);

        let extractor = extractor_for(form_type, &self.config.extraction)?;
        let data = extractor.extract(&text);

        debug!(
            "Extracted {} record from {} pages in {}ms",
            form_type,
            pages.len(),
            start.elapsed().as_millis()
        );

        Ok(ProcessedDocument {
            form_type,
            data,
            processed_at: Utc::now(),
        })
    }

    /// Read pages from document bytes, then classify and extract.
    pub fn process_bytes(&self, data: &[u8]) -> Result<ProcessedDocument> {
        let pages = read_pages(data, &self.config.pdf)?;
        self.process_pages(&pages)
    }

    /// Fetch a source, then classify and extract.
    pub async fn process_source(&self, source: &str) -> Result<ProcessedDocument> {
        info!("Processing {}", source);
        let data = self.fetch(source).await?;
        self.process_bytes(&data)
    }

    /// Fetch with the configured per-document timeout.
    async fn fetch(&self, source: &str) -> Result<Vec<u8>> {
        let secs = self.config.fetch.timeout_secs;
        let data = tokio::time::timeout(Duration::from_secs(secs), self.fetcher.fetch(source))
            .await
            .map_err(|_| FetchError::Timeout { secs })??;
        debug!("Fetched {} bytes from {}", data.len(), source);
        Ok(data)
    }
}
