//! Batch processing with per-document failure isolation.

use futures_util::stream::{self, StreamExt};
use tracing::{info, warn};

use super::Pipeline;
use crate::fetch::DocumentFetcher;
use crate::models::record::{BatchEntry, EntryOutcome};

impl<F: DocumentFetcher> Pipeline<F> {
    /// Process one source into a batch entry. Never fails: errors become
    /// [`EntryOutcome::Failed`].
    pub async fn process_entry(&self, source: &str) -> BatchEntry {
        let outcome = match self.process_source(source).await {
            Ok(document) => EntryOutcome::Extracted(document),
            Err(e) => {
                warn!("Failed to process {}: {}", source, e);
                EntryOutcome::Failed {
                    form_type: e.form_type(),
                    error: e.to_string(),
                }
            }
        };

        BatchEntry {
            source: source.to_string(),
            outcome,
        }
    }

    /// Process every source, one entry per source, in input order.
    pub async fn process_batch<S: AsRef<str>>(&self, sources: &[S]) -> Vec<BatchEntry> {
        self.process_batch_with_progress(sources, |_, _| {}).await
    }

    /// Like [`Pipeline::process_batch`], calling `on_entry` with the input
    /// index and entry as each one completes.
    ///
    /// Up to `pipeline.concurrency` documents are in flight at once; results
    /// are still yielded in input order.
    pub async fn process_batch_with_progress<S, P>(
        &self,
        sources: &[S],
        mut on_entry: P,
    ) -> Vec<BatchEntry>
    where
        S: AsRef<str>,
        P: FnMut(usize, &BatchEntry),
    {
        let concurrency = self.config.pipeline.concurrency.max(1);
        info!("Processing batch of {} documents ({} at a time)", sources.len(), concurrency);

        let entries: Vec<BatchEntry> = stream::iter(sources.iter())
            .map(|source| self.process_entry(source.as_ref()))
            .buffered(concurrency)
            .enumerate()
            .map(|(index, entry)| {
                on_entry(index, &entry);
                entry
            })
            .collect()
            .await;

        let failed = entries.iter().filter(|e| e.is_error()).count();
        info!("Batch complete: {} extracted, {} failed", entries.len() - failed, failed);

        entries
    }
}
