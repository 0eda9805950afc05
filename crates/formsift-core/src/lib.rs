//! Core library for IRS Form 990 / Form 1023 extraction.
//!
//! This crate provides:
//! - Source fetching (HTTP, `file://` and local paths) with per-document timeouts
//! - PDF processing (per-page text extraction)
//! - Text normalization and form classification
//! - Rule-based field extraction for Form 990 and Form 1023
//! - Batch dispatch with per-document failure isolation
//! - Embedding text preparation and an inference API client

pub mod error;
pub mod models;
pub mod pdf;
pub mod text;
pub mod forms;
pub mod fetch;
pub mod pipeline;
pub mod embed;

pub use error::{FormsiftError, Result};
pub use models::config::FormsiftConfig;
pub use models::record::{
    BatchEntry, EntryOutcome, ExtractionRecord, Form1023Record, Form990Record, FormType,
    ProcessedDocument,
};
pub use text::{NormalizedText, normalize_pages};
pub use forms::{FormExtractor, classify, extractor_for};
pub use fetch::{DocumentFetcher, SourceFetcher};
pub use pipeline::Pipeline;
pub use embed::{Embedding, EmbeddingInput, embedding_inputs};

#[cfg(feature = "http")]
pub use embed::EmbeddingClient;
