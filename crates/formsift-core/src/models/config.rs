//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FormsiftError, Result};

/// Main configuration for the formsift pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsiftConfig {
    /// Source fetching configuration.
    pub fetch: FetchConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Batch scheduling configuration.
    pub pipeline: PipelineConfig,

    /// Embedding service configuration.
    pub embedding: EmbeddingConfig,
}

/// Source fetching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-document timeout covering the whole fetch, in seconds.
    pub timeout_secs: u64,

    /// TCP connect timeout for HTTP sources, in seconds.
    pub connect_timeout_secs: u64,

    /// User agent sent with HTTP requests.
    pub user_agent: Option<String>,

    /// Largest accepted document in bytes (0 = unlimited).
    pub max_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: None,
            max_bytes: 50 * 1024 * 1024,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,

    /// Fall back to whole-document text extraction when no page yields text.
    pub whole_document_fallback: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            whole_document_fallback: true,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Token count above which narrative summaries are truncated.
    pub summary_max_tokens: usize,

    /// Suffix appended to truncated summaries.
    pub summary_suffix: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            summary_max_tokens: 60,
            summary_suffix: "...".to_string(),
        }
    }
}

/// Batch scheduling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Documents processed concurrently within a batch.
    pub concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

/// Shape of the vectors the embedding service returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    /// One pooled vector per input.
    Pooled,
    /// One vector per token or chunk.
    PerToken,
}

/// Embedding service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Endpoint URL; `{model}` is replaced by the model id.
    pub endpoint: String,

    /// Model id.
    pub model: String,

    /// Environment variable holding the API token.
    pub token_env: String,

    /// Declared response shape.
    pub response_shape: ResponseShape,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Longest text sent per request, in characters (0 = unlimited).
    pub max_chars: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://router.huggingface.co/hf-inference/models/{model}/pipeline/feature-extraction"
                .to_string(),
            model: "google/embeddinggemma-300m".to_string(),
            token_env: "HUGGINGFACE_TOKEN".to_string(),
            response_shape: ResponseShape::Pooled,
            timeout_secs: 60,
            max_chars: 5000,
        }
    }
}

impl EmbeddingConfig {
    /// Endpoint with the model id substituted.
    pub fn url(&self) -> String {
        self.endpoint.replace("{model}", &self.model)
    }
}

impl FormsiftConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| FormsiftError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| FormsiftError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: FormsiftConfig =
            serde_json::from_str(r#"{ "pipeline": { "concurrency": 8 } }"#).unwrap();
        assert_eq!(config.pipeline.concurrency, 8);
        assert_eq!(config.fetch.timeout_secs, 30);
        assert_eq!(config.extraction.summary_max_tokens, 60);
        assert_eq!(config.embedding.response_shape, ResponseShape::Pooled);
        assert_eq!(config.embedding.max_chars, 5000);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = FormsiftConfig::default();
        config.fetch.timeout_secs = 5;
        config.save(&path).unwrap();

        let loaded = FormsiftConfig::from_file(&path).unwrap();
        assert_eq!(loaded.fetch.timeout_secs, 5);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = FormsiftConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(missing, FormsiftError::Io(_)));

        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ \"pipeline\": { \"concurrency\": \"many\" } }").unwrap();
        let broken = FormsiftConfig::from_file(&path).unwrap_err();
        assert!(matches!(broken, FormsiftError::Config(_)));
        assert!(broken.to_string().contains("broken.json"));
    }

    #[test]
    fn test_embedding_url() {
        let config = EmbeddingConfig {
            endpoint: "http://localhost:8000/models/{model}/embed".to_string(),
            model: "acme/embedder".to_string(),
            ..EmbeddingConfig::default()
        };
        assert_eq!(config.url(), "http://localhost:8000/models/acme/embedder/embed");
    }
}
