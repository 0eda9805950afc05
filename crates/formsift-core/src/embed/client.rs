//! HTTP client for a feature-extraction inference API.

use std::time::Duration;

use reqwest::Client;
use serde_json::json;
use tracing::debug;

use super::{Embedding, Result, decode_embedding};
use crate::error::EmbeddingError;
use crate::models::config::EmbeddingConfig;

/// Client for the embedding service.
///
/// Built once from [`EmbeddingConfig`] and passed by reference to whatever
/// needs it.
pub struct EmbeddingClient {
    client: Client,
    config: EmbeddingConfig,
    token: Option<String>,
}

impl EmbeddingClient {
    /// Build a client, reading the API token from the configured variable.
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let token = std::env::var(&config.token_env).ok().filter(|t| !t.is_empty());
        if token.is_none() {
            debug!("{} is not set, sending unauthenticated requests", config.token_env);
        }
        Self::with_token(config, token)
    }

    /// Build a client with an explicit token.
    pub fn with_token(config: &EmbeddingConfig, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
            token,
        })
    }

    /// Embed one text.
    pub async fn embed(&self, text: &str) -> Result<Embedding> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        let url = self.config.url();
        let mut request = self.client.post(&url).json(&json!({ "inputs": text }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(EmbeddingError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let embedding = decode_embedding(self.config.response_shape, &body)?;
        debug!(
            "Embedded {} chars into {} vector(s) of dimension {}",
            text.len(),
            embedding.len(),
            embedding.dimension()
        );
        Ok(embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_input_rejected_before_request() {
        let client = EmbeddingClient::with_token(&EmbeddingConfig::default(), None).unwrap();
        let err = client.embed("   ").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::EmptyInput));
    }
}
