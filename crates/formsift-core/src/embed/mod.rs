//! Embedding text preparation and the inference API client.

#[cfg(feature = "http")]
mod client;
mod text;

#[cfg(feature = "http")]
pub use client::EmbeddingClient;
pub use text::{EmbeddingInput, embedding_inputs};

use serde::{Deserialize, Serialize};

use crate::error::EmbeddingError;
use crate::models::config::ResponseShape;

/// Result type for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Vectors returned for one input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "vectors", rename_all = "snake_case")]
pub enum Embedding {
    /// One pooled vector for the whole text.
    Single(Vec<f32>),
    /// One vector per token or chunk.
    PerChunk(Vec<Vec<f32>>),
}

impl Embedding {
    /// Width of the vectors.
    pub fn dimension(&self) -> usize {
        match self {
            Self::Single(v) => v.len(),
            Self::PerChunk(chunks) => chunks.first().map(Vec::len).unwrap_or(0),
        }
    }

    /// Number of vectors.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::PerChunk(chunks) => chunks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dimension() == 0
    }
}

/// Decode a response body according to the declared shape.
///
/// A body of the other shape is a [`EmbeddingError::ShapeMismatch`]; it is
/// never reinterpreted.
pub fn decode_embedding(shape: ResponseShape, body: &[u8]) -> Result<Embedding> {
    match shape {
        ResponseShape::Pooled => serde_json::from_slice::<Vec<f32>>(body)
            .map(Embedding::Single)
            .map_err(|e| EmbeddingError::ShapeMismatch {
                expected: "pooled",
                reason: e.to_string(),
            }),
        ResponseShape::PerToken => serde_json::from_slice::<Vec<Vec<f32>>>(body)
            .map(Embedding::PerChunk)
            .map_err(|e| EmbeddingError::ShapeMismatch {
                expected: "per_token",
                reason: e.to_string(),
            }),
    }
}
