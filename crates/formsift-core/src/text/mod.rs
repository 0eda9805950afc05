//! Text normalization for pattern-based extraction.

mod normalizer;

pub use normalizer::{NormalizedText, collapse_whitespace, normalize, normalize_pages, title_case};
