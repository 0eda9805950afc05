//! Error types for the formsift-core library.

use thiserror::Error;

use crate::models::record::FormType;

/// Main error type for the formsift library.
#[derive(Error, Debug)]
pub enum FormsiftError {
    /// Source could not be fetched.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Form field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl FormsiftError {
    /// The form type the document was classified as, when the failure
    /// happened after classification.
    pub fn form_type(&self) -> Option<FormType> {
        match self {
            Self::Extraction(ExtractionError::UnsupportedForm(form_type)) => Some(*form_type),
            _ => None,
        }
    }
}

/// Errors raised while resolving a source identifier into bytes.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP request could not be completed.
    #[cfg(feature = "http")]
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The fetch did not finish within the configured timeout.
    #[error("timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The response body exceeded the configured size limit.
    #[error("document is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    /// The source uses a scheme no fetcher handles.
    #[error("unsupported source scheme: {0}")]
    UnsupportedScheme(String),

    /// Local file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// Bytes are neither a PDF nor UTF-8 text.
    #[error("content is neither a PDF nor plain text")]
    UnrecognizedContent,
}

/// Errors related to form field extraction.
///
/// Missing fields are never errors; they come back as empty values.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// No extractor exists for this layout.
    #[error("extraction for {0} forms is not implemented")]
    UnsupportedForm(FormType),

    /// The document yielded no text at all.
    #[error("no text could be extracted from the document")]
    NoText,
}

/// Errors related to the embedding service.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// The HTTP request could not be completed.
    #[cfg(feature = "http")]
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("embedding service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response did not have the declared shape.
    #[error("response does not match the {expected} shape: {reason}")]
    ShapeMismatch { expected: &'static str, reason: String },

    /// Nothing to embed.
    #[error("refusing to embed empty text")]
    EmptyInput,
}

/// Result type for the formsift library.
pub type Result<T> = std::result::Result<T, FormsiftError>;
