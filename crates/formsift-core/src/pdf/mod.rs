//! Page text extraction from fetched documents.

mod extractor;

pub use extractor::PdfExtractor;

use tracing::debug;

use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Page separator for pre-extracted plain-text documents.
pub const FORM_FEED: char = '\x0C';

/// Kind of content a fetched document holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// A PDF file.
    Pdf,
    /// UTF-8 text, pages separated by form feeds.
    PlainText,
}

impl SourceFormat {
    /// Detect the format from the leading bytes.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        let head = &data[..data.len().min(1024)];
        if head.windows(5).any(|w| w == b"%PDF-") {
            Some(Self::Pdf)
        } else if std::str::from_utf8(data).is_ok() {
            Some(Self::PlainText)
        } else {
            None
        }
    }
}

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;
}

/// Read ordered per-page text from document bytes.
pub fn read_pages(data: &[u8], config: &PdfConfig) -> Result<Vec<String>> {
    match SourceFormat::sniff(data) {
        Some(SourceFormat::Pdf) => {
            let mut extractor = PdfExtractor::new().with_config(config.clone());
            extractor.load(data)?;
            extractor.extract_pages()
        }
        Some(SourceFormat::PlainText) => {
            let text = std::str::from_utf8(data).map_err(|_| PdfError::UnrecognizedContent)?;
            let mut pages = split_text_pages(text);
            if config.max_pages > 0 {
                pages.truncate(config.max_pages);
            }
            debug!("Read {} plain-text pages", pages.len());
            Ok(pages)
        }
        None => Err(PdfError::UnrecognizedContent),
    }
}

/// Split pre-extracted text on form feeds.
pub fn split_text_pages(text: &str) -> Vec<String> {
    text.split(FORM_FEED).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sniff() {
        assert_eq!(SourceFormat::sniff(b"%PDF-1.7\n..."), Some(SourceFormat::Pdf));
        assert_eq!(SourceFormat::sniff(b"Form 990"), Some(SourceFormat::PlainText));
        assert_eq!(SourceFormat::sniff(&[0xff, 0xfe, 0x00, 0xd8]), None);
    }

    #[test]
    fn test_read_plain_text_pages() {
        let data = "Form 990\x0CPart III\x0CSchedule O".as_bytes();
        let pages = read_pages(data, &PdfConfig::default()).unwrap();
        assert_eq!(pages, vec!["Form 990", "Part III", "Schedule O"]);
    }

    #[test]
    fn test_read_plain_text_respects_max_pages() {
        let config = PdfConfig { max_pages: 1, ..PdfConfig::default() };
        let pages = read_pages(b"one\x0Ctwo", &config).unwrap();
        assert_eq!(pages, vec!["one"]);
    }

    #[test]
    fn test_binary_garbage_rejected() {
        let err = read_pages(&[0x00, 0x9f, 0x92, 0x96], &PdfConfig::default()).unwrap_err();
        assert!(matches!(err, PdfError::UnrecognizedContent));
    }

    #[test]
    fn test_corrupt_pdf_is_parse_error() {
        let err = read_pages(b"%PDF-1.4 truncated", &PdfConfig::default()).unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }
}
