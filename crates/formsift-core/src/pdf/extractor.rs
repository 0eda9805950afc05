//! PDF page text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    config: PdfConfig,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            config: PdfConfig::default(),
        }
    }

    /// Set processing options.
    pub fn with_config(mut self, config: PdfConfig) -> Self {
        self.config = config;
        self
    }

    /// Extract ordered per-page text.
    ///
    /// Pages that fail individually come back empty. When no page yields any
    /// text and the fallback is enabled, pdf-extract reads the document again
    /// page by page.
    pub fn extract_pages(&self) -> Result<Vec<String>> {
        let mut page_count = self.page_count();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }
        if self.config.max_pages > 0 {
            page_count = page_count.min(self.config.max_pages as u32);
        }

        let mut pages = Vec::with_capacity(page_count as usize);
        for page in 1..=page_count {
            let text = match self.extract_page_text(page) {
                Ok(text) => text,
                Err(e) => {
                    trace!("Page {} yielded no text: {}", page, e);
                    String::new()
                }
            };
            pages.push(text);
        }

        let total_text_len: usize = pages.iter().map(|p| p.trim().len()).sum();
        debug!("Extracted {} pages, {} chars of text", pages.len(), total_text_len);

        if total_text_len == 0 && self.config.whole_document_fallback {
            warn!("No per-page text found, falling back to pdf-extract");
            return self.fallback_pages();
        }

        Ok(pages)
    }

    /// Per-page text from pdf-extract, capped at `max_pages`.
    fn fallback_pages(&self) -> Result<Vec<String>> {
        let mut pages = pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        if self.config.max_pages > 0 {
            pages.truncate(self.config.max_pages);
        }
        debug!("Fallback extracted {} pages", pages.len());
        Ok(pages)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))?;

        if !doc.get_pages().contains_key(&page) {
            return Err(PdfError::InvalidPage(page));
        }

        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};

    /// A PDF with one line of Courier text per page.
    fn pdf_with_pages(texts: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in texts {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut data = Vec::new();
        doc.save_to(&mut data).unwrap();
        data
    }

    #[test]
    fn test_fallback_keeps_page_boundaries() {
        let data = pdf_with_pages(&["Cover letter", "Form 990 Return"]);
        let mut extractor = PdfExtractor::new();
        extractor.load(&data).unwrap();

        let pages = extractor.fallback_pages().unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains("Cover letter"));
        assert!(!pages[0].contains("990"));
        assert!(pages[1].contains("Form 990"));
    }

    #[test]
    fn test_fallback_respects_max_pages() {
        let data = pdf_with_pages(&["One", "Two", "Three"]);
        let mut extractor = PdfExtractor::new().with_config(PdfConfig {
            max_pages: 2,
            ..PdfConfig::default()
        });
        extractor.load(&data).unwrap();

        assert_eq!(extractor.fallback_pages().unwrap().len(), 2);
    }

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_extract_pages_without_document() {
        let extractor = PdfExtractor::new();
        assert!(matches!(extractor.extract_pages(), Err(PdfError::NoPages)));
    }

    #[test]
    fn test_page_text_without_document() {
        let extractor = PdfExtractor::new();
        assert!(matches!(extractor.extract_page_text(1), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        assert!(matches!(extractor.load(b"not a pdf"), Err(PdfError::Parse(_))));
    }
}
