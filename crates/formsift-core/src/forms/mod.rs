//! Form classification and field extraction.

mod classifier;
mod parser;
pub mod rules;
pub mod summarizer;

pub use classifier::{classify, classify_page};
pub use parser::{Form1023Parser, Form990Parser};
pub use summarizer::{Summarizer, summarize_section};

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::record::{ExtractionRecord, FormType};
use crate::text::NormalizedText;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for layout-specific form extractors.
pub trait FormExtractor: Send + Sync {
    /// Form type this extractor handles.
    fn form_type(&self) -> FormType;

    /// Extract a record from the normalized document text.
    ///
    /// Missing fields come back empty; extraction itself does not fail.
    fn extract(&self, text: &NormalizedText) -> ExtractionRecord;
}

/// Select the extractor for a form type.
///
/// [`FormType::Generic`] has no extractor and yields
/// [`ExtractionError::UnsupportedForm`].
pub fn extractor_for(
    form_type: FormType,
    config: &ExtractionConfig,
) -> Result<Box<dyn FormExtractor>> {
    match form_type {
        FormType::Form990 => Ok(Box::new(Form990Parser::new())),
        FormType::Form1023 => Ok(Box::new(Form1023Parser::new(Summarizer::from_config(config)))),
        FormType::Generic => Err(ExtractionError::UnsupportedForm(form_type)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_for_known_forms() {
        let config = ExtractionConfig::default();
        assert_eq!(extractor_for(FormType::Form990, &config).unwrap().form_type(), FormType::Form990);
        assert_eq!(extractor_for(FormType::Form1023, &config).unwrap().form_type(), FormType::Form1023);
    }

    #[test]
    fn test_generic_is_not_implemented() {
        let err = extractor_for(FormType::Generic, &ExtractionConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, ExtractionError::UnsupportedForm(FormType::Generic)));
        assert_eq!(err.to_string(), "extraction for generic forms is not implemented");
    }
}
