//! First-page form classification.

use tracing::debug;

use super::rules::patterns::{FORM_1023_MARKER, FORM_990_MARKER};
use crate::models::record::FormType;
use crate::text::{NormalizedText, normalize};

/// Classify a document from its normalized first page.
///
/// `FORM 990` is checked before `FORM 1023`; a page mentioning both is a 990.
/// Anything else is [`FormType::Generic`].
pub fn classify(first_page: &NormalizedText) -> FormType {
    let form_type = if FORM_990_MARKER.is_match(first_page) {
        FormType::Form990
    } else if FORM_1023_MARKER.is_match(first_page) {
        FormType::Form1023
    } else {
        FormType::Generic
    };

    debug!("Classified first page as {}", form_type);
    form_type
}

/// Classify from raw first-page text, normalizing it first.
pub fn classify_page(first_page: &str) -> FormType {
    classify(&normalize(first_page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_990() {
        assert_eq!(
            classify_page("Form 990\nReturn of Organization Exempt From Income Tax"),
            FormType::Form990
        );
    }

    #[test]
    fn test_classify_1023() {
        assert_eq!(
            classify_page("Form  1023\n(Rev. January 2020) Application for Recognition"),
            FormType::Form1023
        );
    }

    #[test]
    fn test_990_wins_when_both_present() {
        let page = "Form 1023 application; see also the Form 990 filed last year";
        assert_eq!(classify_page(page), FormType::Form990);
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(classify_page("Annual report 2023"), FormType::Generic);
        assert_eq!(classify_page(""), FormType::Generic);
    }

    #[test]
    fn test_case_insensitive_via_normalization() {
        assert_eq!(classify_page("FORM 990-EZ"), FormType::Form990);
        assert_eq!(classify_page("form\t990"), FormType::Form990);
    }

    #[test]
    fn test_deterministic() {
        let page = normalize("Form 1023 Part IV");
        let first = classify(&page);
        for _ in 0..10 {
            assert_eq!(classify(&page), first);
        }
    }
}
