//! Rule-based field extractors for IRS forms.

pub mod patterns;
pub mod form990;
pub mod form1023;

pub use form990::{
    extract_financials, extract_governance, extract_mission, extract_officers,
    extract_org_info, extract_programs, extract_schedule_o,
};
pub use form1023::{NarrativeSection, extract_allocation_breakdown};

use regex::Regex;

/// Trait for single-value field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from normalized text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// First match of capture group `group`, trimmed. Empty captures count as absent.
pub(crate) fn first_capture(re: &Regex, text: &str, group: usize) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(group))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Capture group `group` of every non-overlapping match, in order.
pub(crate) fn all_captures(re: &Regex, text: &str, group: usize) -> Vec<String> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(group).map(|m| m.as_str().trim().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_capture_trims_and_drops_empty() {
        let re = Regex::new(r"KEY:(.*?);").unwrap();
        assert_eq!(first_capture(&re, "KEY: VALUE ;", 1), Some("VALUE".to_string()));
        assert_eq!(first_capture(&re, "KEY: ;", 1), None);
        assert_eq!(first_capture(&re, "NOTHING", 1), None);
    }

    #[test]
    fn test_all_captures_in_order() {
        let re = Regex::new(r"N(\d)").unwrap();
        assert_eq!(all_captures(&re, "N1 N2 X N3", 1), vec!["1", "2", "3"]);
    }
}
