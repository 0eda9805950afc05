//! Bounded-length previews of narrative sections.

use crate::models::config::ExtractionConfig;
use crate::text::collapse_whitespace;

/// Token limit used when no configuration is given.
pub const DEFAULT_MAX_TOKENS: usize = 60;

/// Truncates narrative spans to a fixed number of whitespace tokens.
#[derive(Debug, Clone)]
pub struct Summarizer {
    max_tokens: usize,
    suffix: String,
}

impl Summarizer {
    /// Create a summarizer with the default limit of 60 tokens and `...` suffix.
    pub fn new() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            suffix: "...".to_string(),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            max_tokens: config.summary_max_tokens,
            suffix: config.summary_suffix.clone(),
        }
    }

    /// Set the token limit.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the suffix appended to truncated output.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Collapse whitespace and keep at most `max_tokens` tokens.
    pub fn summarize(&self, raw: &str) -> String {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.len() > self.max_tokens {
            let mut summary = tokens[..self.max_tokens].join(" ");
            summary.push_str(&self.suffix);
            summary
        } else {
            collapse_whitespace(raw)
        }
    }
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Summarize with the default settings.
pub fn summarize_section(raw: &str) -> String {
    Summarizer::new().summarize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn words(n: usize) -> String {
        (1..=n).map(|i| format!("W{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_long_input_truncated_to_sixty_tokens() {
        let summary = summarize_section(&words(100));
        assert!(summary.ends_with("..."));
        let body = summary.trim_end_matches("...");
        assert_eq!(body.split_whitespace().count(), 60);
        assert_eq!(body, words(60));
    }

    #[test]
    fn test_short_input_unchanged() {
        assert_eq!(summarize_section(&words(10)), words(10));
    }

    #[test]
    fn test_exactly_at_limit_not_truncated() {
        assert_eq!(summarize_section(&words(60)), words(60));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(summarize_section(""), "");
        assert_eq!(summarize_section("   \n\t"), "");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(summarize_section("  A\n\nB\t C  "), "A B C");
    }

    #[test]
    fn test_custom_limit_and_suffix() {
        let summarizer = Summarizer::new().with_max_tokens(3).with_suffix(" [more]");
        assert_eq!(summarizer.summarize("ONE TWO THREE FOUR"), "ONE TWO THREE [more]");
    }
}
