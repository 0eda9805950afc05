//! Canonical text blob construction.
//!
//! Extraction rules match against a single upper-case line with every
//! whitespace run collapsed to one space. Original casing is not kept;
//! output fields that need readable casing go through [`title_case`].

use std::fmt;
use std::ops::Deref;

/// Text that has been joined, collapsed, trimmed and upper-cased.
///
/// Only [`normalize`] and [`normalize_pages`] construct it, so extractors
/// taking `&NormalizedText` never see raw page text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a single text.
pub fn normalize(text: &str) -> NormalizedText {
    NormalizedText(collapse_whitespace(text).to_uppercase())
}

/// Join pages with newlines and normalize the result.
pub fn normalize_pages<S: AsRef<str>>(pages: &[S]) -> NormalizedText {
    let parts: Vec<&str> = pages.iter().map(|p| p.as_ref()).collect();
    normalize(&parts.join("\n"))
}

/// Collapse whitespace runs to single spaces and trim, keeping case.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Capitalize the first letter of every alphabetic run and lower-case the rest.
///
/// `"ACME'S 12TH FUND"` becomes `"Acme'S 12Th Fund"`; any non-letter starts a
/// new run.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}
