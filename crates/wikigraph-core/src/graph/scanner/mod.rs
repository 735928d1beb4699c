//! Link and tag extraction from raw page text.
//!
//! The scanner is a pure function of the text: it performs no I/O, no access
//! checks and knows nothing about the rest of the corpus. References come out
//! unresolved; the walker resolves them against the page's namespace.

mod extractor;
mod patterns;

pub use patterns::{EXTERNAL_PATTERN, HEADING_PATTERN, LINK_PATTERN, TAG_PATTERN};

use regex::Regex;
use std::collections::BTreeSet;

/// Everything the scanner finds in one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Unresolved link targets, in document order, repeats kept.
    pub references: Vec<String>,
    /// Distinct tags declared on the page.
    pub tags: BTreeSet<String>,
    /// First heading, if any.
    pub title: Option<String>,
}

/// Compiled link/tag/heading patterns.
#[derive(Debug, Clone)]
pub struct Scanner {
    link: Regex,
    tag: Regex,
    heading: Regex,
    external: Regex,
}

impl Scanner {
    /// Compile the scanner patterns.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            link: Regex::new(LINK_PATTERN)?,
            tag: Regex::new(TAG_PATTERN)?,
            heading: Regex::new(HEADING_PATTERN)?,
            external: Regex::new(EXTERNAL_PATTERN)?,
        })
    }

    /// Extract references, tags and title from page text.
    pub fn scan(&self, text: &str) -> ScanResult {
        ScanResult {
            references: self.references(text),
            tags: self.tags(text),
            title: self.title(text),
        }
    }

    /// Internal link targets. Repeats are kept so link weights can accumulate.
    pub fn references(&self, text: &str) -> Vec<String> {
        self.link
            .captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .filter_map(|inner| extractor::link_target(inner.as_str(), &self.external))
            .collect()
    }

    /// Tags from every `{{tag>...}}` marker on the page.
    pub fn tags(&self, text: &str) -> BTreeSet<String> {
        self.tag
            .captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .flat_map(|body| extractor::tag_tokens(body.as_str()))
            .map(str::to_string)
            .collect()
    }

    /// The first non-blank heading.
    pub fn title(&self, text: &str) -> Option<String> {
        self.heading
            .captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .find_map(|m| extractor::heading_title(m.as_str()))
    }
}
