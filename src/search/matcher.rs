//! Word-conjunction text matching.
//!
//! A query is split on whitespace into required words. A document matches
//! when every word occurs, case-insensitively and as a plain substring, in
//! its title, author or content. Keyword and phrase searches share this
//! single rule: a phrase is just a query with more than one required word.

use crate::error::AppError;
use crate::models::document::Document;

/// Separates fields in [`searchable_text`]. Query words never contain
/// whitespace, so no word can match across two fields.
const FIELD_SEPARATOR: char = '\n';

/// The lowercased, deduplicated words of a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerms {
    words: Vec<String>,
}

impl SearchTerms {
    /// Parse a raw query. Empty or whitespace-only input is rejected.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let mut words: Vec<String> = Vec::new();
        for word in raw.split_whitespace().map(fold) {
            if !words.contains(&word) {
                words.push(word);
            }
        }

        if words.is_empty() {
            return Err(AppError::InvalidQuery(
                "search term cannot be empty".into(),
            ));
        }

        Ok(Self { words })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Whether every word occurs somewhere in the document's text fields.
    pub fn matches(&self, document: &Document) -> bool {
        contains_all(&searchable_text(document), &self.words)
    }
}

/// Lowercased title, author and content, one per line.
pub fn searchable_text(document: &Document) -> String {
    let mut text = String::with_capacity(
        document.title.len() + document.author.len() + document.content.len() + 2,
    );
    text.push_str(&fold(&document.title));
    text.push(FIELD_SEPARATOR);
    text.push_str(&fold(&document.author));
    text.push(FIELD_SEPARATOR);
    text.push_str(&fold(&document.content));
    text
}

/// Lowercase one character at a time.
///
/// Unlike `str::to_lowercase` the result never depends on the neighbouring
/// characters (a final `Σ` folds to `σ` like any other), so a folded word
/// is a substring of a folded field whenever it is one case-insensitively.
pub fn fold(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// True iff every (already lowercased) word is a substring of `text`.
pub fn contains_all(text: &str, words: &[String]) -> bool {
    words.iter().all(|word| text.contains(word.as_str()))
}
