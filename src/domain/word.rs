//! Whole-word matching inside text nodes.

use regex::Regex;

use crate::domain::error::{DomainError, DomainResult};

/// A text split around the first matched word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSplit {
    pub before: String,
    /// The word as written in the text, trailing punctuation included
    pub matched: String,
    pub after: String,
}

impl WordSplit {
    /// True when the match covers the whole text.
    pub fn is_whole(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}

/// Case-insensitive whole-word matcher.
///
/// A match is bounded by whitespace or the text edge on both sides and may
/// absorb one trailing punctuation mark.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    pattern: Regex,
}

impl WordMatcher {
    pub fn new(word: &str, punctuation: &str) -> DomainResult<Self> {
        let marks: String = punctuation
            .chars()
            .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
            .collect();
        let trailing = if marks.is_empty() {
            String::new()
        } else {
            format!("[{}]?", marks)
        };
        let source = format!(r"(?i)(?:^|\s)({}{})(?:\s|$)", regex::escape(word), trailing);
        let pattern = Regex::new(&source).map_err(|e| DomainError::InvalidPattern {
            word: word.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { pattern })
    }

    /// Split `text` around its first match.
    pub fn split(&self, text: &str) -> Option<WordSplit> {
        let found = self.pattern.captures(text)?.get(1)?;
        Some(WordSplit {
            before: text[..found.start()].to_string(),
            matched: found.as_str().to_string(),
            after: text[found.end()..].to_string(),
        })
    }
}
