//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed documents or invalid rewrite requests.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("empty input: no document element found")]
    EmptyInput,

    #[error("line {line}: expected opening tag for document element, found {found:?}")]
    MissingRootTag { line: usize, found: String },

    #[error("line {line}: closing tag </{tag}> without matching opening tag")]
    UnexpectedClose { line: usize, tag: String },

    #[error("line {line}: closing tag </{found}> does not match open tag <{expected}>")]
    MismatchedClose {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("line {line}: content after document element was closed")]
    TrailingContent { line: usize },

    #[error("unbalanced tags: {} still open at end of input ({})", open.len(), open.join(", "))]
    UnclosedTags { open: Vec<String> },

    #[error("invalid word pattern {word:?}: {message}")]
    InvalidPattern { word: String, message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
