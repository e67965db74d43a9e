//! Tree builder for line-oriented tag documents.
//!
//! One tag or text per line: `<name>` opens, `</name>` closes, anything else
//! is text for the innermost open tag. The first line is the document element.

use regex::Regex;
use tracing::{debug, instrument};

use crate::domain::arena::{DomTree, Link, NodeId};
use crate::domain::error::{DomainError, DomainResult};

/// True when `name` serializes to a line the builder reads back as a tag.
pub fn is_tag_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '/'))
}

/// Classification of a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Open(&'a str),
    Close(&'a str),
    Text(&'a str),
}

/// Open tag on the builder stack, with the tail of its child chain.
struct OpenTag {
    id: NodeId,
    last_child: Option<NodeId>,
}

impl OpenTag {
    fn new(id: NodeId) -> Self {
        Self {
            id,
            last_child: None,
        }
    }

    fn append_link(&self) -> Link {
        match self.last_child {
            Some(last) => Link::Sibling(last),
            None => Link::Child(self.id),
        }
    }
}

/// Constructs a [`DomTree`] from a stream of lines.
pub struct TreeBuilder {
    open_regex: Regex,
    close_regex: Regex,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            open_regex: Regex::new(r"^<([^<>/\s]+)>$").unwrap(),
            close_regex: Regex::new(r"^</([^<>/\s]+)>$").unwrap(),
        }
    }

    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        let trimmed = line.trim();
        if let Some(caps) = self.close_regex.captures(trimmed) {
            if let Some(name) = caps.get(1) {
                return LineKind::Close(name.as_str());
            }
        }
        if let Some(caps) = self.open_regex.captures(trimmed) {
            if let Some(name) = caps.get(1) {
                return LineKind::Open(name.as_str());
            }
        }
        LineKind::Text(line)
    }

    /// Build a tree from lines, consumed once and in order.
    ///
    /// Blank lines before and after the document element are skipped; inside
    /// it they become text nodes. The input must be balanced: every opened
    /// tag, the document element included, is closed by a matching line.
    #[instrument(level = "debug", skip_all)]
    pub fn build<I, S>(&self, lines: I) -> DomainResult<DomTree>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut numbered = lines
            .into_iter()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line));

        let mut tree = loop {
            let Some((line_no, line)) = numbered.next() else {
                return Err(DomainError::EmptyInput);
            };
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            match self.classify(line) {
                LineKind::Open(name) => {
                    debug!("document element <{}> at line {}", name, line_no);
                    break DomTree::new(name);
                }
                _ => {
                    return Err(DomainError::MissingRootTag {
                        line: line_no,
                        found: line.to_string(),
                    })
                }
            }
        };

        let mut stack = vec![OpenTag::new(tree.root())];

        for (line_no, line) in numbered {
            let line = line.as_ref();
            // Blank lines inside the document element are text
            if stack.is_empty() && line.trim().is_empty() {
                continue;
            }
            let kind = self.classify(line);

            let Some(top) = stack.last_mut() else {
                return Err(match kind {
                    LineKind::Close(tag) => DomainError::UnexpectedClose {
                        line: line_no,
                        tag: tag.to_string(),
                    },
                    _ => DomainError::TrailingContent { line: line_no },
                });
            };

            match kind {
                LineKind::Close(tag) => {
                    let expected = tree.label(top.id).unwrap_or_default();
                    if expected != tag {
                        return Err(DomainError::MismatchedClose {
                            line: line_no,
                            expected: expected.to_string(),
                            found: tag.to_string(),
                        });
                    }
                    stack.pop();
                }
                LineKind::Open(tag) => {
                    let id = tree.attach(top.append_link(), tag);
                    top.last_child = Some(id);
                    stack.push(OpenTag::new(id));
                }
                LineKind::Text(text) => {
                    let id = tree.attach(top.append_link(), text);
                    top.last_child = Some(id);
                }
            }
        }

        if !stack.is_empty() {
            let open = stack
                .iter()
                .filter_map(|open| tree.label(open.id))
                .map(str::to_string)
                .collect();
            return Err(DomainError::UnclosedTags { open });
        }

        debug!("built tree with {} nodes", tree.len());
        Ok(tree)
    }
}

impl DomTree {
    /// Build a tree from a complete document string.
    pub fn parse(text: &str) -> DomainResult<Self> {
        TreeBuilder::new().build(text.lines())
    }
}
