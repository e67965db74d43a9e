//! Tag names the rewrites key on.

/// How `remove_tag` treats a recognized tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalKind {
    /// Formatting tag: children take its place
    Simple,
    /// List container: children take its place, list items become paragraphs
    List,
}

/// Tag vocabulary shared by the rewrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    pub row_tag: String,
    pub cell_tag: String,
    pub bold_tag: String,
    pub simple_remove: Vec<String>,
    pub list_remove: Vec<String>,
    pub list_item: String,
    pub list_item_replacement: String,
    /// Marks that may trail a word and get wrapped with it
    pub punctuation: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            row_tag: "tr".into(),
            cell_tag: "td".into(),
            bold_tag: "b".into(),
            simple_remove: vec!["b".into(), "em".into(), "p".into()],
            list_remove: vec!["ol".into(), "ul".into()],
            list_item: "li".into(),
            list_item_replacement: "p".into(),
            punctuation: ".,?!;:".into(),
        }
    }
}

impl Vocabulary {
    /// Removal behavior for `tag`, `None` when the tag is not removable.
    pub fn removal_kind(&self, tag: &str) -> Option<RemovalKind> {
        if self.list_remove.iter().any(|t| t == tag) {
            Some(RemovalKind::List)
        } else if self.simple_remove.iter().any(|t| t == tag) {
            Some(RemovalKind::Simple)
        } else {
            None
        }
    }
}
