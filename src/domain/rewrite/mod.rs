//! In-place structural rewrites of a [`DomTree`].
//!
//! Each rewrite walks the tree through [`Link`](crate::domain::arena::Link)
//! attachment points so a replaced node is always relinked from the slot
//! that owned it, whether that is a parent's first child or a previous
//! sibling.

mod add_tag;
mod bold_row;
mod remove;
mod rename;

pub use add_tag::add_tag;
pub use bold_row::bold_row;
pub use remove::remove_tag;
pub use rename::rename;

use crate::domain::arena::DomTree;
use crate::domain::error::DomainResult;
use crate::domain::vocabulary::Vocabulary;

impl DomTree {
    /// See [`rename`].
    pub fn rename_tag(&mut self, old_tag: &str, new_tag: &str) -> usize {
        rename(self, old_tag, new_tag)
    }

    /// See [`bold_row`], using the default vocabulary.
    pub fn bold_row(&mut self, row: usize) -> usize {
        bold_row(self, row, &Vocabulary::default())
    }

    /// See [`remove_tag`], using the default vocabulary.
    pub fn remove_tag(&mut self, tag: &str) -> usize {
        remove_tag(self, tag, &Vocabulary::default())
    }

    /// See [`add_tag`], using the default vocabulary.
    pub fn add_tag(&mut self, word: &str, tag: &str) -> DomainResult<usize> {
        add_tag(self, word, tag, &Vocabulary::default())
    }
}
