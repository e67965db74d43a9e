//! Domain layer: the tag tree and its rewrites
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod rewrite;
pub mod serializer;
pub mod tree_traits;
pub mod vocabulary;
pub mod word;

pub use arena::{DomTree, Link, NodeId, TagNode};
pub use builder::{is_tag_name, LineKind, TreeBuilder};
pub use error::{DomainError, DomainResult};
pub use serializer::serialize;
pub use tree_traits::TreeNodeConvert;
pub use vocabulary::{RemovalKind, Vocabulary};
pub use word::{WordMatcher, WordSplit};
