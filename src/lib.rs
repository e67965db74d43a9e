//! tagtree: build, rewrite and re-serialize line-oriented HTML tag trees.
//!
//! Documents hold one tag or text per line:
//!
//! ```text
//! <html>
//! <body>
//! <p>
//! the cat sat
//! </p>
//! </body>
//! </html>
//! ```
//!
//! [`domain`] parses such a stream into a [`DomTree`], rewrites it in place
//! and serializes it back. The remaining layers add file I/O, edit scripts,
//! configuration and the `tagtree` command line.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{serialize, DomTree, DomainError, DomainResult, TreeBuilder, Vocabulary};
