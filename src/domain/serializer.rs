//! Line-oriented serializer, the inverse of the tree builder.

use std::fmt::{self, Write};

use crate::domain::arena::{DomTree, NodeId};

/// Serialize the whole tree, one newline-terminated line per tag or text.
pub fn serialize(tree: &DomTree) -> String {
    tree.to_string()
}

/// Write the tree in line format to any formatter sink.
pub fn write_html<W: Write>(tree: &DomTree, out: &mut W) -> fmt::Result {
    write_chain(tree, tree.root(), out)
}

fn write_chain<W: Write>(tree: &DomTree, start: NodeId, out: &mut W) -> fmt::Result {
    for id in tree.chain(start) {
        let node = tree.node(id);
        match node.first_child {
            None => writeln!(out, "{}", node.label)?,
            Some(child) => {
                writeln!(out, "<{}>", node.label)?;
                write_chain(tree, child, out)?;
                writeln!(out, "</{}>", node.label)?;
            }
        }
    }
    Ok(())
}
