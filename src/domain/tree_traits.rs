//! Box-drawing views of a tree, used by `tagtree tree`.

use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::{DomTree, NodeId};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for DomTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(tree: &DomTree, id: NodeId) -> Tree<String> {
            let node = tree.node(id);
            if node.is_leaf() {
                // Quoted so leading and trailing spaces stay visible
                return Tree::new(format!("{:?}", node.label));
            }
            let leaves: Vec<_> = tree.children(id).map(|child| build_tree(tree, child)).collect();
            Tree::new(format!("<{}>", node.label)).with_leaves(leaves)
        }

        build_tree(self, self.root())
    }
}
