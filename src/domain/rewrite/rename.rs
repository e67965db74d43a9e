use tracing::{debug, instrument};

use crate::domain::arena::{DomTree, NodeId};
use crate::domain::builder::is_tag_name;

/// Relabel every node whose label equals `old_tag`.
///
/// An empty `old_tag` or a `new_tag` that is not a valid tag name (empty,
/// or containing whitespace, `<`, `>` or `/`) makes this a no-op.
/// Returns the number of relabelled nodes.
#[instrument(level = "debug", skip(tree))]
pub fn rename(tree: &mut DomTree, old_tag: &str, new_tag: &str) -> usize {
    if old_tag.is_empty() || !is_tag_name(new_tag) {
        debug!("rename {:?} -> {:?} skipped", old_tag, new_tag);
        return 0;
    }
    let targets: Vec<NodeId> = tree
        .preorder()
        .filter(|(_, node)| node.label == old_tag)
        .map(|(id, _)| id)
        .collect();
    for &id in &targets {
        tree.node_mut(id).label = new_tag.to_string();
    }
    debug!("renamed {} node(s)", targets.len());
    targets.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "<html>\n<body>\n<b>\nbold\n</b>\n<p>\n<b>\nnested\n</b>\n</p>\n</body>\n</html>\n";

    #[test]
    fn given_tag_in_children_and_siblings_when_renaming_then_all_relabelled() {
        let mut tree = DomTree::parse(DOC).unwrap();
        assert_eq!(rename(&mut tree, "b", "strong"), 2);
        assert_eq!(tree.count_tags("b"), 0);
        assert_eq!(tree.count_tags("strong"), 2);
    }

    #[test]
    fn given_rename_applied_twice_when_serializing_then_same_as_once() {
        let mut once = DomTree::parse(DOC).unwrap();
        rename(&mut once, "b", "strong");
        let mut twice = once.clone();
        assert_eq!(rename(&mut twice, "b", "strong"), 0);
        assert_eq!(once.to_string(), twice.to_string());
    }

    #[test]
    fn given_identity_rename_when_serializing_then_unchanged() {
        let mut tree = DomTree::parse(DOC).unwrap();
        rename(&mut tree, "p", "p");
        assert_eq!(tree.to_string(), DOC);
    }

    #[test]
    fn given_empty_arguments_when_renaming_then_noop() {
        let mut tree = DomTree::parse(DOC).unwrap();
        assert_eq!(rename(&mut tree, "", "x"), 0);
        assert_eq!(rename(&mut tree, "b", ""), 0);
        assert_eq!(tree.to_string(), DOC);
    }

    #[test]
    fn given_new_tag_outside_line_syntax_when_renaming_then_noop() {
        let mut tree = DomTree::parse(DOC).unwrap();
        for bad in ["x/y", "a b", "<i>", "i\n"] {
            assert_eq!(rename(&mut tree, "b", bad), 0);
        }
        assert_eq!(tree.to_string(), DOC);
    }
}
