use tracing::{debug, instrument};

use crate::domain::arena::{DomTree, Link, NodeId};
use crate::domain::vocabulary::{RemovalKind, Vocabulary};

/// Remove every `tag` node, promoting its children into its place.
///
/// Only tags the vocabulary recognizes are removed; list containers also
/// turn their immediate list items into paragraphs. Anything else is a no-op.
/// Returns the number of removed nodes.
#[instrument(level = "debug", skip(tree, vocab))]
pub fn remove_tag(tree: &mut DomTree, tag: &str, vocab: &Vocabulary) -> usize {
    let Some(kind) = vocab.removal_kind(tag) else {
        debug!("tag {:?} is not removable, skipping", tag);
        return 0;
    };
    let root = tree.root();
    let removed = remove_in_chain(tree, Link::Child(root), tag, kind, vocab);
    debug!("removed {} <{}> node(s)", removed, tag);
    removed
}

fn remove_in_chain(
    tree: &mut DomTree,
    start: Link,
    tag: &str,
    kind: RemovalKind,
    vocab: &Vocabulary,
) -> usize {
    let mut removed = 0;
    let mut link = start;

    while let Some(id) = tree.slot(link) {
        let node = tree.node(id);
        if let Some(first) = node.first_child {
            if node.label == tag {
                splice_out(tree, link, id, first, kind, vocab);
                removed += 1;
                // Promoted children now sit at `link`; examine them from there
                continue;
            }
            removed += remove_in_chain(tree, Link::Child(id), tag, kind, vocab);
        }
        link = Link::Sibling(id);
    }
    removed
}

/// Replace the node held at `link` by its child chain starting at `first`.
fn splice_out(
    tree: &mut DomTree,
    link: Link,
    id: NodeId,
    first: NodeId,
    kind: RemovalKind,
    vocab: &Vocabulary,
) {
    let next_sibling = tree.node(id).next_sibling;
    let mut tail = first;
    loop {
        if kind == RemovalKind::List && tree.node(tail).label == vocab.list_item {
            tree.node_mut(tail).label = vocab.list_item_replacement.clone();
        }
        match tree.node(tail).next_sibling {
            Some(next) => tail = next,
            None => break,
        }
    }
    tree.node_mut(tail).next_sibling = next_sibling;
    tree.set_slot(link, Some(first));
    tree.discard(id);
}
