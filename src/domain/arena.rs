//! Arena-backed tag tree with a first-child / next-sibling shape.
//!
//! Nodes never point back to their parent or previous sibling. Every relink
//! goes through a [`Link`], the attachment point that currently owns a node.

use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

/// Stable handle of a node inside a [`DomTree`].
pub type NodeId = Index;

/// Tree node: a tag name when it has children, literal text when it is a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNode {
    /// Tag name (container) or text content (leaf)
    pub label: String,
    /// Head of this node's child chain
    pub first_child: Option<NodeId>,
    /// Next node in the parent's child chain
    pub next_sibling: Option<NodeId>,
}

impl TagNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            first_child: None,
            next_sibling: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }
}

/// Attachment point of a node: the slot that holds its id.
///
/// `Child(parent)` is the parent's `first_child`, `Sibling(prev)` is the
/// previous sibling's `next_sibling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Child(NodeId),
    Sibling(NodeId),
}

/// Document tree rooted at a synthetic document element.
///
/// Ids handed out by a tree stay valid until the node is unlinked by a
/// rewrite; accessing a discarded id panics.
#[derive(Debug, Clone)]
pub struct DomTree {
    arena: Arena<TagNode>,
    root: NodeId,
}

impl DomTree {
    /// Create a tree holding only the document element.
    pub fn new(root_label: impl Into<String>) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TagNode::new(root_label));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&TagNode> {
        self.arena.get(id)
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.arena.get(id).map(|node| node.label.as_str())
    }

    pub(crate) fn node(&self, id: NodeId) -> &TagNode {
        &self.arena[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TagNode {
        &mut self.arena[id]
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// A tree always holds its root, so this is true only for a bare root.
    pub fn is_empty(&self) -> bool {
        self.node(self.root).is_leaf()
    }

    /// Node currently held by `link`.
    pub fn slot(&self, link: Link) -> Option<NodeId> {
        match link {
            Link::Child(parent) => self.node(parent).first_child,
            Link::Sibling(prev) => self.node(prev).next_sibling,
        }
    }

    /// Point `link` at `target`, dropping whatever it held before.
    pub(crate) fn set_slot(&mut self, link: Link, target: Option<NodeId>) {
        match link {
            Link::Child(parent) => self.node_mut(parent).first_child = target,
            Link::Sibling(prev) => self.node_mut(prev).next_sibling = target,
        }
    }

    pub(crate) fn alloc(&mut self, node: TagNode) -> NodeId {
        self.arena.insert(node)
    }

    /// Drop a node that is no longer referenced by any link.
    pub(crate) fn discard(&mut self, id: NodeId) {
        self.arena.remove(id);
    }

    /// Create a leaf and hang it at `link`, which must currently be empty.
    pub(crate) fn attach(&mut self, link: Link, label: impl Into<String>) -> NodeId {
        let id = self.alloc(TagNode::new(label));
        self.set_slot(link, Some(id));
        id
    }

    /// Append a new node as the last child of `parent`.
    ///
    /// Walks the child chain to its tail.
    #[instrument(level = "trace", skip(self, label))]
    pub fn append_child(&mut self, parent: NodeId, label: impl Into<String>) -> NodeId {
        let link = match self.node(parent).first_child {
            None => Link::Child(parent),
            Some(first) => Link::Sibling(self.last_sibling(first)),
        };
        self.attach(link, label)
    }

    /// Last node of the chain starting at `id`.
    pub fn last_sibling(&self, id: NodeId) -> NodeId {
        let mut tail = id;
        while let Some(next) = self.node(tail).next_sibling {
            tail = next;
        }
        tail
    }

    /// Child chain of `parent`, in document order.
    pub fn children(&self, parent: NodeId) -> Siblings<'_> {
        Siblings {
            tree: self,
            next: self.get(parent).and_then(|node| node.first_child),
        }
    }

    /// Chain starting at `id` itself.
    pub fn chain(&self, id: NodeId) -> Siblings<'_> {
        Siblings {
            tree: self,
            next: Some(id),
        }
    }

    /// Depth-first, document-order walk over every node, root first.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder::new(self)
    }

    /// Number of nodes on the longest root-to-leaf path.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, id: NodeId) -> usize {
        1 + self
            .children(id)
            .map(|child| self.calculate_depth(child))
            .max()
            .unwrap_or(0)
    }

    /// Labels of all leaves, in document order.
    pub fn leaf_labels(&self) -> Vec<&str> {
        self.preorder()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.label.as_str())
            .collect()
    }

    /// Number of container nodes carrying `label`.
    pub fn count_tags(&self, label: &str) -> usize {
        self.preorder()
            .filter(|(_, node)| !node.is_leaf() && node.label == label)
            .count()
    }
}

impl fmt::Display for DomTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::domain::serializer::write_html(self, f)
    }
}

/// Iterator over a sibling chain.
pub struct Siblings<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Siblings<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.get(current).and_then(|node| node.next_sibling);
        Some(current)
    }
}

pub struct Preorder<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl<'a> Preorder<'a> {
    fn new(tree: &'a DomTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root()],
        }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (NodeId, &'a TagNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.get(current) {
                // Sibling goes below the child so the subtree is finished first
                if let Some(next) = node.next_sibling {
                    self.stack.push(next);
                }
                if let Some(child) = node.first_child {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}
