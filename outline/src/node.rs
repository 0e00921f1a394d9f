//! Directory-tree nodes and the data source that supplies them.

/// A directory-tree entry.
///
/// Identity is the canonical path: two nodes with the same path are the
/// same entity for selection purposes even when one was rebuilt from a
/// fresh directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    path: String,
    label: String,
    children: Vec<Node>,
}

impl Node {
    pub fn new(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Add a child node.
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Add multiple children.
    pub fn children_from(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Find a node by path in this subtree (including self).
    pub fn find(&self, path: &str) -> Option<&Node> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(path))
    }

    /// Replace the subtree identified by `replacement.path()`.
    /// Returns true if a node was replaced.
    pub fn replace(&mut self, replacement: &Node) -> bool {
        if self.path == replacement.path {
            *self = replacement.clone();
            return true;
        }
        self.children.iter_mut().any(|c| c.replace(replacement))
    }
}

/// Authoritative supplier of the node tree.
///
/// The control never owns nodes beyond a render pass; it lists the roots
/// again on every reload.
pub trait NodeSource {
    /// Current top-level nodes with their full child structure.
    fn roots(&self) -> Vec<Node>;

    /// The full subtree for an identity.
    fn subtree(&self, path: &str) -> Option<Node> {
        self.roots().iter().find_map(|r| r.find(path).cloned())
    }
}

impl NodeSource for Vec<Node> {
    fn roots(&self) -> Vec<Node> {
        self.clone()
    }
}
