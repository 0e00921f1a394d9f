//! Row index to node identity resolution.

use std::collections::HashSet;

use crate::node::Node;

/// Position of a node in the flattened visible tree.
///
/// Only meaningful within one render pass; see [`RowMap::generation`].
pub type RowIndex = usize;

/// A visible node in the flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    /// Canonical path (node identity).
    pub path: String,
    pub label: String,
    /// Depth in tree (0 = root).
    pub depth: u16,
    pub has_children: bool,
    pub is_expanded: bool,
}

/// Flattened visible rows for the current render pass.
#[derive(Debug, Default)]
pub struct RowMap {
    rows: Vec<FlatRow>,
    generation: u64,
}

impl RowMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebind rows to identities from the given tree.
    ///
    /// Every rebuild starts a new render pass; indices from earlier passes
    /// must be recomputed.
    pub fn rebuild(&mut self, roots: &[Node], expanded: &HashSet<String>) {
        self.rows.clear();
        collect_visible(roots, expanded, 0, &mut self.rows);
        self.generation += 1;
    }

    /// Render pass counter, bumped by every rebuild.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: RowIndex) -> Option<&FlatRow> {
        self.rows.get(row)
    }

    /// Identity backing a row.
    pub fn path_at(&self, row: RowIndex) -> Option<&str> {
        self.rows.get(row).map(|r| r.path.as_str())
    }

    /// Row currently bound to an identity.
    pub fn row_of(&self, path: &str) -> Option<RowIndex> {
        self.rows.iter().position(|r| r.path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlatRow> {
        self.rows.iter()
    }
}

fn collect_visible(nodes: &[Node], expanded: &HashSet<String>, depth: u16, out: &mut Vec<FlatRow>) {
    for node in nodes {
        let is_expanded = expanded.contains(node.path());
        out.push(FlatRow {
            path: node.path().to_string(),
            label: node.label().to_string(),
            depth,
            has_children: node.has_children(),
            is_expanded,
        });

        if is_expanded && node.has_children() {
            collect_visible(node.children(), expanded, depth + 1, out);
        }
    }
}
