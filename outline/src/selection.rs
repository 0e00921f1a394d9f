//! Row selection for the outline control.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::rows::RowIndex;

/// Selection mode for the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// No selection allowed.
    None,
    /// At most one row selected.
    Single,
    /// Any number of rows selected.
    #[default]
    Multi,
}

/// Selected rows of the current render pass.
///
/// Ordered by row index, so [`RowSelection::first`] is the topmost
/// selected row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection {
    mode: SelectionMode,
    rows: BTreeSet<RowIndex>,
    anchor: Option<RowIndex>,
}

impl RowSelection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            rows: BTreeSet::new(),
            anchor: None,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Topmost selected row.
    pub fn first(&self) -> Option<RowIndex> {
        self.rows.first().copied()
    }

    pub fn contains(&self, row: RowIndex) -> bool {
        self.rows.contains(&row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RowIndex> + '_ {
        self.rows.iter().copied()
    }

    /// Selected rows in ascending order.
    pub fn indices(&self) -> Vec<RowIndex> {
        self.rows.iter().copied().collect()
    }

    /// Select exactly one row. Returns true if selection changed.
    pub fn select_only(&mut self, row: RowIndex) -> bool {
        if self.mode == SelectionMode::None {
            return false;
        }
        self.anchor = Some(row);
        if self.rows.len() == 1 && self.rows.contains(&row) {
            return false;
        }
        self.rows.clear();
        self.rows.insert(row);
        true
    }

    /// Toggle a row. Single mode behaves like radio buttons.
    /// Returns true if selection changed.
    pub fn toggle(&mut self, row: RowIndex) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                self.anchor = Some(row);
                if self.rows.contains(&row) {
                    self.rows.clear();
                } else {
                    self.rows.clear();
                    self.rows.insert(row);
                }
                true
            }
            SelectionMode::Multi => {
                self.anchor = Some(row);
                if !self.rows.remove(&row) {
                    self.rows.insert(row);
                }
                true
            }
        }
    }

    /// Select every row between the anchor and `row` (inclusive).
    /// Without an anchor, or outside multi mode, acts as [`Self::select_only`].
    pub fn select_range(&mut self, row: RowIndex) -> bool {
        let anchor = match (self.mode, self.anchor) {
            (SelectionMode::Multi, Some(anchor)) => anchor,
            _ => return self.select_only(row),
        };
        let range: BTreeSet<RowIndex> = (anchor.min(row)..=anchor.max(row)).collect();
        if range == self.rows {
            return false;
        }
        self.rows = range;
        true
    }

    /// Replace the selection wholesale, dropping rows at or beyond
    /// `row_count`. Single mode keeps only the topmost row.
    /// Returns true if selection changed.
    pub fn replace(&mut self, rows: impl IntoIterator<Item = RowIndex>, row_count: usize) -> bool {
        let mut next: BTreeSet<RowIndex> = match self.mode {
            SelectionMode::None => BTreeSet::new(),
            _ => rows.into_iter().filter(|r| *r < row_count).collect(),
        };
        if self.mode == SelectionMode::Single
            && let Some(first) = next.first().copied()
        {
            next = BTreeSet::from([first]);
        }
        if self.anchor.is_some_and(|a| !next.contains(&a)) {
            self.anchor = next.first().copied();
        }
        if next == self.rows {
            return false;
        }
        self.rows = next;
        true
    }

    /// Clear all selections. Returns true if anything was selected.
    pub fn clear(&mut self) -> bool {
        self.anchor = None;
        if self.rows.is_empty() {
            return false;
        }
        self.rows.clear();
        true
    }
}
