use log::trace;

use crate::layout::Rect;
use crate::rows::{RowIndex, RowMap};

/// Where rows are drawn: the viewport, a uniform row height and the
/// current vertical scroll offset (in viewport units).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowGeometry {
    pub viewport: Rect,
    pub row_height: u16,
    pub scroll_offset: u16,
}

impl RowGeometry {
    pub fn new(viewport: Rect, row_height: u16) -> Self {
        Self {
            viewport,
            row_height,
            scroll_offset: 0,
        }
    }

    /// Row under a screen point, if any.
    pub fn row_at(&self, x: u16, y: u16, row_count: usize) -> Option<RowIndex> {
        if self.row_height == 0 || !self.viewport.contains(x, y) {
            return None;
        }
        let absolute_y = (y - self.viewport.y) as usize + self.scroll_offset as usize;
        let index = absolute_y / self.row_height as usize;
        if index < row_count { Some(index) } else { None }
    }
}

/// Hit-test a screen point against the current rows.
/// Returns None for points outside the viewport or below the last row.
pub fn hit_test_row(geometry: &RowGeometry, rows: &RowMap, x: u16, y: u16) -> Option<RowIndex> {
    let hit = geometry.row_at(x, y, rows.len());
    trace!(
        "[hit_test_row] point=({}, {}) scroll={} hit={:?}",
        x, y, geometry.scroll_offset, hit
    );
    hit
}
