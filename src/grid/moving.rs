//! Moving blocks of columns and rows.
//!
//! A move always relocates a whole merge-respecting block: the columns (or
//! rows) reachable from the requested index through merged regions. The
//! destination is widened the same way so no merge is split by the block
//! landing in its middle.

use tracing::debug;

use super::query::{col_count, grid_at, row_count};
use super::{apply_edits, cells, edges, select, CellsOptions, Edit, GridEntry};
use crate::error::Result;
use crate::host::{GridNode, TreeHost};
use crate::types::{AttrPatch, CellKind, CellPoint, GridSelection};

/// A resolved, non-degenerate move of the block `start..=end`.
///
/// Moving backward the block ends up starting at `to`; moving forward it
/// ends up finishing at `to`. Indices are in pre-move coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRange {
    pub start: usize,
    pub end: usize,
    pub to: usize,
    pub backward: bool,
}

impl MoveRange {
    /// Number of columns or rows in the block.
    pub fn count(&self) -> usize {
        self.end - self.start + 1
    }

    /// Where the column or row at `index` sits after the move.
    pub fn map(&self, index: usize) -> usize {
        let len = self.count();
        let in_block = index >= self.start && index <= self.end;
        if self.backward {
            if in_block {
                self.to + (index - self.start)
            } else if index >= self.to && index < self.start {
                index + len
            } else {
                index
            }
        } else if in_block {
            self.to + 1 - len + (index - self.start)
        } else if index > self.end && index <= self.to {
            index - len
        } else {
            index
        }
    }

    /// First and last index of the block after the move.
    pub fn destination(&self) -> (usize, usize) {
        let first = self.map(self.start);
        (first, first + self.count() - 1)
    }
}

/// Clamp and validate a move given the merge-respecting extents of the
/// moved index and of the target index.
fn resolve(moved: (usize, usize), target: (usize, usize), to: usize) -> Option<MoveRange> {
    let (start, end) = moved;
    let backward = to < start;
    let mut to_index = if backward { target.0 } else { target.1 };
    if target.0 <= end && target.1 >= start {
        to_index = if backward {
            target.0.min(start)
        } else {
            target.1.max(end)
        };
    }
    if to_index >= start && to_index <= end {
        return None;
    }
    Some(MoveRange {
        start,
        end,
        to: to_index,
        backward,
    })
}

/// Resolve moving column `move_index` next to column `to`.
///
/// `None` when either index is out of range or the move would change nothing.
pub fn range_of_move_column<H: TreeHost>(
    host: &H,
    grid: &GridEntry<H::Node>,
    move_index: usize,
    to: usize,
) -> Option<MoveRange> {
    let rows = row_count(host, grid);
    let cols = col_count(host, grid);
    if rows == 0 || move_index >= cols || to >= cols {
        return None;
    }
    let column = |col: usize| {
        let rect = edges(
            host,
            grid,
            GridSelection::new(CellPoint::new(0, col), CellPoint::new(rows - 1, col)),
        );
        (rect.start.col, rect.end.col)
    };
    resolve(column(move_index), column(to), to)
}

/// Resolve moving row `move_index` next to row `to`.
pub fn range_of_move_row<H: TreeHost>(
    host: &H,
    grid: &GridEntry<H::Node>,
    move_index: usize,
    to: usize,
) -> Option<MoveRange> {
    let rows = row_count(host, grid);
    let cols = col_count(host, grid);
    if cols == 0 || move_index >= rows || to >= rows {
        return None;
    }
    let row = |row: usize| {
        let rect = edges(
            host,
            grid,
            GridSelection::new(CellPoint::new(row, 0), CellPoint::new(row, cols - 1)),
        );
        (rect.start.row, rect.end.row)
    };
    resolve(row(move_index), row(to), to)
}

/// Repoint every covered cell through `remap`.
fn remap_spans<H: TreeHost>(
    host: &H,
    grid: &GridEntry<H::Node>,
    remap: impl Fn(CellPoint) -> CellPoint,
) -> Vec<Edit<H::Node>> {
    cells(host, grid, CellsOptions::default())
        .filter_map(|(cell, row, col)| match cell.cell_kind() {
            CellKind::Covered { owner } => {
                let moved = remap(owner);
                (moved != owner).then(|| {
                    Edit::SetAttrs(grid.path.join(&[row, col]), AttrPatch::new().span(moved))
                })
            }
            CellKind::Owner { .. } => None,
        })
        .collect()
}

/// Move the column block containing `move_index` next to `to`.
///
/// Returns the block's new selection (all rows), or `None` for a no-op.
pub fn move_column<H: TreeHost>(
    host: &mut H,
    grid: &GridEntry<H::Node>,
    move_index: usize,
    to: usize,
) -> Result<Option<GridSelection>> {
    let Some(range) = range_of_move_column(host, grid, move_index, to) else {
        return Ok(None);
    };
    let rows = row_count(host, grid);
    debug!(path = %grid.path, ?range, "move column");

    let mut edits = remap_spans(host, grid, |owner| {
        CellPoint::new(owner.row, range.map(owner.col))
    });

    if let Some(widths) = grid.node.cols_width() {
        let mut reordered = widths.to_vec();
        for (col, width) in widths.iter().enumerate() {
            if let Some(slot) = reordered.get_mut(range.map(col)) {
                *slot = *width;
            }
        }
        edits.push(Edit::SetAttrs(
            grid.path.clone(),
            AttrPatch::new().cols_width(reordered),
        ));
    }

    for row in 0..rows {
        for offset in 0..range.count() {
            let (from, target) = if range.backward {
                (range.start + offset, range.to + offset)
            } else {
                (range.start, range.to)
            };
            edits.push(Edit::Move(
                grid.path.join(&[row, from]),
                grid.path.join(&[row, target]),
            ));
        }
    }

    apply_edits(host, edits)?;

    let (first, last) = range.destination();
    let selection = GridSelection::new(
        CellPoint::new(0, first),
        CellPoint::new(rows.saturating_sub(1), last),
    );
    if let Some(grid) = grid_at(host, &grid.path) {
        select(host, &grid, selection);
    }
    Ok(Some(selection))
}

/// Move the row block containing `move_index` next to `to`.
///
/// Returns the block's new selection (all columns), or `None` for a no-op.
pub fn move_row<H: TreeHost>(
    host: &mut H,
    grid: &GridEntry<H::Node>,
    move_index: usize,
    to: usize,
) -> Result<Option<GridSelection>> {
    let Some(range) = range_of_move_row(host, grid, move_index, to) else {
        return Ok(None);
    };
    let cols = col_count(host, grid);
    debug!(path = %grid.path, ?range, "move row");

    let mut edits = remap_spans(host, grid, |owner| {
        CellPoint::new(range.map(owner.row), owner.col)
    });

    for offset in 0..range.count() {
        let (from, target) = if range.backward {
            (range.start + offset, range.to + offset)
        } else {
            (range.start, range.to)
        };
        edits.push(Edit::Move(grid.path.child(from), grid.path.child(target)));
    }

    apply_edits(host, edits)?;

    let (first, last) = range.destination();
    let selection = GridSelection::new(
        CellPoint::new(first, 0),
        CellPoint::new(last, cols.saturating_sub(1)),
    );
    if let Some(grid) = grid_at(host, &grid.path) {
        select(host, &grid, selection);
    }
    Ok(Some(selection))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_map_backward() {
        let range = MoveRange {
            start: 3,
            end: 4,
            to: 1,
            backward: true,
        };
        let order: Vec<usize> = (0..6).map(|i| range.map(i)).collect();
        assert_eq!(order, [0, 3, 4, 1, 2, 5]);
        assert_eq!(range.destination(), (1, 2));
    }

    #[test]
    fn test_map_forward() {
        let range = MoveRange {
            start: 0,
            end: 1,
            to: 3,
            backward: false,
        };
        let order: Vec<usize> = (0..5).map(|i| range.map(i)).collect();
        assert_eq!(order, [2, 3, 0, 1, 4]);
        assert_eq!(range.destination(), (2, 3));
    }

    #[test]
    fn test_resolve_inside_block_is_noop() {
        assert_eq!(resolve((1, 3), (1, 3), 2), None);
        assert_eq!(resolve((1, 3), (1, 3), 3), None);
        assert_eq!(resolve((2, 2), (2, 2), 2), None);
    }

    #[test]
    fn test_resolve_uses_far_edge_of_target() {
        let backward = resolve((4, 4), (1, 2), 2).unwrap();
        assert_eq!(backward.to, 1);
        assert!(backward.backward);

        let forward = resolve((0, 0), (2, 3), 2).unwrap();
        assert_eq!(forward.to, 3);
        assert!(!forward.backward);
    }
}
