//! Bounded traversal over a sub-rectangle of cells.

use std::iter::FusedIterator;

use super::query::{col_count, row_count};
use super::GridEntry;
use crate::host::{Classify, GridNode, TreeHost};
use crate::types::{CellPoint, GridSelection};

/// Bounds and direction of a [`cells`] traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellsOptions {
    /// Top-left corner, defaults to `(0, 0)`.
    pub start: Option<CellPoint>,
    /// Bottom-right corner, defaults to the last row and column.
    pub end: Option<CellPoint>,
    /// Walk bottom-right to top-left.
    pub reverse: bool,
}

impl CellsOptions {
    pub fn within(selection: GridSelection) -> Self {
        let ordered = selection.ordered();
        Self {
            start: Some(ordered.start),
            end: Some(ordered.end),
            reverse: false,
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// Row-major iterator over `(cell, row, col)`.
///
/// Positions whose node is not a cell are skipped. The walk ends as soon as
/// it reaches a row index the grid does not have.
#[derive(Clone)]
pub struct Cells<'a, N> {
    classify: &'a dyn Classify<N>,
    grid: &'a N,
    start: CellPoint,
    end: CellPoint,
    reverse: bool,
    cursor: Option<CellPoint>,
}

/// Lazily traverse the cells of `grid` inside `options`' rectangle.
///
/// Each call returns an independent iterator starting from the first corner.
pub fn cells<'a, H: TreeHost>(
    host: &'a H,
    grid: &'a GridEntry<H::Node>,
    options: CellsOptions,
) -> Cells<'a, H::Node> {
    let rows = row_count(host, grid);
    let cols = col_count(host, grid);
    let start = options.start.unwrap_or(CellPoint::new(0, 0));
    let end = options.end.unwrap_or(CellPoint::new(
        rows.saturating_sub(1),
        cols.saturating_sub(1),
    ));
    let bounds = GridSelection::new(start, end).ordered();
    let empty = rows == 0 || cols == 0;
    let first = if options.reverse {
        bounds.end
    } else {
        bounds.start
    };

    Cells {
        classify: host.classify(),
        grid: &grid.node,
        start: bounds.start,
        end: bounds.end,
        reverse: options.reverse,
        cursor: (!empty).then_some(first),
    }
}

impl<N> Cells<'_, N> {
    fn step(&self, at: CellPoint) -> Option<CellPoint> {
        if self.reverse {
            if at.col > self.start.col {
                Some(CellPoint::new(at.row, at.col - 1))
            } else if at.row > self.start.row {
                Some(CellPoint::new(at.row - 1, self.end.col))
            } else {
                None
            }
        } else if at.col < self.end.col {
            Some(CellPoint::new(at.row, at.col + 1))
        } else if at.row < self.end.row {
            Some(CellPoint::new(at.row + 1, self.start.col))
        } else {
            None
        }
    }
}

impl<'a, N: GridNode> Iterator for Cells<'a, N> {
    type Item = (&'a N, usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(at) = self.cursor {
            self.cursor = self.step(at);
            let grid: &'a N = self.grid;
            let row = match grid.children().get(at.row) {
                Some(row) if self.classify.is_row(row) => row,
                _ => {
                    self.cursor = None;
                    return None;
                }
            };
            if let Some(cell) = row.children().get(at.col) {
                if self.classify.is_cell(cell) {
                    return Some((cell, at.row, at.col));
                }
            }
        }
        None
    }
}

impl<N: GridNode> FusedIterator for Cells<'_, N> {}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::grid::grid_at;
    use crate::host::memory::{CellDescriptor, Document, RowDescriptor};
    use crate::path::Path;

    fn document() -> Document {
        let mut doc = Document::default();
        let grid = doc.create_grid(
            (0..3)
                .map(|row| {
                    RowDescriptor::new(
                        (0..3)
                            .map(|col| CellDescriptor::text(format!("{row}{col}")))
                            .collect(),
                    )
                })
                .collect(),
            None,
        );
        doc.push(grid);
        doc
    }

    fn visit(iter: Cells<'_, crate::host::memory::Node>) -> Vec<String> {
        iter.map(|(cell, _, _)| cell.text_content()).collect()
    }

    #[test]
    fn test_sub_rectangle_forward() {
        let doc = document();
        let grid = grid_at(&doc, &Path::new(vec![0])).unwrap();
        let options = CellsOptions::within(GridSelection::new(
            CellPoint::new(2, 2),
            CellPoint::new(1, 1),
        ));
        assert_eq!(visit(cells(&doc, &grid, options)), ["11", "12", "21", "22"]);
    }

    #[test]
    fn test_sub_rectangle_reverse() {
        let doc = document();
        let grid = grid_at(&doc, &Path::new(vec![0])).unwrap();
        let options = CellsOptions::within(GridSelection::new(
            CellPoint::new(0, 1),
            CellPoint::new(1, 2),
        ))
        .reversed();
        assert_eq!(visit(cells(&doc, &grid, options)), ["12", "11", "02", "01"]);
    }

    #[test]
    fn test_stops_at_missing_row() {
        let doc = document();
        let grid = grid_at(&doc, &Path::new(vec![0])).unwrap();
        let options = CellsOptions {
            start: Some(CellPoint::new(2, 0)),
            end: Some(CellPoint::new(7, 0)),
            reverse: false,
        };
        let mut iter = cells(&doc, &grid, options);
        assert_eq!(iter.next().map(|(_, row, col)| (row, col)), Some((2, 0)));
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_restartable() {
        let doc = document();
        let grid = grid_at(&doc, &Path::new(vec![0])).unwrap();
        let iter = cells(&doc, &grid, CellsOptions::default());
        let first: Vec<_> = iter.clone().map(|(_, r, c)| (r, c)).collect();
        let second: Vec<_> = iter.map(|(_, r, c)| (r, c)).collect();
        assert_eq!(first.len(), 9);
        assert_eq!(first, second);
    }
}
