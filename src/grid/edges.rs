//! Edge normalization and span resolution.
//!
//! A rectangle "respects merges" when every merged region either lies fully
//! inside it or fully outside. [`edges`] grows a requested rectangle to the
//! smallest such rectangle.

use tracing::{trace, warn};

use super::{get_cell, GridEntry};
use super::query::{col_count, row_count};
use crate::host::{GridNode, TreeHost};
use crate::types::{CellKind, CellPoint, CellRegion, GridSelection};

/// The region owning the cell at `point`.
///
/// For an owner this is its own region; for a covered cell, the region of the
/// owner its span points at. `None` if the cell is missing or the span does
/// not resolve to an owner.
pub fn owner_region<H: TreeHost>(
    host: &H,
    grid: &GridEntry<H::Node>,
    point: CellPoint,
) -> Option<CellRegion> {
    let cell = get_cell(host, grid, point)?;
    match cell.node.cell_kind() {
        CellKind::Owner { rowspan, colspan } => Some(CellRegion {
            origin: point,
            rowspan,
            colspan,
        }),
        CellKind::Covered { owner } => {
            let resolved = get_cell(host, grid, owner).map(|cell| cell.node.cell_kind());
            match resolved {
                Some(CellKind::Owner { rowspan, colspan }) => Some(CellRegion {
                    origin: owner,
                    rowspan,
                    colspan,
                }),
                _ => {
                    warn!(%point, %owner, "covered cell span does not resolve to an owner");
                    None
                }
            }
        }
    }
}

/// Grow `rect` so it contains `region`, clamped to the grid's last row/col.
/// Returns whether any bound moved.
fn grow(rect: &mut GridSelection, region: &CellRegion, last: CellPoint) -> bool {
    let before = *rect;
    rect.start.row = rect.start.row.min(region.origin.row);
    rect.start.col = rect.start.col.min(region.origin.col);
    rect.end.row = rect.end.row.max(region.end_row().min(last.row));
    rect.end.col = rect.end.col.max(region.end_col().min(last.col));
    *rect != before
}

/// Smallest corner-ordered rectangle containing `selection` that does not
/// bisect any merged region.
///
/// Corners beyond the grid are clamped to its last row and column first.
/// Whenever a cell's owning region reaches outside the candidate, the
/// candidate grows and the scan restarts from its top-left, until a full
/// scan changes nothing.
pub fn edges<H: TreeHost>(
    host: &H,
    grid: &GridEntry<H::Node>,
    selection: GridSelection,
) -> GridSelection {
    let rows = row_count(host, grid);
    let cols = col_count(host, grid);
    let mut rect = selection.ordered();
    if rows == 0 || cols == 0 {
        return rect;
    }
    let last = CellPoint::new(rows - 1, cols - 1);
    rect.start.row = rect.start.row.min(last.row);
    rect.start.col = rect.start.col.min(last.col);
    rect.end.row = rect.end.row.min(last.row);
    rect.end.col = rect.end.col.min(last.col);

    'scan: loop {
        for row in rect.start.row..=rect.end.row {
            for col in rect.start.col..=rect.end.col {
                let point = CellPoint::new(row, col);
                let Some(region) = owner_region(host, grid, point) else {
                    continue;
                };
                if grow(&mut rect, &region, last) {
                    trace!(%point, start = %rect.start, end = %rect.end, "expanded edges");
                    continue 'scan;
                }
            }
        }
        break;
    }
    rect
}

/// Replace any corner lying on a covered cell with its owner's coordinate.
pub fn span<H: TreeHost>(
    host: &H,
    grid: &GridEntry<H::Node>,
    selection: GridSelection,
) -> GridSelection {
    let resolve = |point: CellPoint| {
        get_cell(host, grid, point)
            .and_then(|cell| match cell.node.cell_kind() {
                CellKind::Covered { owner } => Some(owner),
                CellKind::Owner { .. } => None,
            })
            .unwrap_or(point)
    };
    GridSelection::new(resolve(selection.start), resolve(selection.end))
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
    use crate::grid::grid_at;
    use crate::host::memory::{CellDescriptor, Document, RowDescriptor};
    use crate::path::Path;

    fn sel(start: (usize, usize), end: (usize, usize)) -> GridSelection {
        GridSelection::new(start.into(), end.into())
    }

    /// Row 0: [A(colspan 2), covered, C]; row 1: [D, E(rowspan 2), F];
    /// row 2: [G, covered, I].
    fn document() -> Document {
        let mut doc = Document::default();
        let grid = doc.create_grid(
            vec![
                RowDescriptor::new(vec![
                    CellDescriptor::text("A").with_spans(1, 2),
                    CellDescriptor::covered(CellPoint::new(0, 0)),
                    CellDescriptor::text("C"),
                ]),
                RowDescriptor::new(vec![
                    CellDescriptor::text("D"),
                    CellDescriptor::text("E").with_spans(2, 1),
                    CellDescriptor::text("F"),
                ]),
                RowDescriptor::new(vec![
                    CellDescriptor::text("G"),
                    CellDescriptor::covered(CellPoint::new(1, 1)),
                    CellDescriptor::text("I"),
                ]),
            ],
            None,
        );
        doc.push(grid);
        doc
    }

    #[test]
    fn test_edges_expands_to_owner() {
        let doc = document();
        let grid = grid_at(&doc, &Path::new(vec![0])).unwrap();
        assert_eq!(edges(&doc, &grid, sel((0, 1), (0, 2))), sel((0, 0), (0, 2)));
    }

    #[test]
    fn test_edges_expands_owner_region_down() {
        let doc = document();
        let grid = grid_at(&doc, &Path::new(vec![0])).unwrap();
        assert_eq!(edges(&doc, &grid, sel((1, 1), (1, 2))), sel((1, 1), (2, 2)));
    }

    #[test]
    fn test_edges_chains_expansions() {
        let doc = document();
        let grid = grid_at(&doc, &Path::new(vec![0])).unwrap();
        // (2,1) pulls in row 1 via E, then nothing else.
        assert_eq!(edges(&doc, &grid, sel((2, 1), (2, 1))), sel((1, 1), (2, 1)));
        // Including row 0 column 1 pulls in A's column 0.
        assert_eq!(edges(&doc, &grid, sel((0, 1), (1, 1))), sel((0, 0), (2, 1)));
    }

    #[test]
    fn test_edges_is_idempotent() {
        let doc = document();
        let grid = grid_at(&doc, &Path::new(vec![0])).unwrap();
        let once = edges(&doc, &grid, sel((2, 2), (0, 1)));
        assert_eq!(edges(&doc, &grid, once), once);
    }

    #[test]
    fn test_edges_clamps_out_of_range() {
        let doc = document();
        let grid = grid_at(&doc, &Path::new(vec![0])).unwrap();
        assert_eq!(edges(&doc, &grid, sel((0, 2), (9, 9))), sel((0, 2), (2, 2)));
    }

    #[test]
    fn test_span_resolves_covered_corners() {
        let doc = document();
        let grid = grid_at(&doc, &Path::new(vec![0])).unwrap();
        assert_eq!(span(&doc, &grid, sel((0, 1), (2, 1))), sel((0, 0), (1, 1)));
        assert_eq!(span(&doc, &grid, sel((0, 2), (1, 0))), sel((0, 2), (1, 0)));
    }
}
