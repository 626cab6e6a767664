//! Mapping grid coordinates to host carets and ranges.

use super::{edges, get_cell, span, GridEntry};
use crate::host::TreeHost;
use crate::types::{CellPoint, Edge, GridSelection, Point, Range};

/// Put the host caret at `edge` of the cell owning `point`.
///
/// Returns the caret, or `None` (selection untouched) if the cell does not
/// resolve to a caret position.
pub fn focus<H: TreeHost>(
    host: &mut H,
    grid: &GridEntry<H::Node>,
    point: CellPoint,
    edge: Edge,
) -> Option<Point> {
    let owner = span(host, grid, GridSelection::cell(point)).start;
    let cell = get_cell(host, grid, owner)?;
    let caret = host.edge_point(&cell.path, edge)?;
    host.set_selection(Some(Range::collapsed(caret.clone())));
    Some(caret)
}

/// Select `selection` in the host, from the start of its normalized top-left
/// cell to the end of its bottom-right owner cell.
pub fn select<H: TreeHost>(
    host: &mut H,
    grid: &GridEntry<H::Node>,
    selection: GridSelection,
) -> Option<Range> {
    let rect = edges(host, grid, selection);
    let corners = span(host, grid, rect);
    let start = get_cell(host, grid, corners.start)?;
    let end = get_cell(host, grid, corners.end)?;
    let anchor = host.edge_point(&start.path, Edge::Start)?;
    let focus = host.edge_point(&end.path, Edge::End)?;
    let range = Range::new(anchor, focus);
    host.set_selection(Some(range.clone()));
    Some(range)
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

    fn document() -> Document {
        let mut doc = Document::default();
        let grid = doc.create_grid(
            vec![
                RowDescriptor::new(vec![
                    CellDescriptor::text("owner").with_spans(2, 2),
                    CellDescriptor::covered(CellPoint::new(0, 0)),
                    CellDescriptor::text("x"),
                ]),
                RowDescriptor::new(vec![
                    CellDescriptor::covered(CellPoint::new(0, 0)),
                    CellDescriptor::covered(CellPoint::new(0, 0)),
                    CellDescriptor::text("tail"),
                ]),
            ],
            None,
        );
        doc.push(grid);
        doc
    }

    #[test]
    fn test_focus_on_covered_lands_in_owner() {
        let mut doc = document();
        let grid = grid_at(&doc, &Path::new(vec![0])).unwrap();
        let caret = focus(&mut doc, &grid, CellPoint::new(1, 1), Edge::End).unwrap();
        assert_eq!(caret, Point::new(Path::new(vec![0, 0, 0, 0, 0]), 5));
        assert_eq!(doc.selection(), Some(&Range::collapsed(caret)));
    }

    #[test]
    fn test_focus_out_of_range_leaves_selection() {
        let mut doc = document();
        let grid = grid_at(&doc, &Path::new(vec![0])).unwrap();
        assert!(focus(&mut doc, &grid, CellPoint::new(5, 0), Edge::Start).is_none());
        assert!(doc.selection().is_none());
    }

    #[test]
    fn test_select_normalizes_rectangle() {
        let mut doc = document();
        let grid = grid_at(&doc, &Path::new(vec![0])).unwrap();
        let range = select(
            &mut doc,
            &grid,
            GridSelection::new(CellPoint::new(1, 1), CellPoint::new(1, 2)),
        )
        .unwrap();
        assert_eq!(range.anchor, Point::new(Path::new(vec![0, 0, 0, 0, 0]), 0));
        assert_eq!(range.focus, Point::new(Path::new(vec![0, 1, 2, 0, 0]), 4));
    }
}
