//! Read-only grid queries.

use std::cmp::Ordering;

use super::{edges, CellEntry, GridEntry};
use crate::host::{GridNode, TreeHost};
use crate::path::Path;
use crate::types::{CellPoint, Edge, GridSelected, GridSelection};

/// The grid whose node sits exactly at `path`.
pub fn grid_at<H: TreeHost>(host: &H, path: &Path) -> Option<GridEntry<H::Node>> {
    let node = host.node(path)?;
    host.classify().is_grid(node).then(|| GridEntry {
        node: node.clone(),
        path: path.clone(),
    })
}

/// Nearest grid at or above `at`.
///
/// Without `at`, starts from the deepest node containing both ends of the
/// host selection.
pub fn find_grid<H: TreeHost>(host: &H, at: Option<&Path>) -> Option<GridEntry<H::Node>> {
    let mut path = match at {
        Some(path) => path.clone(),
        None => {
            let range = host.selection()?;
            range.anchor.path.common(&range.focus.path)
        }
    };
    loop {
        if let Some(entry) = grid_at(host, &path) {
            return Some(entry);
        }
        path = path.parent()?;
    }
}

/// The cell at `point`, or `None` when out of range or not classified as a cell.
pub fn get_cell<'g, H: TreeHost>(
    host: &H,
    grid: &'g GridEntry<H::Node>,
    point: CellPoint,
) -> Option<CellEntry<'g, H::Node>> {
    let classify = host.classify();
    let row = grid.node.children().get(point.row)?;
    if !classify.is_row(row) {
        return None;
    }
    let cell = row.children().get(point.col)?;
    if !classify.is_cell(cell) {
        return None;
    }
    Some(CellEntry {
        node: cell,
        path: grid.path.join(&[point.row, point.col]),
        point,
    })
}

pub fn row_count<H: TreeHost>(host: &H, grid: &GridEntry<H::Node>) -> usize {
    let classify = host.classify();
    grid.node
        .children()
        .iter()
        .filter(|row| classify.is_row(row))
        .count()
}

/// Number of columns: the width array's length, else the first row's cell count.
pub fn col_count<H: TreeHost>(host: &H, grid: &GridEntry<H::Node>) -> usize {
    if let Some(widths) = grid.node.cols_width() {
        return widths.len();
    }
    let classify = host.classify();
    grid.node
        .children()
        .first()
        .filter(|row| classify.is_row(row))
        .map_or(0, |row| row.children().len())
}

/// Grid coordinate of the cell enclosing `path`.
fn cell_point_at<H: TreeHost>(
    host: &H,
    grid: &GridEntry<H::Node>,
    path: &Path,
) -> Option<CellPoint> {
    match path.relative_to(&grid.path)? {
        [row, col, ..] => get_cell(host, grid, CellPoint::new(*row, *col)).map(|cell| cell.point),
        _ => None,
    }
}

/// Where `path` lies relative to `grid`: inside it, before it or after it
/// in document order.
fn side_of<N>(grid: &GridEntry<N>, path: &Path) -> Ordering {
    if grid.path.contains(path) {
        Ordering::Equal
    } else {
        path.cmp(&grid.path)
    }
}

/// Cell coordinate of one selection end, clamped into `grid`.
fn endpoint<H: TreeHost>(
    host: &H,
    grid: &GridEntry<H::Node>,
    path: &Path,
    side: Ordering,
) -> Option<CellPoint> {
    let clamped = match side {
        Ordering::Equal => return cell_point_at(host, grid, path),
        Ordering::Less => host.edge_point(&grid.path, Edge::Start)?,
        Ordering::Greater => host.edge_point(&grid.path, Edge::End)?,
    };
    cell_point_at(host, grid, &clamped.path)
}

/// The host selection intersected with `grid`, as a cell selection.
///
/// An end lying before the grid clamps to its first cell, one lying after it
/// to its last cell. `None` when the selection does not overlap the grid or
/// an end inside the grid is not within a cell.
pub fn get_selection<H: TreeHost>(host: &H, grid: &GridEntry<H::Node>) -> Option<GridSelection> {
    let range = host.selection()?;
    let anchor = side_of(grid, &range.anchor.path);
    let focus = side_of(grid, &range.focus.path);
    if anchor == focus && anchor != Ordering::Equal {
        return None;
    }
    let start = endpoint(host, grid, &range.anchor.path, anchor)?;
    let end = endpoint(host, grid, &range.focus.path, focus)?;
    Some(GridSelection::new(start, end))
}

/// Summarize what `selection` covers once normalized against merges.
pub fn get_selected<H: TreeHost>(
    host: &H,
    grid: &GridEntry<H::Node>,
    selection: GridSelection,
) -> Option<GridSelected> {
    let rows = row_count(host, grid);
    let cols = col_count(host, grid);
    if rows == 0 || cols == 0 {
        return None;
    }
    let rect = edges(host, grid, selection);
    let (start, end) = (rect.start, rect.end);

    let row_full = start.col == 0 && end.col + 1 == cols;
    let col_full = start.row == 0 && end.row + 1 == rows;
    let cells: Vec<CellPoint> = (start.row..=end.row)
        .flat_map(|row| (start.col..=end.col).map(move |col| CellPoint::new(row, col)))
        .collect();

    Some(GridSelected {
        rows: (start.row..=end.row).collect(),
        cols: (start.col..=end.col).collect(),
        row_full,
        col_full,
        all_full: row_full && col_full,
        count: cells.len(),
        cells,
    })
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
    use crate::host::memory::{CellDescriptor, Document, RowDescriptor};
    use crate::types::{Point, Range};

    fn document() -> Document {
        let mut doc = Document::default();
        doc.push(doc.paragraph("before"));
        let grid = doc.create_grid(
            vec![
                RowDescriptor::new(vec![
                    CellDescriptor::text("a"),
                    CellDescriptor::text("b"),
                    CellDescriptor::text("c"),
                ]),
                RowDescriptor::new(vec![
                    CellDescriptor::text("d"),
                    CellDescriptor::text("e"),
                    CellDescriptor::text("f"),
                ]),
            ],
            None,
        );
        doc.push(grid);
        doc
    }

    #[test]
    fn test_find_grid_ascends_from_leaf() {
        let doc = document();
        let grid = find_grid(&doc, Some(&Path::new(vec![1, 0, 2, 0, 0]))).unwrap();
        assert_eq!(grid.path, Path::new(vec![1]));
        assert!(find_grid(&doc, Some(&Path::new(vec![0, 0]))).is_none());
    }

    #[test]
    fn test_find_grid_from_selection() {
        let mut doc = document();
        assert!(find_grid(&doc, None).is_none());
        doc.set_selection(Some(Range::new(
            Point::new(Path::new(vec![1, 0, 0, 0, 0]), 0),
            Point::new(Path::new(vec![1, 1, 2, 0, 0]), 1),
        )));
        assert_eq!(find_grid(&doc, None).unwrap().path, Path::new(vec![1]));
    }

    #[test]
    fn test_counts_and_cells() {
        let doc = document();
        let grid = grid_at(&doc, &Path::new(vec![1])).unwrap();
        assert_eq!(row_count(&doc, &grid), 2);
        assert_eq!(col_count(&doc, &grid), 3);
        let cell = get_cell(&doc, &grid, CellPoint::new(1, 2)).unwrap();
        assert_eq!(cell.path, Path::new(vec![1, 1, 2]));
        assert_eq!(cell.node.text_content(), "f");
        assert!(get_cell(&doc, &grid, CellPoint::new(2, 0)).is_none());
        assert!(get_cell(&doc, &grid, CellPoint::new(0, 3)).is_none());
    }

    #[test]
    fn test_get_selection_clamps_ends_outside_grid() {
        let mut doc = document();
        let grid = grid_at(&doc, &Path::new(vec![1])).unwrap();
        doc.set_selection(Some(Range::new(
            Point::new(Path::new(vec![0, 0]), 0),
            Point::new(Path::new(vec![1, 0, 1, 0, 0]), 0),
        )));
        assert_eq!(
            get_selection(&doc, &grid),
            Some(GridSelection::new(CellPoint::new(0, 0), CellPoint::new(0, 1)))
        );

        doc.set_selection(Some(Range::new(
            Point::new(Path::new(vec![1, 1, 2, 0, 0]), 0),
            Point::new(Path::new(vec![1, 0, 1, 0, 0]), 0),
        )));
        assert_eq!(
            get_selection(&doc, &grid),
            Some(GridSelection::new(CellPoint::new(1, 2), CellPoint::new(0, 1)))
        );
    }

    #[test]
    fn test_get_selection_without_overlap() {
        let mut doc = document();
        let grid = grid_at(&doc, &Path::new(vec![1])).unwrap();
        doc.set_selection(Some(Range::new(
            Point::new(Path::new(vec![0, 0]), 0),
            Point::new(Path::new(vec![0, 0]), 3),
        )));
        assert_eq!(get_selection(&doc, &grid), None);

        // The grid node itself is not inside any cell.
        doc.set_selection(Some(Range::collapsed(Point::new(Path::new(vec![1]), 0))));
        assert_eq!(get_selection(&doc, &grid), None);
    }

    #[test]
    fn test_get_selected_flags() {
        let doc = document();
        let grid = grid_at(&doc, &Path::new(vec![1])).unwrap();

        let row = get_selected(
            &doc,
            &grid,
            GridSelection::new(CellPoint::new(0, 2), CellPoint::new(0, 0)),
        )
        .unwrap();
        assert!(row.row_full);
        assert!(!row.col_full);
        assert_eq!(row.rows, vec![0]);
        assert_eq!(row.count, 3);

        let all = get_selected(
            &doc,
            &grid,
            GridSelection::new(CellPoint::new(0, 0), CellPoint::new(1, 2)),
        )
        .unwrap();
        assert!(all.all_full);
        assert_eq!(all.cells.len(), 6);
        assert_eq!(all.cells[4], CellPoint::new(1, 1));
    }
}
