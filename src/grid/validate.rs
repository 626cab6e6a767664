//! Structural invariant checks.

use super::query::{col_count, row_count};
use super::{cells, get_cell, CellsOptions, GridEntry};
use crate::error::{GridError, Result};
use crate::host::{GridNode, TreeHost};
use crate::types::{CellKind, CellPoint, CellRegion};

fn invariant(message: String) -> GridError {
    GridError::Invariant(message)
}

/// Check that `grid` is well formed.
///
/// Verifies the grid is non-empty, every row has one cell per width entry,
/// owner regions stay inside the grid without overlapping, and every covered
/// cell points at the owner whose region contains it. Reports the first
/// violation found.
pub fn validate<H: TreeHost>(host: &H, grid: &GridEntry<H::Node>) -> Result<()> {
    let rows = row_count(host, grid);
    let cols = col_count(host, grid);
    if rows == 0 || cols == 0 {
        return Err(invariant(format!("grid has {rows} rows and {cols} columns")));
    }
    if grid.node.children().len() != rows {
        return Err(invariant("grid has children that are not rows".to_string()));
    }

    let widths = grid.node.cols_width().map_or(0, <[f32]>::len);
    for (row, node) in grid.node.children().iter().enumerate() {
        let len = node.children().len();
        if len != cols || widths != cols {
            return Err(invariant(format!(
                "row {row} has {len} cells, grid has {widths} widths"
            )));
        }
        for col in 0..cols {
            if get_cell(host, grid, CellPoint::new(row, col)).is_none() {
                return Err(invariant(format!("({row}, {col}) is not a cell")));
            }
        }
    }

    let mut regions: Vec<CellRegion> = Vec::new();
    for (cell, row, col) in cells(host, grid, CellsOptions::default()) {
        let CellKind::Owner { rowspan, colspan } = cell.cell_kind() else {
            continue;
        };
        let region = CellRegion {
            origin: CellPoint::new(row, col),
            rowspan,
            colspan,
        };
        let origin = region.origin;
        if region.end_row() >= rows || region.end_col() >= cols {
            return Err(invariant(format!(
                "owner {origin} spans {rowspan}x{colspan} beyond the grid"
            )));
        }
        if let Some(other) = regions.iter().find(|other| other.overlaps(&region)) {
            return Err(invariant(format!(
                "owners {} and {origin} overlap",
                other.origin
            )));
        }
        regions.push(region);
    }

    for (cell, row, col) in cells(host, grid, CellsOptions::default()) {
        let CellKind::Covered { owner } = cell.cell_kind() else {
            continue;
        };
        let point = CellPoint::new(row, col);
        let covers = regions
            .iter()
            .any(|region| region.origin == owner && region.contains(point));
        if !covers {
            return Err(invariant(format!(
                "covered cell {point} points at {owner}, which does not cover it"
            )));
        }
    }

    Ok(())
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

    fn validate_rows(rows: Vec<RowDescriptor>) -> Result<()> {
        let mut doc = Document::default();
        let grid = doc.create_grid(rows, None);
        doc.push(grid);
        let grid = grid_at(&doc, &Path::new(vec![0])).unwrap();
        validate(&doc, &grid)
    }

    #[test]
    fn test_valid_merge() {
        validate_rows(vec![
            RowDescriptor::new(vec![
                CellDescriptor::text("a").with_spans(2, 1),
                CellDescriptor::text("b"),
            ]),
            RowDescriptor::new(vec![
                CellDescriptor::covered(CellPoint::new(0, 0)),
                CellDescriptor::text("c"),
            ]),
        ])
        .unwrap();
    }

    #[test]
    fn test_ragged_rows() {
        let err = validate_rows(vec![
            RowDescriptor::new(vec![CellDescriptor::text("a"), CellDescriptor::text("b")]),
            RowDescriptor::new(vec![CellDescriptor::text("c")]),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("row 1 has 1 cells"));
    }

    #[test]
    fn test_dangling_span() {
        let err = validate_rows(vec![RowDescriptor::new(vec![
            CellDescriptor::text("a"),
            CellDescriptor::covered(CellPoint::new(0, 0)),
        ])])
        .unwrap_err();
        assert!(err.to_string().contains("does not cover it"));
    }

    #[test]
    fn test_overlapping_owners() {
        let err = validate_rows(vec![RowDescriptor::new(vec![
            CellDescriptor::text("a").with_spans(1, 2),
            CellDescriptor::text("b"),
        ])])
        .unwrap_err();
        assert!(err.to_string().contains("overlap"));
    }

    /// A 1x2 owner under a 2x1 owner shares one position with it.
    #[test]
    fn test_overlap_inside_merged_region() {
        let err = validate_rows(vec![
            RowDescriptor::new(vec![
                CellDescriptor::text("a"),
                CellDescriptor::text("b").with_spans(2, 1),
                CellDescriptor::text("c"),
            ]),
            RowDescriptor::new(vec![
                CellDescriptor::text("d").with_spans(1, 2),
                CellDescriptor::covered(CellPoint::new(1, 0)),
                CellDescriptor::text("e"),
            ]),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("owners (0, 1) and (1, 0) overlap"));
    }

    #[test]
    fn test_covered_cell_outside_owner_region() {
        let err = validate_rows(vec![
            RowDescriptor::new(vec![
                CellDescriptor::text("a").with_spans(1, 2),
                CellDescriptor::covered(CellPoint::new(0, 0)),
            ]),
            RowDescriptor::new(vec![
                CellDescriptor::covered(CellPoint::new(0, 0)),
                CellDescriptor::text("b"),
            ]),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("covered cell (1, 0) points at (0, 0)"));
    }

    #[test]
    fn test_region_beyond_grid() {
        let err = validate_rows(vec![RowDescriptor::new(vec![
            CellDescriptor::text("a"),
            CellDescriptor::text("b").with_spans(1, 2),
        ])])
        .unwrap_err();
        assert!(err.to_string().contains("beyond the grid"));
    }
}
