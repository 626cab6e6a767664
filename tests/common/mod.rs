//! Common test utilities and assertion helpers.
//!
//! Every helper that reads a grid back out of a document first runs
//! [`validate`] on it, so each assertion also checks the structural
//! invariants.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use cellgrid::grid::{find_grid, get_cell, grid_at, validate, GridEntry};
use cellgrid::host::memory::{Document, Node};
use cellgrid::host::{GridNode, TreeHost};
use cellgrid::{CellKind, CellPoint, Path};

// Re-export fixtures for convenience
pub use super::fixtures::*;

// ============================================================================
// Grid Lookup
// ============================================================================

/// The first top-level grid of `doc`, if any.
pub fn try_grid(doc: &Document) -> Option<GridEntry<Node>> {
    (0..doc.children().len()).find_map(|index| grid_at(doc, &Path::new(vec![index])))
}

/// The first top-level grid of `doc`, validated.
pub fn grid(doc: &Document) -> GridEntry<Node> {
    let grid = try_grid(doc).expect("document has no grid");
    assert_valid(doc, &grid);
    grid
}

/// Fail with the invariant violation if `grid` is malformed.
pub fn assert_valid(doc: &Document, grid: &GridEntry<Node>) {
    if let Err(e) = validate(doc, grid) {
        panic!("invalid grid: {e}\n{:#?}", layout(doc));
    }
}

// ============================================================================
// Cell Accessors
// ============================================================================

fn cell_node(doc: &Document, row: usize, col: usize) -> Node {
    let grid = grid(doc);
    get_cell(doc, &grid, CellPoint::new(row, col))
        .unwrap_or_else(|| panic!("no cell at ({row}, {col})"))
        .node
        .clone()
}

pub fn cell_text(doc: &Document, row: usize, col: usize) -> String {
    cell_node(doc, row, col).text_content()
}

pub fn cell_kind(doc: &Document, row: usize, col: usize) -> CellKind {
    cell_node(doc, row, col).cell_kind()
}

/// Number of content blocks inside the cell.
pub fn block_count(doc: &Document, row: usize, col: usize) -> usize {
    cell_node(doc, row, col).children().len()
}

pub fn widths(doc: &Document) -> Vec<f32> {
    grid(doc).node.cols_width().unwrap_or_default().to_vec()
}

/// Compact picture of the grid: owners as `text` or `text[RxC]`, covered
/// cells as `@row,col`.
pub fn layout(doc: &Document) -> Vec<Vec<String>> {
    let Some(grid) = try_grid(doc) else {
        return Vec::new();
    };
    grid.node
        .children()
        .iter()
        .map(|row| {
            row.children()
                .iter()
                .map(|cell| match cell.cell_kind() {
                    CellKind::Covered { owner } => format!("@{},{}", owner.row, owner.col),
                    CellKind::Owner {
                        rowspan: 1,
                        colspan: 1,
                    } => cell.text_content(),
                    CellKind::Owner { rowspan, colspan } => {
                        format!("{}[{rowspan}x{colspan}]", cell.text_content())
                    }
                })
                .collect()
        })
        .collect()
}

// ============================================================================
// Assertions
// ============================================================================

/// Assert the grid's layout, row by row.
pub fn assert_layout(doc: &Document, expected: &[&[&str]]) {
    grid(doc);
    let actual = layout(doc);
    let expected: Vec<Vec<String>> = expected
        .iter()
        .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
        .collect();
    assert_eq!(actual, expected, "grid layout mismatch");
}

pub fn assert_owner(doc: &Document, row: usize, col: usize, rowspan: usize, colspan: usize) {
    assert_eq!(
        cell_kind(doc, row, col),
        CellKind::Owner { rowspan, colspan },
        "cell ({row}, {col})"
    );
}

pub fn assert_covered(doc: &Document, row: usize, col: usize, owner: (usize, usize)) {
    assert_eq!(
        cell_kind(doc, row, col),
        CellKind::Covered {
            owner: owner.into()
        },
        "cell ({row}, {col})"
    );
}

/// Assert the host caret or selection endpoint sits inside cell `(row, col)`.
pub fn assert_selection_in(doc: &Document, anchor: (usize, usize), focus: (usize, usize)) {
    let grid = grid(doc);
    let range = doc.selection().expect("no selection");
    let cell_of = |path: &Path| {
        let relative = path.relative_to(&grid.path).expect("selection outside grid");
        (relative[0], relative[1])
    };
    assert_eq!(cell_of(&range.anchor.path), anchor, "selection anchor");
    assert_eq!(cell_of(&range.focus.path), focus, "selection focus");
}

/// `find_grid` from the document selection lands on the tested grid.
pub fn assert_selection_finds_grid(doc: &Document) {
    let expected = grid(doc).path;
    let found = find_grid(doc, None).expect("selection is not inside a grid");
    assert_eq!(found.path, expected);
}
