//! Tests for moving column and row blocks.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;
mod fixtures;

use cellgrid::grid::{move_column, move_row, range_of_move_column, range_of_move_row, MoveRange};
use cellgrid::{CellPoint, GridSelection};
use common::{assert_layout, assert_selection_in, grid, widths};
use fixtures::{covered, merged, plain, plain_grid, GridBuilder};

fn abcd() -> cellgrid::host::memory::Document {
    GridBuilder::new()
        .widths(vec![10.0, 20.0, 30.0, 40.0])
        .row(vec![plain("a"), plain("b"), plain("c"), plain("d")])
        .build()
}

// ============================================================================
// MOVE COLUMN
// ============================================================================

#[test]
fn test_move_column_backward() {
    let mut doc = abcd();
    let g = grid(&doc);

    let selection = move_column(&mut doc, &g, 3, 1).unwrap();

    assert_layout(&doc, &[&["a", "d", "b", "c"]]);
    assert_eq!(widths(&doc), vec![10.0, 40.0, 20.0, 30.0]);
    assert_eq!(
        selection,
        Some(GridSelection::new(CellPoint::new(0, 1), CellPoint::new(0, 1)))
    );
    assert_selection_in(&doc, (0, 1), (0, 1));
}

#[test]
fn test_move_column_forward() {
    let mut doc = abcd();
    let g = grid(&doc);

    move_column(&mut doc, &g, 0, 2).unwrap();

    assert_layout(&doc, &[&["b", "c", "a", "d"]]);
    assert_eq!(widths(&doc), vec![20.0, 30.0, 10.0, 40.0]);
    assert_selection_in(&doc, (0, 2), (0, 2));
}

/// A merged block moves as a unit and its covered cells follow the owner.
#[test]
fn test_move_merged_column_block() {
    let mut doc = GridBuilder::new()
        .row(vec![merged("a", 1, 2), covered(0, 0), plain("c"), plain("d")])
        .row(vec![plain("e"), plain("f"), plain("g"), plain("h")])
        .build();
    let g = grid(&doc);

    let selection = move_column(&mut doc, &g, 0, 3).unwrap();

    assert_layout(
        &doc,
        &[&["c", "d", "a[1x2]", "@0,2"], &["g", "h", "e", "f"]],
    );
    assert_eq!(
        selection,
        Some(GridSelection::new(CellPoint::new(0, 2), CellPoint::new(1, 3)))
    );
    assert_selection_in(&doc, (0, 2), (1, 3));
}

/// Landing inside a merge widens the destination to the merge's far edge.
#[test]
fn test_move_column_into_merge_lands_beside_it() {
    let mut doc = GridBuilder::new()
        .row(vec![plain("a"), merged("b", 1, 2), covered(0, 1), plain("d")])
        .build();
    let g = grid(&doc);

    assert_eq!(
        range_of_move_column(&doc, &g, 3, 2),
        Some(MoveRange {
            start: 3,
            end: 3,
            to: 1,
            backward: true,
        })
    );
    move_column(&mut doc, &g, 3, 2).unwrap();

    assert_layout(&doc, &[&["a", "d", "b[1x2]", "@0,2"]]);
}

#[test]
fn test_move_column_within_block_is_noop() {
    let mut doc = GridBuilder::new()
        .row(vec![plain("a"), merged("b", 1, 2), covered(0, 1)])
        .build();
    let g = grid(&doc);

    assert_eq!(move_column(&mut doc, &g, 1, 2).unwrap(), None);
    assert_eq!(move_column(&mut doc, &g, 0, 0).unwrap(), None);
    assert_eq!(move_column(&mut doc, &g, 0, 5).unwrap(), None);
    assert_layout(&doc, &[&["a", "b[1x2]", "@0,1"]]);
}

// ============================================================================
// MOVE ROW
// ============================================================================

#[test]
fn test_move_row_forward() {
    let mut doc = plain_grid(3, 2);
    let g = grid(&doc);

    let selection = move_row(&mut doc, &g, 0, 2).unwrap();

    assert_layout(
        &doc,
        &[&["r1c0", "r1c1"], &["r2c0", "r2c1"], &["r0c0", "r0c1"]],
    );
    assert_eq!(
        selection,
        Some(GridSelection::new(CellPoint::new(2, 0), CellPoint::new(2, 1)))
    );
}

#[test]
fn test_move_row_over_merged_block() {
    let mut doc = GridBuilder::new()
        .row(vec![merged("a", 2, 1), plain("b")])
        .row(vec![covered(0, 0), plain("c")])
        .row(vec![plain("d"), plain("e")])
        .build();
    let g = grid(&doc);

    // Row 1 belongs to the merge, so the destination is its top edge.
    assert_eq!(range_of_move_row(&doc, &g, 2, 1).map(|r| r.to), Some(0));
    move_row(&mut doc, &g, 2, 1).unwrap();

    assert_layout(&doc, &[&["d", "e"], &["a[2x1]", "b"], &["@1,0", "c"]]);
    assert_selection_in(&doc, (0, 0), (0, 1));
}

#[test]
fn test_move_merged_row_block_backward() {
    let mut doc = GridBuilder::new()
        .row(vec![plain("x"), plain("y")])
        .row(vec![merged("a", 2, 1), plain("b")])
        .row(vec![covered(1, 0), plain("c")])
        .build();
    let g = grid(&doc);

    let selection = move_row(&mut doc, &g, 2, 0).unwrap();

    assert_layout(&doc, &[&["a[2x1]", "b"], &["@0,0", "c"], &["x", "y"]]);
    assert_eq!(
        selection,
        Some(GridSelection::new(CellPoint::new(0, 0), CellPoint::new(1, 1)))
    );
}
