//! Operation sequences that must keep every grid invariant intact.
//!
//! Each case starts from a grid with overlapping merge shapes, applies a
//! sequence of edits and validates the grid after every step.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;
mod fixtures;

use cellgrid::grid::{
    col_count, insert_column, insert_row, merge_cells, move_column, move_row, remove_column,
    remove_row, row_count, split_cells,
};
use cellgrid::host::memory::Document;
use cellgrid::GridSelection;
use common::{layout, try_grid, widths};
use fixtures::{covered, merged, plain, GridBuilder};
use test_case::test_case;

#[derive(Debug, Clone, Copy)]
enum Op {
    InsertCol(usize),
    RemoveCol(usize),
    InsertRow(usize),
    RemoveRow(usize),
    MoveCol(usize, usize),
    MoveRow(usize, usize),
    Merge((usize, usize), (usize, usize)),
    Split((usize, usize), (usize, usize)),
}

use Op::{InsertCol, InsertRow, Merge, MoveCol, MoveRow, RemoveCol, RemoveRow, Split};

/// 4x4 grid with a 2x2 merge, a vertical merge and a horizontal merge.
fn sample() -> Document {
    GridBuilder::new()
        .row(vec![merged("a", 2, 2), covered(0, 0), plain("b"), merged("c", 3, 1)])
        .row(vec![covered(0, 0), covered(0, 0), plain("d"), covered(0, 3)])
        .row(vec![plain("e"), merged("f", 1, 2), covered(2, 1), covered(0, 3)])
        .row(vec![plain("g"), plain("h"), plain("i"), plain("j")])
        .build()
}

fn apply(doc: &mut Document, op: Op) {
    let Some(g) = try_grid(doc) else {
        return;
    };
    let (row_template, cell_template) = (doc.row_template(), doc.cell_template());
    let rect = |start: (usize, usize), end: (usize, usize)| {
        Some(GridSelection::new(start.into(), end.into()))
    };
    match op {
        InsertCol(index) => {
            insert_column(doc, &g, index, &cell_template, None).unwrap();
        }
        RemoveCol(index) => {
            remove_column(doc, &g, index).unwrap();
        }
        InsertRow(index) => {
            insert_row(doc, &g, index, &row_template, &cell_template, None).unwrap();
        }
        RemoveRow(index) => {
            remove_row(doc, &g, index).unwrap();
        }
        MoveCol(from, to) => {
            move_column(doc, &g, from, to).unwrap();
        }
        MoveRow(from, to) => {
            move_row(doc, &g, from, to).unwrap();
        }
        Merge(start, end) => {
            merge_cells(doc, &g, rect(start, end)).unwrap();
        }
        Split(start, end) => {
            split_cells(doc, &g, rect(start, end)).unwrap();
        }
    }
}

fn run(ops: &[Op]) -> Document {
    let mut doc = sample();
    common::grid(&doc);
    for (step, op) in ops.iter().enumerate() {
        apply(&mut doc, *op);
        if let Some(g) = try_grid(&doc) {
            if let Err(e) = cellgrid::grid::validate(&doc, &g) {
                panic!("step {step} ({op:?}) broke the grid: {e}\n{:#?}", layout(&doc));
            }
            assert_eq!(widths(&doc).len(), col_count(&doc, &g));
        }
    }
    doc
}

#[test_case(&[InsertCol(1), InsertCol(3), InsertCol(0)] ; "insert columns through merges")]
#[test_case(&[InsertRow(1), InsertRow(2), InsertRow(5)] ; "insert rows through merges")]
#[test_case(&[RemoveCol(1), RemoveCol(2), RemoveCol(0)] ; "remove columns through merges")]
#[test_case(&[RemoveRow(1), RemoveRow(0), RemoveRow(1)] ; "remove rows through merges")]
#[test_case(&[MoveCol(0, 3), MoveCol(3, 0), MoveCol(2, 1)] ; "move merged columns")]
#[test_case(&[MoveRow(0, 3), MoveRow(3, 0), MoveRow(1, 2)] ; "move merged rows")]
#[test_case(&[Merge((1, 1), (2, 2)), Split((0, 0), (0, 0))] ; "merge overlapping then split")]
#[test_case(&[Merge((0, 2), (1, 2)), InsertCol(3), RemoveRow(0), MoveCol(0, 2)] ; "mixed edits")]
#[test_case(&[Split((0, 0), (3, 3)), Merge((3, 0), (3, 3)), RemoveCol(0), InsertRow(3)] ; "split all then merge bottom row")]
fn test_sequence_keeps_invariants(ops: &[Op]) {
    run(ops);
}

#[test]
fn test_removing_everything_deletes_grid() {
    let doc = run(&[RemoveCol(0), RemoveCol(0), RemoveCol(0), RemoveCol(0)]);
    assert!(try_grid(&doc).is_none());
}

#[test]
fn test_insert_then_remove_restores_shape() {
    let doc = run(&[InsertCol(1), RemoveCol(1), InsertRow(1), RemoveRow(1)]);
    let g = common::grid(&doc);
    assert_eq!((row_count(&doc, &g), col_count(&doc, &g)), (4, 4));
    assert_eq!(layout(&doc), layout(&sample()));
}
