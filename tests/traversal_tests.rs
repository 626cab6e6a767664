//! Tests for cell traversal, edge normalization and caret mapping.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;
mod fixtures;

use cellgrid::grid::{cells, edges, focus, select, span, CellsOptions};
use cellgrid::host::{GridNode, TreeHost};
use cellgrid::{CellPoint, Edge, GridSelection};
use common::{assert_selection_in, grid};
use fixtures::{covered, merged, plain, plain_grid, GridBuilder};

fn sel(start: (usize, usize), end: (usize, usize)) -> GridSelection {
    GridSelection::new(start.into(), end.into())
}

// ============================================================================
// CELLS
// ============================================================================

#[test]
fn test_reverse_traversal_mirrors_forward() {
    let doc = plain_grid(2, 3);
    let g = grid(&doc);

    let forward: Vec<(String, usize, usize)> = cells(&doc, &g, CellsOptions::default())
        .map(|(cell, row, col)| (cell.text_content(), row, col))
        .collect();
    let mut reverse: Vec<(String, usize, usize)> =
        cells(&doc, &g, CellsOptions::default().reversed())
            .map(|(cell, row, col)| (cell.text_content(), row, col))
            .collect();

    assert_eq!(forward.len(), 6);
    assert_eq!(forward[0], ("r0c0".to_string(), 0, 0));
    assert_eq!(forward[5], ("r1c2".to_string(), 1, 2));
    reverse.reverse();
    assert_eq!(forward, reverse);
}

#[test]
fn test_traversal_of_sub_rectangle() {
    let doc = plain_grid(3, 3);
    let g = grid(&doc);

    let visited: Vec<(usize, usize)> = cells(&doc, &g, CellsOptions::within(sel((2, 2), (1, 1))))
        .map(|(_, row, col)| (row, col))
        .collect();

    assert_eq!(visited, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
}

#[test]
fn test_traversal_is_restartable() {
    let doc = plain_grid(2, 2);
    let g = grid(&doc);
    let iter = cells(&doc, &g, CellsOptions::default());

    assert_eq!(iter.clone().count(), 4);
    assert_eq!(iter.count(), 4);
    assert_eq!(cells(&doc, &g, CellsOptions::default()).count(), 4);
}

#[test]
fn test_traversal_stops_past_last_row() {
    let doc = plain_grid(2, 2);
    let g = grid(&doc);
    let options = CellsOptions {
        start: Some(CellPoint::new(1, 0)),
        end: Some(CellPoint::new(5, 1)),
        reverse: false,
    };

    assert_eq!(cells(&doc, &g, options).count(), 2);
}

// ============================================================================
// EDGES AND SPAN
// ============================================================================

#[test]
fn test_edges_expands_to_owner() {
    let doc = GridBuilder::new()
        .row(vec![merged("a", 1, 2), covered(0, 0), plain("b")])
        .build();
    let g = grid(&doc);

    assert_eq!(edges(&doc, &g, sel((0, 1), (0, 2))), sel((0, 0), (0, 2)));
}

/// Growth triggered by one merge can pull in another.
#[test]
fn test_edges_chains_through_merges() {
    let doc = GridBuilder::new()
        .row(vec![merged("a", 2, 1), plain("b"), plain("c")])
        .row(vec![covered(0, 0), merged("d", 2, 2), covered(1, 1)])
        .row(vec![plain("e"), covered(1, 1), covered(1, 1)])
        .build();
    let g = grid(&doc);

    assert_eq!(edges(&doc, &g, sel((0, 0), (0, 0))), sel((0, 0), (1, 0)));
    assert_eq!(edges(&doc, &g, sel((0, 0), (1, 1))), sel((0, 0), (2, 2)));
    // Normalizing an already normalized rectangle changes nothing.
    assert_eq!(edges(&doc, &g, sel((0, 0), (2, 2))), sel((0, 0), (2, 2)));
}

#[test]
fn test_edges_clamps_to_grid() {
    let doc = plain_grid(2, 2);
    let g = grid(&doc);

    assert_eq!(edges(&doc, &g, sel((0, 0), (9, 9))), sel((0, 0), (1, 1)));
}

#[test]
fn test_span_resolves_covered_corners() {
    let doc = GridBuilder::new()
        .row(vec![merged("a", 2, 2), covered(0, 0), plain("b")])
        .row(vec![covered(0, 0), covered(0, 0), plain("c")])
        .build();
    let g = grid(&doc);

    assert_eq!(span(&doc, &g, sel((1, 1), (1, 2))), sel((0, 0), (1, 2)));
}

// ============================================================================
// FOCUS AND SELECT
// ============================================================================

#[test]
fn test_focus_end_edge_counts_characters() {
    let mut doc = GridBuilder::new().row(vec![plain("héllo"), plain("b")]).build();
    let g = grid(&doc);

    let caret = focus(&mut doc, &g, CellPoint::new(0, 0), Edge::End).unwrap();

    assert_eq!(caret.offset, 5);
    assert!(doc.selection().unwrap().is_collapsed());
}

#[test]
fn test_focus_covered_cell_targets_owner() {
    let mut doc = GridBuilder::new()
        .paragraph_before("intro")
        .row(vec![merged("a", 1, 2), covered(0, 0)])
        .build();
    let g = grid(&doc);

    let caret = focus(&mut doc, &g, CellPoint::new(0, 1), Edge::Start).unwrap();

    assert_eq!(caret.path.indices(), &[1, 0, 0, 0, 0]);
    assert_selection_in(&doc, (0, 0), (0, 0));
}

#[test]
fn test_select_normalizes_rectangle() {
    let mut doc = GridBuilder::new()
        .row(vec![plain("x"), merged("a", 2, 1)])
        .row(vec![plain("y"), covered(0, 1)])
        .build();
    let g = grid(&doc);

    let range = select(&mut doc, &g, sel((1, 0), (1, 1))).unwrap();

    // Row 1 column 1 is covered by the owner in row 0.
    assert_selection_in(&doc, (0, 0), (0, 1));
    assert_eq!(range.focus.offset, 1);
}
