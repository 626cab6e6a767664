//! Row insertion and removal, the transpose of [`super::column`].

use tracing::debug;

use super::column::owner_of;
use super::query::{col_count, grid_at, row_count};
use super::{apply_edits, focus, get_cell, Edit, GridEntry};
use crate::error::Result;
use crate::host::{GridNode, TreeHost};
use crate::types::{AttrPatch, CellKind, CellPoint, Edge, Point};

/// Insert a row at `index`, built from `row_template` with one
/// `cell_template` per column.
///
/// `index` past the last row appends. A new cell landing strictly inside a
/// vertical merge joins it as a covered cell. Focuses the start of
/// `(index, 0)`.
pub fn insert_row<H: TreeHost>(
    host: &mut H,
    grid: &GridEntry<H::Node>,
    index: usize,
    row_template: &H::Node,
    cell_template: &H::Node,
    height: Option<f32>,
) -> Result<Option<Point>> {
    let rows = row_count(host, grid);
    let cols = col_count(host, grid);
    let index = index.min(rows);
    debug!(path = %grid.path, index, ?height, "insert row");

    let mut edits = Vec::new();
    let mut cells = Vec::with_capacity(cols);

    for col in 0..cols {
        let above = index
            .checked_sub(1)
            .and_then(|row| get_cell(host, grid, CellPoint::new(row, col)));
        let below = get_cell(host, grid, CellPoint::new(index, col));

        let joined = match (&above, &below) {
            (Some(above), Some(below)) => {
                let owner = owner_of(above);
                let above_spans = matches!(
                    above.node.cell_kind(),
                    CellKind::Owner { rowspan, .. } if rowspan > 1
                );
                (owner == owner_of(below) || above_spans).then_some(owner)
            }
            _ => None,
        };

        let mut cell = cell_template.clone();
        match joined {
            Some(owner) => {
                cell.apply_attrs(&AttrPatch::covered(owner));
                // Grow the owner once, from its anchor column.
                if owner.col == col {
                    if let Some(owner_cell) = get_cell(host, grid, owner) {
                        if let CellKind::Owner { rowspan, .. } = owner_cell.node.cell_kind() {
                            edits.push(Edit::SetAttrs(
                                owner_cell.path.clone(),
                                AttrPatch::new().rowspan(rowspan + 1),
                            ));
                        }
                    }
                }
            }
            None => cell.apply_attrs(&AttrPatch::owner(1, 1)),
        }
        cells.push(cell);
    }

    for row in index..rows {
        for col in 0..cols {
            let Some(shifted) = get_cell(host, grid, CellPoint::new(row, col)) else {
                continue;
            };
            if let CellKind::Covered { owner } = shifted.node.cell_kind() {
                if owner.row >= index {
                    edits.push(Edit::SetAttrs(
                        shifted.path.clone(),
                        AttrPatch::new().span(CellPoint::new(owner.row + 1, owner.col)),
                    ));
                }
            }
        }
    }

    let mut new_row = row_template.clone();
    new_row.set_children(cells);
    if height.is_some() {
        new_row.apply_attrs(&AttrPatch::new().height(height));
    }
    edits.push(Edit::Insert(grid.path.child(index), new_row));

    apply_edits(host, edits)?;

    let Some(grid) = grid_at(host, &grid.path) else {
        return Ok(None);
    };
    Ok(focus(host, &grid, CellPoint::new(index, 0), Edge::Start))
}

/// Remove the row at `index`.
///
/// Removing the only row deletes the grid node and returns `None`. Merges
/// crossing the row shrink by one; a merge anchored in the row hands
/// ownership to the row below. Focuses the start of the row now at `index`,
/// or of the previous one when the last row went away.
pub fn remove_row<H: TreeHost>(
    host: &mut H,
    grid: &GridEntry<H::Node>,
    index: usize,
) -> Result<Option<Point>> {
    let rows = row_count(host, grid);
    let cols = col_count(host, grid);
    if index >= rows {
        return Ok(None);
    }
    if rows <= 1 {
        debug!(path = %grid.path, "removing last row, deleting grid");
        host.remove_node(&grid.path)?;
        return Ok(None);
    }
    debug!(path = %grid.path, index, "remove row");

    let mut edits = Vec::new();
    for col in 0..cols {
        let Some(cell) = get_cell(host, grid, CellPoint::new(index, col)) else {
            continue;
        };
        match cell.node.cell_kind() {
            CellKind::Covered { owner } => {
                // Only the owner's own column shrinks a multi-column merge.
                if owner.col == col {
                    if let Some(owner_cell) = get_cell(host, grid, owner) {
                        if let CellKind::Owner { rowspan, .. } = owner_cell.node.cell_kind() {
                            edits.push(Edit::SetAttrs(
                                owner_cell.path.clone(),
                                AttrPatch::new().rowspan(rowspan.saturating_sub(1).max(1)),
                            ));
                        }
                    }
                }
            }
            CellKind::Owner { rowspan, colspan } if rowspan > 1 => {
                if let Some(next) = get_cell(host, grid, CellPoint::new(index + 1, col)) {
                    edits.push(Edit::SetAttrs(
                        next.path.clone(),
                        AttrPatch::owner(rowspan - 1, colspan),
                    ));
                }
            }
            CellKind::Owner { .. } => {}
        }
    }

    for row in index + 1..rows {
        for col in 0..cols {
            let Some(shifted) = get_cell(host, grid, CellPoint::new(row, col)) else {
                continue;
            };
            if let CellKind::Covered { owner } = shifted.node.cell_kind() {
                if owner.row > index {
                    edits.push(Edit::SetAttrs(
                        shifted.path.clone(),
                        AttrPatch::new().span(CellPoint::new(owner.row - 1, owner.col)),
                    ));
                }
            }
        }
    }

    edits.push(Edit::Remove(grid.path.child(index)));
    apply_edits(host, edits)?;

    let Some(grid) = grid_at(host, &grid.path) else {
        return Ok(None);
    };
    let row = if index + 1 == rows {
        index.saturating_sub(1)
    } else {
        index
    };
    Ok(focus(host, &grid, CellPoint::new(row, 0), Edge::Start))
}
