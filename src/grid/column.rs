//! Column insertion and removal.

use tracing::debug;

use super::query::{col_count, grid_at, row_count};
use super::{apply_edits, focus, get_cell, CellEntry, Edit, GridEntry};
use crate::error::Result;
use crate::host::{GridNode, TreeHost};
use crate::types::{AttrPatch, CellKind, CellPoint, Edge, Point};

/// Owner coordinate of a cell: its span target, or itself.
pub(super) fn owner_of<N: GridNode>(cell: &CellEntry<'_, N>) -> CellPoint {
    match cell.node.cell_kind() {
        CellKind::Covered { owner } => owner,
        CellKind::Owner { .. } => cell.point,
    }
}

/// Insert a column at `index`, built from `template` in every row.
///
/// `index` past the last column appends. Without `width` the new column
/// inherits the width at `index` (or of the last column), falling back to
/// the host's minimum width. Columns without a stored width get the minimum. A new cell landing strictly inside a horizontal
/// merge joins it as a covered cell. Focuses the start of `(0, index)`.
pub fn insert_column<H: TreeHost>(
    host: &mut H,
    grid: &GridEntry<H::Node>,
    index: usize,
    template: &H::Node,
    width: Option<f32>,
) -> Result<Option<Point>> {
    let rows = row_count(host, grid);
    let cols = col_count(host, grid);
    let index = index.min(cols);

    // Missing or short width lists are padded so the result has one entry
    // per column.
    let min_width = host.min_col_width();
    let mut widths = grid.node.cols_width().map(<[f32]>::to_vec).unwrap_or_default();
    widths.resize(cols, min_width);
    let width = width
        .or_else(|| widths.get(index).or_else(|| widths.last()).copied())
        .unwrap_or(min_width);
    widths.insert(index, width);
    debug!(path = %grid.path, index, width, "insert column");

    let mut edits = vec![Edit::SetAttrs(
        grid.path.clone(),
        AttrPatch::new().cols_width(widths),
    )];

    for row in 0..rows {
        let left = index
            .checked_sub(1)
            .and_then(|col| get_cell(host, grid, CellPoint::new(row, col)));
        let right = get_cell(host, grid, CellPoint::new(row, index));

        let joined = match (&left, &right) {
            (Some(left), Some(right)) => {
                let owner = owner_of(left);
                let left_spans = matches!(
                    left.node.cell_kind(),
                    CellKind::Owner { colspan, .. } if colspan > 1
                );
                (owner == owner_of(right) || left_spans).then_some(owner)
            }
            _ => None,
        };

        let mut cell = template.clone();
        match joined {
            Some(owner) => {
                cell.apply_attrs(&AttrPatch::covered(owner));
                // Grow the owner once, from its anchor row.
                if owner.row == row {
                    if let Some(owner_cell) = get_cell(host, grid, owner) {
                        if let CellKind::Owner { colspan, .. } = owner_cell.node.cell_kind() {
                            edits.push(Edit::SetAttrs(
                                owner_cell.path.clone(),
                                AttrPatch::new().colspan(colspan + 1),
                            ));
                        }
                    }
                }
            }
            None => cell.apply_attrs(&AttrPatch::owner(1, 1)),
        }

        for col in index..cols {
            let Some(shifted) = get_cell(host, grid, CellPoint::new(row, col)) else {
                continue;
            };
            if let CellKind::Covered { owner } = shifted.node.cell_kind() {
                if owner.col >= index {
                    edits.push(Edit::SetAttrs(
                        shifted.path.clone(),
                        AttrPatch::new().span(CellPoint::new(owner.row, owner.col + 1)),
                    ));
                }
            }
        }

        edits.push(Edit::Insert(grid.path.join(&[row, index]), cell));
    }

    apply_edits(host, edits)?;

    let Some(grid) = grid_at(host, &grid.path) else {
        return Ok(None);
    };
    Ok(focus(host, &grid, CellPoint::new(0, index), Edge::Start))
}

/// Remove the column at `index`.
///
/// Removing the only column deletes the grid node and returns `None`.
/// Merges crossing the column shrink by one; a merge anchored in the column
/// hands ownership to its next column. Focuses the start of the column now
/// at `index`, or of the previous one when the last column went away.
pub fn remove_column<H: TreeHost>(
    host: &mut H,
    grid: &GridEntry<H::Node>,
    index: usize,
) -> Result<Option<Point>> {
    let rows = row_count(host, grid);
    let cols = col_count(host, grid);
    if index >= cols {
        return Ok(None);
    }
    if cols <= 1 {
        debug!(path = %grid.path, "removing last column, deleting grid");
        host.remove_node(&grid.path)?;
        return Ok(None);
    }
    debug!(path = %grid.path, index, "remove column");

    let mut edits = Vec::new();
    if let Some(widths) = grid.node.cols_width() {
        let widths = widths
            .iter()
            .enumerate()
            .filter(|(col, _)| *col != index)
            .map(|(_, width)| *width)
            .collect();
        edits.push(Edit::SetAttrs(
            grid.path.clone(),
            AttrPatch::new().cols_width(widths),
        ));
    }

    for row in 0..rows {
        let Some(cell) = get_cell(host, grid, CellPoint::new(row, index)) else {
            continue;
        };
        match cell.node.cell_kind() {
            CellKind::Covered { owner } => {
                // Every row of a multi-row merge has a covered cell here;
                // only the owner's own row shrinks it.
                if owner.row == row {
                    if let Some(owner_cell) = get_cell(host, grid, owner) {
                        if let CellKind::Owner { colspan, .. } = owner_cell.node.cell_kind() {
                            edits.push(Edit::SetAttrs(
                                owner_cell.path.clone(),
                                AttrPatch::new().colspan(colspan.saturating_sub(1).max(1)),
                            ));
                        }
                    }
                }
            }
            CellKind::Owner { rowspan, colspan } if colspan > 1 => {
                if let Some(next) = get_cell(host, grid, CellPoint::new(row, index + 1)) {
                    edits.push(Edit::SetAttrs(
                        next.path.clone(),
                        AttrPatch::owner(rowspan, colspan - 1),
                    ));
                }
            }
            CellKind::Owner { .. } => {}
        }

        // Spans at `index` keep pointing there: that is where a transferred
        // owner ends up.
        for col in index + 1..cols {
            let Some(shifted) = get_cell(host, grid, CellPoint::new(row, col)) else {
                continue;
            };
            if let CellKind::Covered { owner } = shifted.node.cell_kind() {
                if owner.col > index {
                    edits.push(Edit::SetAttrs(
                        shifted.path.clone(),
                        AttrPatch::new().span(CellPoint::new(owner.row, owner.col - 1)),
                    ));
                }
            }
        }

        edits.push(Edit::Remove(cell.path.clone()));
    }

    apply_edits(host, edits)?;

    let Some(grid) = grid_at(host, &grid.path) else {
        return Ok(None);
    };
    let col = if index + 1 == cols {
        index.saturating_sub(1)
    } else {
        index
    };
    Ok(focus(host, &grid, CellPoint::new(0, col), Edge::Start))
}
