//! Merging and splitting cells.

use tracing::debug;

use super::query::{get_selection, grid_at};
use super::{apply_edits, cells, edges, get_cell, select, CellsOptions, Edit, GridEntry};
use crate::error::Result;
use crate::host::{GridNode, TreeHost};
use crate::types::{AttrPatch, CellKind, Edge, GridSelection, Range};

/// `selection`, or the host selection when absent.
fn selection_or_host<H: TreeHost>(
    host: &H,
    grid: &GridEntry<H::Node>,
    selection: Option<GridSelection>,
) -> Option<GridSelection> {
    selection.or_else(|| get_selection(host, grid))
}

/// True if the normalized selection covers more than one row or column.
pub fn can_merge<H: TreeHost>(
    host: &H,
    grid: &GridEntry<H::Node>,
    selection: Option<GridSelection>,
) -> bool {
    let Some(selection) = selection_or_host(host, grid, selection) else {
        return false;
    };
    let rect = edges(host, grid, selection);
    rect.height() > 1 || rect.width() > 1
}

/// Merge the normalized selection into its top-left cell.
///
/// Content of every other non-empty owner is appended to the top-left cell
/// in row-major order; every other cell becomes covered. Selects the merged
/// cell's content. `None` if there is no selection or nothing resolves.
pub fn merge_cells<H: TreeHost>(
    host: &mut H,
    grid: &GridEntry<H::Node>,
    selection: Option<GridSelection>,
) -> Result<Option<Range>> {
    let Some(selection) = selection_or_host(host, grid, selection) else {
        return Ok(None);
    };
    let rect = edges(host, grid, selection);
    let Some(owner) = get_cell(host, grid, rect.start) else {
        return Ok(None);
    };
    debug!(path = %grid.path, start = %rect.start, end = %rect.end, "merge cells");

    let owner_path = owner.path.clone();
    let mut owner_len = owner.node.children().len();
    let mut edits = vec![Edit::SetAttrs(
        owner_path.clone(),
        AttrPatch::owner(rect.height(), rect.width()),
    )];

    for (cell, row, col) in cells(host, grid, CellsOptions::within(rect)) {
        if (row, col) == (rect.start.row, rect.start.col) {
            continue;
        }
        let path = grid.path.join(&[row, col]);
        if !cell.cell_kind().is_covered() && !cell.is_empty() {
            for _ in cell.children() {
                edits.push(Edit::Move(path.child(0), owner_path.child(owner_len)));
                owner_len += 1;
            }
            edits.push(Edit::Insert(path.child(0), host.empty_content()));
        }
        edits.push(Edit::SetAttrs(path, AttrPatch::covered(rect.start)));
    }

    apply_edits(host, edits)?;

    let Some(grid) = grid_at(host, &grid.path) else {
        return Ok(None);
    };
    let Some(owner) = get_cell(host, &grid, rect.start) else {
        return Ok(None);
    };
    let (Some(anchor), Some(focus)) = (
        host.edge_point(&owner.path, Edge::Start),
        host.edge_point(&owner.path, Edge::End),
    ) else {
        return Ok(None);
    };
    let range = Range::new(anchor, focus);
    host.set_selection(Some(range.clone()));
    Ok(Some(range))
}

/// True if the normalized selection contains a covered cell or a merged owner.
pub fn can_split<H: TreeHost>(
    host: &H,
    grid: &GridEntry<H::Node>,
    selection: Option<GridSelection>,
) -> bool {
    let Some(selection) = selection_or_host(host, grid, selection) else {
        return false;
    };
    let rect = edges(host, grid, selection);
    cells(host, grid, CellsOptions::within(rect)).any(|(cell, _, _)| {
        let kind = cell.cell_kind();
        kind.is_covered() || kind.is_merged_owner()
    })
}

/// Turn every cell of the normalized selection into an independent 1x1 owner.
///
/// Covered cells lose their placeholder and get fresh empty content. Selects
/// the split rectangle. `None` if nothing needed splitting.
pub fn split_cells<H: TreeHost>(
    host: &mut H,
    grid: &GridEntry<H::Node>,
    selection: Option<GridSelection>,
) -> Result<Option<Range>> {
    let Some(selection) = selection_or_host(host, grid, selection) else {
        return Ok(None);
    };
    let rect = edges(host, grid, selection);

    let mut edits = Vec::new();
    for (cell, row, col) in cells(host, grid, CellsOptions::within(rect)) {
        let path = grid.path.join(&[row, col]);
        match cell.cell_kind() {
            CellKind::Covered { .. } => {
                edits.push(Edit::SetAttrs(path.clone(), AttrPatch::owner(1, 1)));
                for child in (0..cell.children().len()).rev() {
                    edits.push(Edit::Remove(path.child(child)));
                }
                edits.push(Edit::Insert(path.child(0), host.empty_content()));
            }
            kind if kind.is_merged_owner() => {
                edits.push(Edit::SetAttrs(path, AttrPatch::owner(1, 1)));
            }
            CellKind::Owner { .. } => {}
        }
    }
    if edits.is_empty() {
        return Ok(None);
    }
    debug!(path = %grid.path, start = %rect.start, end = %rect.end, "split cells");

    apply_edits(host, edits)?;

    let Some(grid) = grid_at(host, &grid.path) else {
        return Ok(None);
    };
    Ok(select(host, &grid, rect))
}
