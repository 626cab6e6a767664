//! Merged-cell grid algorithms.
//!
//! Every operation takes the host and a located grid ([`GridEntry`]). Read
//! helpers work on the entry's node snapshot; mutators first build a plan of
//! host edits from that snapshot, then apply it, then re-read the grid from
//! the host to compute the resulting focus or selection.

mod cells;
mod column;
mod edges;
mod focus;
mod merge;
mod moving;
mod query;
mod row;
mod validate;

pub use cells::{cells, Cells, CellsOptions};
pub use column::{insert_column, remove_column};
pub use edges::{edges, owner_region, span};
pub use focus::{focus, select};
pub use merge::{can_merge, can_split, merge_cells, split_cells};
pub use moving::{move_column, move_row, range_of_move_column, range_of_move_row, MoveRange};
pub use query::{
    col_count, find_grid, get_cell, get_selected, get_selection, grid_at, row_count,
};
pub use row::{insert_row, remove_row};
pub use validate::validate;

use tracing::trace;

use crate::error::Result;
use crate::host::TreeHost;
use crate::path::Path;
use crate::types::{AttrPatch, CellPoint};

/// A grid node snapshot together with its location in the host.
#[derive(Debug, Clone)]
pub struct GridEntry<N> {
    pub node: N,
    pub path: Path,
}

/// A cell inside a [`GridEntry`] snapshot.
#[derive(Debug, Clone)]
pub struct CellEntry<'g, N> {
    pub node: &'g N,
    /// Absolute path of the cell in the host.
    pub path: Path,
    pub point: CellPoint,
}

/// One host primitive, recorded while planning a mutation.
#[derive(Debug)]
pub(crate) enum Edit<N> {
    SetAttrs(Path, AttrPatch),
    Insert(Path, N),
    Remove(Path),
    Move(Path, Path),
}

/// Issue planned edits against the host, in order.
///
/// Stops at the first failing primitive without undoing earlier edits.
pub(crate) fn apply_edits<H: TreeHost>(host: &mut H, edits: Vec<Edit<H::Node>>) -> Result<()> {
    for edit in edits {
        match edit {
            Edit::SetAttrs(path, patch) => {
                trace!(%path, ?patch, "set attributes");
                host.set_attrs(&path, &patch)?;
            }
            Edit::Insert(path, node) => {
                trace!(%path, "insert node");
                host.insert_node(&path, node)?;
            }
            Edit::Remove(path) => {
                trace!(%path, "remove node");
                host.remove_node(&path)?;
            }
            Edit::Move(from, to) => {
                trace!(%from, %to, "move node");
                host.move_node(&from, &to)?;
            }
        }
    }
    Ok(())
}
