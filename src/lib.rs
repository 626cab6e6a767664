//! cellgrid - merged-cell grid model
//!
//! The table model of a document editor, independent of rendering:
//! - Grids of rows and cells where cells merge across rows and columns
//! - Insert, remove and move rows/columns while keeping merges consistent
//! - Merge and split rectangular cell selections
//! - Merge-respecting selection normalization and caret mapping
//!
//! The algorithms run against any document tree implementing
//! [`host::TreeHost`]; [`host::memory::Document`] is a ready-made in-memory host.
//!
//! # Usage
//!
//! ```rust
//! use cellgrid::grid::{find_grid, merge_cells};
//! use cellgrid::host::memory::{CellDescriptor, Document, RowDescriptor};
//! use cellgrid::host::GridNode;
//! use cellgrid::{CellPoint, GridSelection};
//!
//! let mut doc = Document::default();
//! let grid = doc.create_grid(
//!     vec![RowDescriptor::new(vec![
//!         CellDescriptor::text("left"),
//!         CellDescriptor::text("right"),
//!     ])],
//!     None,
//! );
//! let path = doc.push(grid);
//!
//! let grid = find_grid(&doc, Some(&path)).ok_or("no grid")?;
//! let selection = GridSelection::new(CellPoint::new(0, 0), CellPoint::new(0, 1));
//! merge_cells(&mut doc, &grid, Some(selection))?;
//!
//! let grid = find_grid(&doc, Some(&path)).ok_or("no grid")?;
//! assert_eq!(grid.node.children()[0].children()[0].colspan(), Some(2));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod host;
pub mod path;
pub mod types;

pub use config::GridConfig;
pub use error::{GridError, Result};
pub use path::Path;
pub use types::*;

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
