//! Test fixtures for building grid documents in memory.
//!
//! Rows are described cell by cell with [`plain`], [`merged`] and [`covered`],
//! and the builder produces a [`Document`] holding the grid.
//!
//! # Example
//!
//! ```rust,ignore
//! use fixtures::{covered, merged, plain, GridBuilder};
//!
//! let doc = GridBuilder::new()
//!     .row(vec![merged("header", 1, 2), covered(0, 0)])
//!     .row(vec![plain("a"), plain("b")])
//!     .build();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use cellgrid::host::memory::{CellDescriptor, Document, RowDescriptor};
use cellgrid::{CellPoint, GridConfig, Path};

// ============================================================================
// Cell Descriptors
// ============================================================================

/// An unmerged cell holding `text`.
pub fn plain(text: &str) -> CellDescriptor {
    CellDescriptor::text(text).with_spans(1, 1)
}

/// An owner cell spanning `rowspan` x `colspan`.
pub fn merged(text: &str, rowspan: usize, colspan: usize) -> CellDescriptor {
    CellDescriptor::text(text).with_spans(rowspan, colspan)
}

/// A covered cell pointing at the owner at `(row, col)`.
pub fn covered(row: usize, col: usize) -> CellDescriptor {
    CellDescriptor::covered(CellPoint::new(row, col))
}

/// A covered cell that still carries leftover text.
pub fn covered_text(text: &str, row: usize, col: usize) -> CellDescriptor {
    CellDescriptor {
        text: text.to_string(),
        ..covered(row, col)
    }
}

// ============================================================================
// Grid Builder
// ============================================================================

/// Builder for a document containing a single grid.
#[derive(Debug, Clone, Default)]
pub struct GridBuilder {
    rows: Vec<RowDescriptor>,
    widths: Option<Vec<f32>>,
    config: GridConfig,
    leading: Vec<String>,
    trailing: Vec<String>,
}

impl GridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row of cells.
    pub fn row(mut self, cells: Vec<CellDescriptor>) -> Self {
        self.rows.push(RowDescriptor::new(cells));
        self
    }

    /// Add a row with an explicit height.
    pub fn row_with_height(mut self, height: f32, cells: Vec<CellDescriptor>) -> Self {
        self.rows.push(RowDescriptor {
            height: Some(height),
            cells,
        });
        self
    }

    pub fn widths(mut self, widths: Vec<f32>) -> Self {
        self.widths = Some(widths);
        self
    }

    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    /// Put a paragraph before the grid, shifting the grid's path.
    pub fn paragraph_before(mut self, text: &str) -> Self {
        self.leading.push(text.to_string());
        self
    }

    /// Put a paragraph after the grid.
    pub fn paragraph_after(mut self, text: &str) -> Self {
        self.trailing.push(text.to_string());
        self
    }

    /// Build the document and return it with the grid's path.
    pub fn build_with_path(self) -> (Document, Path) {
        let mut doc = Document::with_config(Vec::new(), self.config);
        for text in self.leading {
            let paragraph = doc.paragraph(text);
            doc.push(paragraph);
        }
        let grid = doc.create_grid(self.rows, self.widths);
        let path = doc.push(grid);
        for text in self.trailing {
            let paragraph = doc.paragraph(text);
            doc.push(paragraph);
        }
        (doc, path)
    }

    pub fn build(self) -> Document {
        self.build_with_path().0
    }
}

/// A `rows` x `cols` grid of plain cells with text like `"r0c1"`.
pub fn plain_grid(rows: usize, cols: usize) -> Document {
    (0..rows)
        .fold(GridBuilder::new(), |builder, row| {
            let cells = (0..cols).map(|col| plain(&format!("r{row}c{col}"))).collect();
            builder.row(cells)
        })
        .build()
}
