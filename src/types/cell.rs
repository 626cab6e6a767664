use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(row, col)` coordinate within a grid, zero-based.
///
/// Serialized as a two-element array `[row, col]`, which is also the shape of
/// the `span` attribute a covered cell carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct CellPoint {
    pub row: usize,
    pub col: usize,
}

impl CellPoint {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<[usize; 2]> for CellPoint {
    fn from([row, col]: [usize; 2]) -> Self {
        Self { row, col }
    }
}

impl From<CellPoint> for [usize; 2] {
    fn from(point: CellPoint) -> Self {
        [point.row, point.col]
    }
}

impl From<(usize, usize)> for CellPoint {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Merge status of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Holds real content and anchors a `rowspan x colspan` region.
    /// An unmerged cell is an owner with both spans equal to 1.
    Owner { rowspan: usize, colspan: usize },
    /// Placeholder inside a merged region, deferring to its owner.
    Covered { owner: CellPoint },
}

impl CellKind {
    pub fn is_covered(&self) -> bool {
        matches!(self, CellKind::Covered { .. })
    }

    /// True for owners spanning more than one row or column.
    pub fn is_merged_owner(&self) -> bool {
        matches!(self, CellKind::Owner { rowspan, colspan } if *rowspan > 1 || *colspan > 1)
    }
}

/// An owner's region: `[row, row + rowspan) x [col, col + colspan)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRegion {
    pub origin: CellPoint,
    pub rowspan: usize,
    pub colspan: usize,
}

impl CellRegion {
    /// Last row covered by the region (inclusive).
    pub fn end_row(&self) -> usize {
        self.origin.row + self.rowspan.saturating_sub(1)
    }

    /// Last column covered by the region (inclusive).
    pub fn end_col(&self) -> usize {
        self.origin.col + self.colspan.saturating_sub(1)
    }

    pub fn contains(&self, point: CellPoint) -> bool {
        point.row >= self.origin.row
            && point.row <= self.end_row()
            && point.col >= self.origin.col
            && point.col <= self.end_col()
    }

    pub fn overlaps(&self, other: &CellRegion) -> bool {
        self.origin.row <= other.end_row()
            && other.origin.row <= self.end_row()
            && self.origin.col <= other.end_col()
            && other.origin.col <= self.end_col()
    }
}
