use serde::{Deserialize, Serialize};

use super::CellPoint;
use crate::path::Path;

/// Which end of a cell's content a caret resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    #[default]
    Start,
    End,
}

/// A caret position in the host document: a leaf path plus a text offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub path: Path,
    pub offset: usize,
}

impl Point {
    pub fn new(path: Path, offset: usize) -> Self {
        Self { path, offset }
    }
}

/// The host's active selection as an anchor/focus pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub anchor: Point,
    pub focus: Point,
}

impl Range {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    /// A caret: anchor and focus at the same point.
    pub fn collapsed(point: Point) -> Self {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

/// A rectangular cell selection given by two corners in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSelection {
    pub start: CellPoint,
    pub end: CellPoint,
}

impl GridSelection {
    pub fn new(start: CellPoint, end: CellPoint) -> Self {
        Self { start, end }
    }

    /// Selection of a single cell.
    pub fn cell(point: CellPoint) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// Corner-ordered copy: `start` is top-left, `end` is bottom-right.
    pub fn ordered(&self) -> Self {
        Self {
            start: CellPoint::new(
                self.start.row.min(self.end.row),
                self.start.col.min(self.end.col),
            ),
            end: CellPoint::new(
                self.start.row.max(self.end.row),
                self.start.col.max(self.end.col),
            ),
        }
    }

    /// Number of rows covered, counting both corners.
    pub fn height(&self) -> usize {
        self.start.row.abs_diff(self.end.row) + 1
    }

    /// Number of columns covered, counting both corners.
    pub fn width(&self) -> usize {
        self.start.col.abs_diff(self.end.col) + 1
    }
}

/// Summary of what a normalized selection covers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSelected {
    /// Row indices inside the rectangle, ascending.
    pub rows: Vec<usize>,
    /// Column indices inside the rectangle, ascending.
    pub cols: Vec<usize>,
    /// Spans every column (column 0 through the last).
    pub row_full: bool,
    /// Spans every row (row 0 through the last).
    pub col_full: bool,
    /// Spans the whole grid.
    pub all_full: bool,
    /// Every position inside the rectangle, row-major.
    pub cells: Vec<CellPoint>,
    pub count: usize,
}
