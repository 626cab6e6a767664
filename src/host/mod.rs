//! The host document seam.
//!
//! The grid algorithms never see a concrete document type. They read nodes
//! through [`GridNode`], recognise structure through an injected
//! [`Classify`] implementation, and mutate the document only through the
//! primitives of [`TreeHost`].
//!
//! [`memory::Document`] is an in-memory host used by the CLI and the tests.

pub mod memory;

use crate::config::DEFAULT_MIN_COL_WIDTH;
use crate::error::Result;
use crate::path::Path;
use crate::types::{AttrPatch, CellKind, CellPoint, Edge, Point, Range};

/// Capability predicates telling grid structure apart from other nodes.
pub trait Classify<N> {
    fn is_grid(&self, node: &N) -> bool;
    fn is_row(&self, node: &N) -> bool;
    fn is_cell(&self, node: &N) -> bool;
}

/// Read access to the attributes the grid model relies on.
///
/// Nodes that are not grids, rows or cells simply report `None`.
pub trait GridNode: Clone {
    fn children(&self) -> &[Self];

    /// Replace all children. Used to assemble new rows before insertion.
    fn set_children(&mut self, children: Vec<Self>);

    fn cols_width(&self) -> Option<&[f32]>;
    fn height(&self) -> Option<f32>;
    fn rowspan(&self) -> Option<usize>;
    fn colspan(&self) -> Option<usize>;
    fn span(&self) -> Option<CellPoint>;

    /// Text of a leaf node, `None` for containers.
    fn text(&self) -> Option<&str>;

    fn apply_attrs(&mut self, patch: &AttrPatch);

    /// Merge status derived from `span`, `rowspan` and `colspan`.
    fn cell_kind(&self) -> CellKind {
        match self.span() {
            Some(owner) => CellKind::Covered { owner },
            None => CellKind::Owner {
                rowspan: self.rowspan().unwrap_or(1).max(1),
                colspan: self.colspan().unwrap_or(1).max(1),
            },
        }
    }

    /// True when no leaf below this node holds any text.
    fn is_empty(&self) -> bool {
        match self.text() {
            Some(text) => text.is_empty(),
            None => self.children().iter().all(GridNode::is_empty),
        }
    }

    /// Concatenated text of every leaf below this node.
    fn text_content(&self) -> String {
        match self.text() {
            Some(text) => text.to_string(),
            None => self
                .children()
                .iter()
                .map(GridNode::text_content)
                .collect(),
        }
    }
}

/// A mutable document tree plus its active selection.
///
/// Every primitive is atomic from the grid model's point of view. Paths are
/// absolute; the root has the empty path.
pub trait TreeHost {
    type Node: GridNode;

    /// Classification predicates, bound once per host.
    fn classify(&self) -> &dyn Classify<Self::Node>;

    fn root(&self) -> &Self::Node;

    fn node(&self, path: &Path) -> Option<&Self::Node> {
        path.indices()
            .iter()
            .try_fold(self.root(), |node, &index| node.children().get(index))
    }

    /// Overwrite a subset of the attributes of the node at `path`.
    fn set_attrs(&mut self, path: &Path, patch: &AttrPatch) -> Result<()>;

    /// Insert `node` so that it ends up at `path`.
    fn insert_node(&mut self, path: &Path, node: Self::Node) -> Result<()>;

    /// Detach and return the node at `path`.
    fn remove_node(&mut self, path: &Path) -> Result<Self::Node>;

    /// Move the node at `from` so that, once detached, it is reinserted at `to`.
    fn move_node(&mut self, from: &Path, to: &Path) -> Result<()> {
        let node = self.remove_node(from)?;
        self.insert_node(to, node)
    }

    fn selection(&self) -> Option<&Range>;
    fn set_selection(&mut self, selection: Option<Range>);

    /// A fresh empty block, installed in cells whose content was moved or discarded.
    fn empty_content(&self) -> Self::Node;

    /// Width given to inserted columns that cannot inherit one.
    fn min_col_width(&self) -> f32 {
        DEFAULT_MIN_COL_WIDTH
    }

    /// Deepest caret position at the start or end of the node at `path`.
    ///
    /// Offsets are counted in characters.
    fn edge_point(&self, path: &Path, edge: Edge) -> Option<Point> {
        let mut node = self.node(path)?;
        let mut at = path.clone();
        loop {
            if let Some(text) = node.text() {
                let offset = match edge {
                    Edge::Start => 0,
                    Edge::End => text.chars().count(),
                };
                return Some(Point::new(at, offset));
            }
            let children = node.children();
            let (index, child) = match edge {
                Edge::Start => (0, children.first()?),
                Edge::End => (children.len().saturating_sub(1), children.last()?),
            };
            at = at.child(index);
            node = child;
        }
    }
}
