//! In-memory document host.
//!
//! Documents serialize to JSON in the shape
//!
//! ```json
//! {
//!   "children": [
//!     { "type": "grid", "colsWidth": [35, 35], "children": [
//!       { "type": "grid-row", "children": [
//!         { "type": "grid-cell", "rowspan": 1, "colspan": 2, "children": [
//!           { "type": "paragraph", "children": [{ "text": "merged" }] }
//!         ]},
//!         { "type": "grid-cell", "span": [0, 0], "children": [
//!           { "type": "paragraph", "children": [{ "text": "" }] }
//!         ]}
//!       ]}
//!     ]}
//!   ],
//!   "selection": null
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::{Classify, GridNode, TreeHost};
use crate::config::{GridConfig, NodeKinds};
use crate::error::{GridError, Result};
use crate::path::Path;
use crate::types::{AttrPatch, CellPoint, Range};

/// Type name of the document root element.
pub const ROOT_KIND: &str = "document";

/// A leaf holding text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
}

/// A container node with a type name and optional grid attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cols_width: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rowspan: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colspan: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<CellPoint>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(kind: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            kind: kind.into(),
            cols_width: None,
            height: None,
            rowspan: None,
            colspan: None,
            span: None,
            children,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(Text),
    Element(Element),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(Text { text: text.into() })
    }

    pub fn element(kind: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element(Element::new(kind, children))
    }

    pub fn kind(&self) -> Option<&str> {
        match self {
            Node::Element(element) => Some(&element.kind),
            Node::Text(_) => None,
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Element(element) => Some(&mut element.children),
            Node::Text(_) => None,
        }
    }
}

impl GridNode for Node {
    fn children(&self) -> &[Self] {
        match self {
            Node::Element(element) => &element.children,
            Node::Text(_) => &[],
        }
    }

    fn set_children(&mut self, children: Vec<Self>) {
        if let Node::Element(element) = self {
            element.children = children;
        }
    }

    fn cols_width(&self) -> Option<&[f32]> {
        match self {
            Node::Element(element) => element.cols_width.as_deref(),
            Node::Text(_) => None,
        }
    }

    fn height(&self) -> Option<f32> {
        match self {
            Node::Element(element) => element.height,
            Node::Text(_) => None,
        }
    }

    fn rowspan(&self) -> Option<usize> {
        match self {
            Node::Element(element) => element.rowspan,
            Node::Text(_) => None,
        }
    }

    fn colspan(&self) -> Option<usize> {
        match self {
            Node::Element(element) => element.colspan,
            Node::Text(_) => None,
        }
    }

    fn span(&self) -> Option<CellPoint> {
        match self {
            Node::Element(element) => element.span,
            Node::Text(_) => None,
        }
    }

    fn text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(&text.text),
            Node::Element(_) => None,
        }
    }

    fn apply_attrs(&mut self, patch: &AttrPatch) {
        let Node::Element(element) = self else {
            return;
        };
        if let Some(widths) = &patch.cols_width {
            element.cols_width = Some(widths.clone());
        }
        if let Some(height) = patch.height {
            element.height = height;
        }
        if let Some(rowspan) = patch.rowspan {
            element.rowspan = rowspan;
        }
        if let Some(colspan) = patch.colspan {
            element.colspan = colspan;
        }
        if let Some(span) = patch.span {
            element.span = span;
        }
    }
}

/// Classifies elements by their `type` name.
#[derive(Debug, Clone, Default)]
pub struct KindClassifier {
    kinds: NodeKinds,
}

impl KindClassifier {
    pub fn new(kinds: NodeKinds) -> Self {
        Self { kinds }
    }

    fn is_kind(node: &Node, kind: &str) -> bool {
        node.kind() == Some(kind)
    }
}

impl Classify<Node> for KindClassifier {
    fn is_grid(&self, node: &Node) -> bool {
        Self::is_kind(node, &self.kinds.grid)
    }

    fn is_row(&self, node: &Node) -> bool {
        Self::is_kind(node, &self.kinds.row)
    }

    fn is_cell(&self, node: &Node) -> bool {
        Self::is_kind(node, &self.kinds.cell)
    }
}

/// Cell descriptor used by [`Document::create_grid`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellDescriptor {
    pub rowspan: Option<usize>,
    pub colspan: Option<usize>,
    pub span: Option<CellPoint>,
    pub text: String,
}

impl CellDescriptor {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// A covered placeholder pointing at its owner.
    pub fn covered(owner: CellPoint) -> Self {
        Self {
            span: Some(owner),
            ..Self::default()
        }
    }

    pub fn with_spans(mut self, rowspan: usize, colspan: usize) -> Self {
        self.rowspan = Some(rowspan);
        self.colspan = Some(colspan);
        self
    }
}

/// Row descriptor used by [`Document::create_grid`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowDescriptor {
    pub height: Option<f32>,
    pub cells: Vec<CellDescriptor>,
}

impl RowDescriptor {
    pub fn new(cells: Vec<CellDescriptor>) -> Self {
        Self {
            height: None,
            cells,
        }
    }
}

/// Serialized form of a [`Document`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DocumentData {
    #[serde(default)]
    children: Vec<Node>,
    #[serde(default)]
    selection: Option<Range>,
}

/// An in-memory document implementing [`TreeHost`].
#[derive(Debug, Clone)]
pub struct Document {
    root: Node,
    selection: Option<Range>,
    config: GridConfig,
    classifier: KindClassifier,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self::with_config(children, GridConfig::default())
    }

    pub fn with_config(children: Vec<Node>, config: GridConfig) -> Self {
        let classifier = KindClassifier::new(config.kinds.clone());
        Self {
            root: Node::element(ROOT_KIND, children),
            selection: None,
            config,
            classifier,
        }
    }

    /// Parse a document from JSON.
    pub fn from_json(json: &str, config: GridConfig) -> Result<Self> {
        let data: DocumentData = serde_json::from_str(json)?;
        let mut document = Self::with_config(data.children, config);
        document.selection = data.selection;
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String> {
        let data = DocumentData {
            children: self.root.children().to_vec(),
            selection: self.selection.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn children(&self) -> &[Node] {
        self.root.children()
    }

    /// Append a top-level node, returning its path.
    pub fn push(&mut self, node: Node) -> Path {
        let index = self.root.children().len();
        if let Some(children) = self.root.children_mut() {
            children.push(node);
        }
        Path::new(vec![index])
    }

    /// A paragraph holding `text`.
    pub fn paragraph(&self, text: impl Into<String>) -> Node {
        Node::element(self.config.kinds.paragraph.clone(), vec![Node::text(text)])
    }

    /// An unmerged cell holding one empty paragraph.
    pub fn cell_template(&self) -> Node {
        Node::element(self.config.kinds.cell.clone(), vec![self.paragraph("")])
    }

    /// A row with no cells; insertion fills it.
    pub fn row_template(&self) -> Node {
        Node::element(self.config.kinds.row.clone(), Vec::new())
    }

    /// Build a grid node from row descriptors.
    ///
    /// When `cols_width` is omitted every column gets the configured default
    /// width; the column count is taken from the first row.
    pub fn create_grid(&self, rows: Vec<RowDescriptor>, cols_width: Option<Vec<f32>>) -> Node {
        let col_count = rows.first().map_or(0, |row| row.cells.len());
        let widths = cols_width.unwrap_or_else(|| vec![self.config.default_col_width; col_count]);

        let rows = rows
            .into_iter()
            .map(|row| {
                let cells = row
                    .cells
                    .into_iter()
                    .map(|cell| self.create_cell(cell))
                    .collect();
                let mut element = Element::new(self.config.kinds.row.clone(), cells);
                element.height = row.height;
                Node::Element(element)
            })
            .collect();

        let mut grid = Element::new(self.config.kinds.grid.clone(), rows);
        grid.cols_width = Some(widths);
        Node::Element(grid)
    }

    fn create_cell(&self, descriptor: CellDescriptor) -> Node {
        let mut element =
            Element::new(self.config.kinds.cell.clone(), vec![self.paragraph(descriptor.text)]);
        match descriptor.span {
            Some(owner) => element.span = Some(owner),
            None => {
                element.rowspan = Some(descriptor.rowspan.unwrap_or(1));
                element.colspan = Some(descriptor.colspan.unwrap_or(1));
            }
        }
        Node::Element(element)
    }

    fn node_mut(&mut self, path: &Path) -> Option<&mut Node> {
        path.indices()
            .iter()
            .try_fold(&mut self.root, |node, &index| {
                node.children_mut()?.get_mut(index)
            })
    }

    /// Children of the parent of `path`, plus the index `path` names in it.
    fn parent_children_mut(&mut self, path: &Path) -> Result<(&mut Vec<Node>, usize)> {
        let (Some(parent), Some(index)) = (path.parent(), path.last()) else {
            return Err(GridError::RootPath);
        };
        let children = self
            .node_mut(&parent)
            .and_then(Node::children_mut)
            .ok_or_else(|| GridError::InvalidPath(path.clone()))?;
        Ok((children, index))
    }
}

impl TreeHost for Document {
    type Node = Node;

    fn classify(&self) -> &dyn Classify<Node> {
        &self.classifier
    }

    fn root(&self) -> &Node {
        &self.root
    }

    fn set_attrs(&mut self, path: &Path, patch: &AttrPatch) -> Result<()> {
        let node = self
            .node_mut(path)
            .ok_or_else(|| GridError::InvalidPath(path.clone()))?;
        node.apply_attrs(patch);
        Ok(())
    }

    fn insert_node(&mut self, path: &Path, node: Node) -> Result<()> {
        let (children, index) = self.parent_children_mut(path)?;
        if index > children.len() {
            return Err(GridError::InvalidPath(path.clone()));
        }
        children.insert(index, node);
        Ok(())
    }

    fn remove_node(&mut self, path: &Path) -> Result<Node> {
        let (children, index) = self.parent_children_mut(path)?;
        if index >= children.len() {
            return Err(GridError::InvalidPath(path.clone()));
        }
        Ok(children.remove(index))
    }

    fn selection(&self) -> Option<&Range> {
        self.selection.as_ref()
    }

    fn set_selection(&mut self, selection: Option<Range>) {
        self.selection = selection;
    }

    fn empty_content(&self) -> Node {
        self.paragraph("")
    }

    fn min_col_width(&self) -> f32 {
        self.config.min_col_width
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::{Edge, Point};

    fn sample() -> Document {
        let mut doc = Document::default();
        let grid = doc.create_grid(
            vec![RowDescriptor::new(vec![
                CellDescriptor::text("a").with_spans(1, 2),
                CellDescriptor::covered(CellPoint::new(0, 0)),
            ])],
            None,
        );
        doc.push(grid);
        doc
    }

    #[test]
    fn test_create_grid_applies_default_widths() {
        let doc = sample();
        let grid = doc.node(&Path::new(vec![0])).unwrap();
        assert_eq!(grid.cols_width(), Some(&[35.0, 35.0][..]));
        let covered = doc.node(&Path::new(vec![0, 0, 1])).unwrap();
        assert_eq!(covered.span(), Some(CellPoint::new(0, 0)));
        assert_eq!(covered.rowspan(), None);
    }

    #[test]
    fn test_json_roundtrip_preserves_attributes() {
        let doc = sample();
        let json = doc.to_json().unwrap();
        assert!(json.contains("\"colsWidth\""));
        assert!(json.contains("\"span\": ["));
        let back = Document::from_json(&json, GridConfig::default()).unwrap();
        assert_eq!(back.children(), doc.children());
    }

    #[test]
    fn test_move_node_lands_at_target() {
        let mut doc = Document::new(vec![
            Node::text("a"),
            Node::text("b"),
            Node::text("c"),
        ]);
        doc.move_node(&Path::new(vec![0]), &Path::new(vec![2])).unwrap();
        let texts: Vec<String> = doc.children().iter().map(GridNode::text_content).collect();
        assert_eq!(texts, ["b", "c", "a"]);
    }

    #[test]
    fn test_primitives_reject_missing_paths() {
        let mut doc = sample();
        assert!(matches!(
            doc.remove_node(&Path::new(vec![4])),
            Err(GridError::InvalidPath(_))
        ));
        assert!(matches!(
            doc.remove_node(&Path::root()),
            Err(GridError::RootPath)
        ));
        assert!(doc
            .set_attrs(&Path::new(vec![0, 9]), &AttrPatch::new().colspan(2))
            .is_err());
    }

    #[test]
    fn test_edge_points() {
        let doc = sample();
        let cell = Path::new(vec![0, 0, 0]);
        assert_eq!(
            doc.edge_point(&cell, Edge::Start),
            Some(Point::new(Path::new(vec![0, 0, 0, 0, 0]), 0))
        );
        assert_eq!(
            doc.edge_point(&cell, Edge::End),
            Some(Point::new(Path::new(vec![0, 0, 0, 0, 0]), 1))
        );
    }

    #[test]
    fn test_set_attrs_clears_span() {
        let mut doc = sample();
        let path = Path::new(vec![0, 0, 1]);
        doc.set_attrs(&path, &AttrPatch::owner(1, 1)).unwrap();
        let cell = doc.node(&path).unwrap();
        assert_eq!(cell.span(), None);
        assert_eq!(cell.colspan(), Some(1));
    }
}
