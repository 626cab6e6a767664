use super::CellPoint;

/// A subset of grid node attributes to overwrite.
///
/// Each field is `None` to leave the attribute alone. The span-like fields
/// nest a second `Option`: `Some(None)` removes the attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrPatch {
    pub cols_width: Option<Vec<f32>>,
    pub height: Option<Option<f32>>,
    pub rowspan: Option<Option<usize>>,
    pub colspan: Option<Option<usize>>,
    pub span: Option<Option<CellPoint>>,
}

impl AttrPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cols_width(mut self, widths: Vec<f32>) -> Self {
        self.cols_width = Some(widths);
        self
    }

    pub fn height(mut self, height: Option<f32>) -> Self {
        self.height = Some(height);
        self
    }

    pub fn rowspan(mut self, rowspan: usize) -> Self {
        self.rowspan = Some(Some(rowspan));
        self
    }

    pub fn colspan(mut self, colspan: usize) -> Self {
        self.colspan = Some(Some(colspan));
        self
    }

    pub fn span(mut self, owner: CellPoint) -> Self {
        self.span = Some(Some(owner));
        self
    }

    /// Attributes of an owner cell: spans set, pointer removed.
    pub fn owner(rowspan: usize, colspan: usize) -> Self {
        Self {
            rowspan: Some(Some(rowspan)),
            colspan: Some(Some(colspan)),
            span: Some(None),
            ..Self::default()
        }
    }

    /// Attributes of a covered cell: spans removed, pointer set.
    pub fn covered(owner: CellPoint) -> Self {
        Self {
            rowspan: Some(None),
            colspan: Some(None),
            span: Some(Some(owner)),
            ..Self::default()
        }
    }
}
