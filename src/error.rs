//! Structured error types for cellgrid.
//!
//! Lookups that find nothing are not errors: they return `None`. These
//! variants cover host primitives addressed at nodes that do not exist,
//! invariant violations reported by [`crate::grid::validate`], and I/O for
//! the CLI.

use crate::path::Path;

/// All errors that can occur while reading or editing a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A host primitive was addressed at a path with no node.
    ///
    /// Grid operations return this when run with a stale [`GridEntry`]. Edits
    /// issued before the failing one stay applied, so the grid may be left
    /// partially edited.
    ///
    /// [`GridEntry`]: crate::grid::GridEntry
    #[error("No node at path {0}")]
    InvalidPath(Path),

    /// The root node cannot be removed, moved or replaced.
    #[error("Operation not permitted on the root node")]
    RootPath,

    /// A grid invariant does not hold.
    #[error("Grid invariant violated: {0}")]
    Invariant(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}
