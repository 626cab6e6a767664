//! Grid configuration.
//!
//! All fields have defaults, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default width for columns created without an explicit width.
pub const DEFAULT_COL_WIDTH: f32 = 35.0;

/// Width used by column insertion when no neighbouring width can be inherited.
pub const DEFAULT_MIN_COL_WIDTH: f32 = 5.0;

/// Node type names the in-memory host classifies as grid structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeKinds {
    pub grid: String,
    pub row: String,
    pub cell: String,
    /// Type of the block inserted as a cell's empty content.
    pub paragraph: String,
}

impl Default for NodeKinds {
    fn default() -> Self {
        Self {
            grid: "grid".to_string(),
            row: "grid-row".to_string(),
            cell: "grid-cell".to_string(),
            paragraph: "paragraph".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    pub kinds: NodeKinds,
    /// Applied to every column when a grid is created without widths.
    pub default_col_width: f32,
    /// Fallback width for inserted columns.
    pub min_col_width: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            kinds: NodeKinds::default(),
            default_col_width: DEFAULT_COL_WIDTH,
            min_col_width: DEFAULT_MIN_COL_WIDTH,
        }
    }
}

impl GridConfig {
    /// Parse a config from JSON, filling omitted fields with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = GridConfig::from_json("{}").unwrap();
        assert_eq!(config, GridConfig::default());
        assert_eq!(config.kinds.cell, "grid-cell");
    }

    #[test]
    fn test_partial_override() {
        let config =
            GridConfig::from_json(r#"{"minColWidth": 12.0, "kinds": {"grid": "table"}}"#).unwrap();
        assert_eq!(config.min_col_width, 12.0);
        assert_eq!(config.default_col_width, DEFAULT_COL_WIDTH);
        assert_eq!(config.kinds.grid, "table");
        assert_eq!(config.kinds.row, "grid-row");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(GridConfig::from_json("{not json").is_err());
    }
}
