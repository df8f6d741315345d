use serde::{Deserialize, Serialize};

use super::StyleId;

/// Cell with position.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CellData {
    pub r: u32, // row (0-indexed)
    pub c: u32, // col (0-indexed)
    pub cell: Cell,
}

/// A single cell's value and style handle.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// The cell value; the value type determines the default display format.
    #[serde(default)]
    pub value: CellValue,
    /// Style handle into the `StyleTable` passed to the render call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleId>,
}

impl Cell {
    pub fn new(value: CellValue, style: Option<StyleId>) -> Self {
        Self { value, style }
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self {
            value: CellValue::Text(s.into()),
            style: None,
        }
    }

    pub fn number(n: f64) -> Self {
        Self {
            value: CellValue::Number(n),
            style: None,
        }
    }

    pub fn with_style(mut self, style: StyleId) -> Self {
        self.style = Some(style);
        self
    }
}

/// Cell value. Dates are day serials with the 1899-12-30 epoch.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", tag = "t", content = "v")]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Date(f64),
    Boolean(bool),
}

impl CellValue {
    /// True if the display text carries explicit line breaks.
    pub fn has_line_breaks(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.contains('\n'))
    }
}
