use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{GridPageError, Result};

use super::{Cell, CellData, Picture, StyleId};

/// A rectangular merged cell region. Bounds are inclusive and 0-indexed.
///
/// The value/style of a region is defined solely by its top-left cell; all
/// other member cells are visually subordinate and are never independently
/// painted.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MergeRange {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl MergeRange {
    pub fn new(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.start_row && row <= self.end_row && col >= self.start_col && col <= self.end_col
    }

    fn overlaps(&self, other: &MergeRange) -> bool {
        self.start_row <= other.end_row
            && other.start_row <= self.end_row
            && self.start_col <= other.end_col
            && other.start_col <= self.end_col
    }
}

/// Default column width in pixels.
pub const DEFAULT_COL_WIDTH: f32 = 64.0;

/// Default row height in pixels.
pub const DEFAULT_ROW_HEIGHT: f32 = 20.0;

/// Read-only input model for a render call: the grid's shape, per-cell
/// values and style handles, merged regions, base dimensions, and embedded
/// pictures.
///
/// Built once by the populating collaborator; the render pipeline never
/// mutates it and holds no state across calls.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GridDocument {
    rows: u32,
    cols: u32,
    #[serde(with = "serde_cells")]
    cells: HashMap<(u32, u32), Cell>,
    merges: Vec<MergeRange>,
    col_widths: HashMap<u32, f32>,
    row_heights: HashMap<u32, f32>,
    hidden_cols: HashSet<u32>,
    pictures: Vec<Picture>,
    /// Style applied to cells that carry no handle of their own.
    #[serde(skip_serializing_if = "Option::is_none")]
    default_style: Option<StyleId>,
}

impl GridDocument {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Place a cell. Indices outside the declared bounds are rejected.
    pub fn set_cell(&mut self, row: u32, col: u32, cell: Cell) -> Result<()> {
        self.check_bounds(row, col)?;
        self.cells.insert((row, col), cell);
        Ok(())
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Iterate cells in row-major order.
    pub fn cells_row_major(&self) -> Vec<((u32, u32), &Cell)> {
        let mut cells: Vec<_> = self.cells.iter().map(|(&pos, cell)| (pos, cell)).collect();
        cells.sort_by_key(|&(pos, _)| pos);
        cells
    }

    /// Register a merged region. Bounds must lie inside the document and
    /// regions must not overlap.
    pub fn add_merge(&mut self, merge: MergeRange) -> Result<()> {
        if merge.end_row < merge.start_row || merge.end_col < merge.start_col {
            return Err(GridPageError::Document(format!(
                "inverted merge range {merge:?}"
            )));
        }
        self.check_bounds(merge.end_row, merge.end_col)?;
        if let Some(existing) = self.merges.iter().find(|m| m.overlaps(&merge)) {
            return Err(GridPageError::Document(format!(
                "merge {merge:?} overlaps {existing:?}"
            )));
        }
        self.merges.push(merge);
        Ok(())
    }

    pub fn merges(&self) -> &[MergeRange] {
        &self.merges
    }

    /// Declare a base column width in pixels.
    pub fn set_col_width(&mut self, col: u32, width: f32) {
        self.col_widths.insert(col, width.max(0.0));
    }

    /// Declare a base row height in pixels.
    pub fn set_row_height(&mut self, row: u32, height: f32) {
        self.row_heights.insert(row, height.max(0.0));
    }

    pub fn col_width(&self, col: u32) -> f32 {
        if self.hidden_cols.contains(&col) {
            return 0.0;
        }
        self.col_widths.get(&col).copied().unwrap_or(DEFAULT_COL_WIDTH)
    }

    pub fn row_height(&self, row: u32) -> f32 {
        self.row_heights
            .get(&row)
            .copied()
            .unwrap_or(DEFAULT_ROW_HEIGHT)
    }

    /// Hide a column. Hidden columns have width 0 and never contribute to
    /// region totals.
    pub fn hide_col(&mut self, col: u32) {
        self.hidden_cols.insert(col);
    }

    pub fn is_col_hidden(&self, col: u32) -> bool {
        self.hidden_cols.contains(&col)
    }

    pub fn add_picture(&mut self, picture: Picture) {
        self.pictures.push(picture);
    }

    pub fn pictures(&self) -> &[Picture] {
        &self.pictures
    }

    pub fn set_default_style(&mut self, id: StyleId) {
        self.default_style = Some(id);
    }

    pub fn default_style(&self) -> Option<StyleId> {
        self.default_style
    }

    fn check_bounds(&self, row: u32, col: u32) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(GridPageError::Document(format!(
                "({row},{col}) outside {}x{} document",
                self.rows, self.cols
            )));
        }
        Ok(())
    }
}

/// Serialize the sparse cell map as a positioned cell list, sorted
/// row-major so the JSON form is stable.
mod serde_cells {
    use std::collections::HashMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::CellData;
    use crate::types::Cell;

    pub fn serialize<S: Serializer>(
        cells: &HashMap<(u32, u32), Cell>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut list: Vec<CellData> = cells
            .iter()
            .map(|(&(r, c), cell)| CellData {
                r,
                c,
                cell: cell.clone(),
            })
            .collect();
        list.sort_by_key(|d| (d.r, d.c));
        list.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<(u32, u32), Cell>, D::Error> {
        let list = Vec::<CellData>::deserialize(deserializer)?;
        Ok(list.into_iter().map(|d| ((d.r, d.c), d.cell)).collect())
    }
}
