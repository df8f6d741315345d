//! Resolved grid dimensions.
//!
//! The resolver runs exactly once per render: it scales the document's base
//! column widths and row heights, expands rows so wrapped text fits inside
//! its (possibly merged) region, and pre-computes cumulative edge positions
//! for O(1) rectangle lookups.

use std::collections::HashMap;

use crate::config::RenderConfig;
use crate::format::format_value;
use crate::types::{GridDocument, Style, StyleTable};

use super::text::{wrap_text, TextMeasurer};

/// Row heights grown by the wrap pass are bounded to these limits
/// (300–1500 twips in the source units; 20–100 px at 96 dpi).
pub const ROW_GROWTH_FLOOR: f32 = 20.0;
pub const ROW_GROWTH_CEILING: f32 = 100.0;

/// Information about a merged cell region.
#[derive(Debug, Clone)]
pub struct MergeInfo {
    /// True if this cell is the top-left origin of the merge.
    pub is_origin: bool,
    /// Row of the merge origin.
    pub origin_row: u32,
    /// Column of the merge origin.
    pub origin_col: u32,
    /// Number of rows in the merge.
    pub row_span: u32,
    /// Number of columns in the merge.
    pub col_span: u32,
}

/// Rectangle representing a cell's pixel bounds.
#[derive(Debug, Clone, Copy)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// True if this cell must not be painted (merge member, not origin).
    pub skip: bool,
}

/// Per-column/per-row pixel sizes plus cumulative edge positions.
///
/// Produced once per render call and never mutated downstream.
#[derive(Debug, Clone)]
pub struct ResolvedDimensions {
    /// Cumulative column positions (`col_positions[i]` = x of column i's
    /// left edge; one extra entry for the final edge).
    pub col_positions: Vec<f32>,
    /// Cumulative row positions.
    pub row_positions: Vec<f32>,
    /// Column widths (0 for hidden columns).
    pub col_widths: Vec<f32>,
    /// Row heights after wrap-driven expansion.
    pub row_heights: Vec<f32>,
    /// Merge info lookup by (row, col).
    pub merges: HashMap<(u32, u32), MergeInfo>,
}

impl ResolvedDimensions {
    /// Get cell bounds in canvas coordinates. For a merge origin the rect
    /// spans the whole region; for other merge members `skip` is set.
    pub fn cell_rect(&self, row: u32, col: u32) -> CellRect {
        let x = self.col_positions.get(col as usize).copied().unwrap_or(0.0);
        let y = self.row_positions.get(row as usize).copied().unwrap_or(0.0);
        let mut w = self.col_widths.get(col as usize).copied().unwrap_or(0.0);
        let mut h = self.row_heights.get(row as usize).copied().unwrap_or(0.0);

        if let Some(merge) = self.merges.get(&(row, col)) {
            if !merge.is_origin {
                return CellRect {
                    x,
                    y,
                    width: w,
                    height: h,
                    skip: true,
                };
            }
            let end_col = col + merge.col_span;
            let end_row = row + merge.row_span;
            w = self
                .col_positions
                .get(end_col as usize)
                .copied()
                .unwrap_or(x)
                - x;
            h = self
                .row_positions
                .get(end_row as usize)
                .copied()
                .unwrap_or(y)
                - y;
        }

        CellRect {
            x,
            y,
            width: w,
            height: h,
            skip: false,
        }
    }

    /// X position of a column's left edge. Out-of-range columns resolve to
    /// the right edge of the canvas. Used for picture anchors.
    pub fn col_x(&self, col: u32) -> f32 {
        self.col_positions.get(col as usize).copied().unwrap_or_else(|| self.total_width())
    }

    /// Y position of a row's top edge.
    pub fn row_y(&self, row: u32) -> f32 {
        self.row_positions.get(row as usize).copied().unwrap_or_else(|| self.total_height())
    }

    pub fn total_width(&self) -> f32 {
        self.col_positions.last().copied().unwrap_or(0.0)
    }

    pub fn total_height(&self) -> f32 {
        self.row_positions.last().copied().unwrap_or(0.0)
    }
}

/// Computes [`ResolvedDimensions`] for one render call.
pub struct DimensionResolver<'a> {
    doc: &'a GridDocument,
    styles: &'a StyleTable,
    config: &'a RenderConfig,
}

impl<'a> DimensionResolver<'a> {
    pub fn new(doc: &'a GridDocument, styles: &'a StyleTable, config: &'a RenderConfig) -> Self {
        Self {
            doc,
            styles,
            config,
        }
    }

    /// Resolve pixel dimensions, expanding rows so wrapped text fits.
    ///
    /// `measure_for` binds a text measurer to a cell style (glyph metrics at
    /// the style's font size).
    pub fn resolve<M, F>(&self, measure_for: F) -> ResolvedDimensions
    where
        M: TextMeasurer,
        F: Fn(&Style) -> M,
    {
        let scale = self.config.raster_scale;
        let padding = self.config.cell_padding * scale;

        let mut col_widths: Vec<f32> = (0..self.doc.cols())
            .map(|c| self.doc.col_width(c) * scale)
            .collect();
        let mut row_heights: Vec<f32> = (0..self.doc.rows())
            .map(|r| self.doc.row_height(r) * scale)
            .collect();

        // Hidden columns contribute no width, including to wrap budgets
        for (c, w) in col_widths.iter_mut().enumerate() {
            if self.doc.is_col_hidden(u32::try_from(c).unwrap_or(u32::MAX)) {
                *w = 0.0;
            }
        }

        let merges = build_merge_map(self.doc);

        // Expansion pass: every merge region and unmerged cell whose style
        // wraps or whose value carries explicit line breaks.
        for ((row, col), cell) in self.doc.cells_row_major() {
            let style = cell
                .style
                .or_else(|| self.doc.default_style())
                .and_then(|id| self.styles.get(id))
                .cloned()
                .unwrap_or_default();

            let wraps = style.wrap_enabled() || cell.value.has_line_breaks();
            if !wraps {
                continue;
            }
            let Some(text) = format_value(&cell.value) else {
                continue;
            };

            let (row_span, col_span) = match merges.get(&(row, col)) {
                Some(info) if !info.is_origin => continue,
                Some(info) => (info.row_span, info.col_span),
                None => (1, 1),
            };

            let region_width: f32 = (col..col + col_span)
                .map(|c| col_widths.get(c as usize).copied().unwrap_or(0.0))
                .sum();
            // A fully hidden span paints nothing and must not grow rows
            if region_width <= 0.0 {
                continue;
            }
            let budget = (region_width - 2.0 * padding).max(0.0);

            let measurer = measure_for(&style);
            let line_count = wrap_text(&text, budget, &measurer).len();

            let font_size = style.font_size_or_default() * scale;
            let line_height = font_size * self.config.line_height_factor;
            #[allow(clippy::cast_precision_loss)]
            let needed = line_count as f32 * line_height + 2.0 * padding;

            expand_rows(
                &mut row_heights,
                row,
                row_span,
                needed,
                ROW_GROWTH_FLOOR * scale,
                ROW_GROWTH_CEILING * scale,
            );
        }

        let col_positions = cumulative(&col_widths);
        let row_positions = cumulative(&row_heights);

        ResolvedDimensions {
            col_positions,
            row_positions,
            col_widths,
            row_heights,
            merges,
        }
    }
}

/// Grow the rows spanned by a region so their summed height reaches
/// `needed`, distributing the shortfall proportionally. Growth per row is
/// bounded by the floor/ceiling clamps; rows are never shrunk.
fn expand_rows(
    row_heights: &mut [f32],
    start_row: u32,
    row_span: u32,
    needed: f32,
    floor: f32,
    ceiling: f32,
) {
    let range = start_row as usize..(start_row + row_span) as usize;
    let current: f32 = row_heights
        .get(range.clone())
        .map(|rows| rows.iter().sum())
        .unwrap_or(0.0);

    if needed <= current {
        return;
    }
    let shortfall = needed - current;

    let Some(rows) = row_heights.get_mut(range) else {
        return;
    };
    #[allow(clippy::cast_precision_loss)]
    let span = rows.len() as f32;
    for h in rows.iter_mut() {
        let share = if current > 0.0 {
            *h / current
        } else {
            1.0 / span
        };
        let grown = *h + shortfall * share;
        // Bound pathological growth; never shrink a declared height
        *h = grown.clamp(floor, ceiling).max(*h);
    }
}

fn build_merge_map(doc: &GridDocument) -> HashMap<(u32, u32), MergeInfo> {
    let mut merges = HashMap::new();
    for merge in doc.merges() {
        let row_span = merge.end_row.saturating_sub(merge.start_row) + 1;
        let col_span = merge.end_col.saturating_sub(merge.start_col) + 1;
        for r in merge.start_row..=merge.end_row {
            for c in merge.start_col..=merge.end_col {
                let is_origin = r == merge.start_row && c == merge.start_col;
                merges.insert(
                    (r, c),
                    MergeInfo {
                        is_origin,
                        origin_row: merge.start_row,
                        origin_col: merge.start_col,
                        row_span,
                        col_span,
                    },
                );
            }
        }
    }
    merges
}

fn cumulative(sizes: &[f32]) -> Vec<f32> {
    let mut positions = Vec::with_capacity(sizes.len() + 1);
    let mut edge = 0.0;
    for size in sizes {
        positions.push(edge);
        edge += size;
    }
    positions.push(edge);
    positions
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
    use crate::layout::MonospaceEstimate;
    use crate::types::{Cell, CellValue, MergeRange};

    fn resolve(doc: &GridDocument, styles: &StyleTable) -> ResolvedDimensions {
        let config = RenderConfig::default();
        DimensionResolver::new(doc, styles, &config)
            .resolve(|_| MonospaceEstimate { char_width: 10.0 })
    }

    #[test]
    fn basic_positions() {
        let doc = GridDocument::new(3, 2);
        let dims = resolve(&doc, &StyleTable::new());
        assert_eq!(dims.col_positions, vec![0.0, 64.0, 128.0]);
        assert_eq!(dims.row_positions, vec![0.0, 20.0, 40.0, 60.0]);
        assert_eq!(dims.total_width(), 128.0);
        assert_eq!(dims.total_height(), 60.0);
    }

    #[test]
    fn hidden_columns_contribute_nothing() {
        let mut doc = GridDocument::new(1, 3);
        doc.set_col_width(1, 100.0);
        doc.hide_col(1);
        let dims = resolve(&doc, &StyleTable::new());
        assert_eq!(dims.col_widths[1], 0.0);
        assert_eq!(dims.total_width(), 128.0);
    }

    #[test]
    fn merged_rect_spans_region() {
        let mut doc = GridDocument::new(4, 4);
        doc.add_merge(MergeRange::new(0, 0, 1, 1)).unwrap();
        let dims = resolve(&doc, &StyleTable::new());

        let origin = dims.cell_rect(0, 0);
        assert!(!origin.skip);
        assert_eq!(origin.width, 128.0);
        assert_eq!(origin.height, 40.0);

        assert!(dims.cell_rect(0, 1).skip);
        assert!(dims.cell_rect(1, 0).skip);
        assert!(dims.cell_rect(1, 1).skip);
        assert!(!dims.cell_rect(2, 2).skip);
    }

    fn wrap_style(styles: &mut StyleTable) -> crate::types::StyleId {
        styles.add(Style {
            wrap: Some(true),
            ..Style::default()
        })
    }

    #[test]
    fn short_wrapped_text_leaves_rows_alone() {
        // 2x3 region, columns 100px, rows 20px, "AAAA BBBB CCCC DDDD" at
        // 10px/char fits the 300px region in one line
        let mut styles = StyleTable::new();
        let style = wrap_style(&mut styles);
        let mut doc = GridDocument::new(2, 3);
        for c in 0..3 {
            doc.set_col_width(c, 100.0);
        }
        doc.add_merge(MergeRange::new(0, 0, 1, 2)).unwrap();
        doc.set_cell(0, 0, Cell::text("AAAA BBBB CCCC DDDD").with_style(style))
            .unwrap();

        let dims = resolve(&doc, &styles);
        assert_eq!(dims.row_heights, vec![20.0, 20.0]);
    }

    #[test]
    fn oversize_token_does_not_grow_rows() {
        // A single 40-char token is wider than the whole 300px region; it
        // stays on one unsplit line, so the region height is not corrected
        let mut styles = StyleTable::new();
        let style = wrap_style(&mut styles);
        let mut doc = GridDocument::new(2, 3);
        for c in 0..3 {
            doc.set_col_width(c, 100.0);
        }
        doc.add_merge(MergeRange::new(0, 0, 1, 2)).unwrap();
        let token = "A".repeat(40);
        doc.set_cell(0, 0, Cell::text(token).with_style(style))
            .unwrap();

        let dims = resolve(&doc, &styles);
        assert_eq!(dims.row_heights, vec![20.0, 20.0]);
    }

    #[test]
    fn wrapped_text_expands_rows_proportionally() {
        let mut styles = StyleTable::new();
        let style = wrap_style(&mut styles);
        let mut doc = GridDocument::new(2, 1);
        doc.set_col_width(0, 100.0);
        doc.set_row_height(0, 20.0);
        doc.set_row_height(1, 60.0);
        doc.add_merge(MergeRange::new(0, 0, 1, 0)).unwrap();
        // 9 lines at 13.2px + 8 padding = 126.8px needed vs 80 current
        let text = vec!["AAAAAAAA"; 9].join(" ");
        doc.set_cell(0, 0, Cell::text(text).with_style(style))
            .unwrap();

        let dims = resolve(&doc, &styles);
        let total: f32 = dims.row_heights.iter().sum();
        assert!(total > 80.0);
        // Proportional split: row 1 started 3x taller and grows 3x more,
        // subject to the per-row growth ceiling
        assert!(dims.row_heights[1] > dims.row_heights[0]);
        assert!(dims.row_heights[1] <= ROW_GROWTH_CEILING);
    }

    #[test]
    fn longer_text_never_shrinks_rows() {
        let mut styles = StyleTable::new();
        let style = wrap_style(&mut styles);

        let heights_for = |text: &str| {
            let mut doc = GridDocument::new(2, 1);
            doc.set_col_width(0, 100.0);
            doc.add_merge(MergeRange::new(0, 0, 1, 0)).unwrap();
            doc.set_cell(0, 0, Cell::text(text).with_style(style))
                .unwrap();
            resolve(&doc, &styles).row_heights
        };

        let short = heights_for("AAAA BBBB CCCC");
        let long = heights_for("AAAA BBBB CCCC DDDD EEEE FFFF GGGG HHHH");
        for (s, l) in short.iter().zip(long.iter()) {
            assert!(l >= s);
        }
    }

    #[test]
    fn explicit_line_breaks_trigger_expansion_without_wrap_flag() {
        let mut doc = GridDocument::new(1, 1);
        doc.set_col_width(0, 200.0);
        doc.set_cell(0, 0, Cell::new(CellValue::Text("a\nb\nc\nd".into()), None))
            .unwrap();
        let dims = resolve(&doc, &StyleTable::new());
        // 4 lines at 13.2px + 8 = 60.8px > default 20px row
        assert!(dims.row_heights[0] > 20.0);
    }

    #[test]
    fn growth_is_bounded_by_ceiling() {
        let mut doc = GridDocument::new(1, 1);
        doc.set_col_width(0, 60.0);
        let many_lines = vec!["word"; 60].join("\n");
        doc.set_cell(0, 0, Cell::new(CellValue::Text(many_lines), None))
            .unwrap();
        let dims = resolve(&doc, &StyleTable::new());
        assert_eq!(dims.row_heights[0], ROW_GROWTH_CEILING);
    }
}
