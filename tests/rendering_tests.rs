//! Rendering pipeline tests for gridpage
//!
//! Tests for deterministic canvas sizing, the single-paint rule for merged
//! regions, ellipsis truncation, default borders, and the end-to-end
//! render_page surface.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation
)]

use gridpage::render::{render_canvas, Rgba};
use gridpage::{
    render_page, Cell, CellValue, FontStore, GridDocument, MergeRange, RenderConfig, Style,
    StyleTable,
};

fn render_defaults(
    doc: &GridDocument,
    styles: &StyleTable,
) -> (gridpage::render::Canvas, gridpage::RenderReport) {
    render_canvas(doc, styles, &FontStore::empty(), &RenderConfig::default()).unwrap()
}

#[test]
fn canvas_size_is_the_sum_of_resolved_dimensions() {
    let mut doc = GridDocument::new(3, 2);
    doc.set_col_width(0, 80.0);
    doc.set_col_width(1, 120.0);
    doc.set_row_height(0, 20.0);
    doc.set_row_height(1, 30.0);
    doc.set_row_height(2, 50.0);
    doc.set_cell(0, 0, Cell::text("a")).unwrap();

    let (canvas, report) = render_defaults(&doc, &StyleTable::new());
    assert_eq!(canvas.width(), 200);
    assert_eq!(canvas.height(), 100);
    assert_eq!(report.canvas_width, 200);
    assert_eq!(report.canvas_height, 100);
}

#[test]
fn same_input_same_output_size() {
    let mut doc = GridDocument::new(4, 4);
    doc.set_cell(2, 3, Cell::number(7.0)).unwrap();
    let (first, _) = render_defaults(&doc, &StyleTable::new());
    let (second, _) = render_defaults(&doc, &StyleTable::new());
    assert_eq!(first.width(), second.width());
    assert_eq!(first.height(), second.height());
}

#[test]
fn minimum_canvas_floors_apply_to_degenerate_grids() {
    let mut doc = GridDocument::new(1, 1);
    doc.set_col_width(0, 1.0);
    doc.set_row_height(0, 1.0);
    let (canvas, _) = render_defaults(&doc, &StyleTable::new());
    let config = RenderConfig::default();
    assert_eq!(canvas.width(), config.min_canvas_width.ceil() as u32);
    assert_eq!(canvas.height(), config.min_canvas_height.ceil() as u32);
}

#[test]
fn merged_region_paints_exactly_once() {
    let mut doc = GridDocument::new(3, 3);
    doc.add_merge(MergeRange::new(0, 0, 1, 1)).unwrap();
    doc.set_cell(0, 0, Cell::text("origin")).unwrap();
    // Subordinate members carry values too; they must not paint
    doc.set_cell(0, 1, Cell::text("hidden")).unwrap();
    doc.set_cell(1, 1, Cell::text("hidden")).unwrap();
    doc.set_cell(2, 2, Cell::text("outside")).unwrap();

    let (_, report) = render_defaults(&doc, &StyleTable::new());

    let in_region: Vec<_> = report
        .cells
        .iter()
        .filter(|c| c.row <= 1 && c.col <= 1)
        .collect();
    assert_eq!(in_region.len(), 1);
    assert_eq!((in_region[0].row, in_region[0].col), (0, 0));
    // The cell outside the region still paints
    assert!(report.cells.iter().any(|c| (c.row, c.col) == (2, 2)));
}

#[test]
fn fill_color_covers_the_whole_merged_rect() {
    let mut styles = StyleTable::new();
    let filled = styles.add(Style {
        fill_color: Some("#FF0000".into()),
        ..Style::default()
    });
    let mut doc = GridDocument::new(2, 2);
    doc.add_merge(MergeRange::new(0, 0, 1, 1)).unwrap();
    doc.set_cell(0, 0, Cell::text("x").with_style(filled)).unwrap();

    let (canvas, _) = render_defaults(&doc, &styles);
    // Sample deep inside the subordinate quadrant of the merge
    assert_eq!(canvas.pixel(100, 30), Some(Rgba::opaque(255, 0, 0)));
}

#[test]
fn default_faint_outline_is_painted_for_borderless_cells() {
    let mut doc = GridDocument::new(1, 1);
    doc.set_col_width(0, 40.0);
    doc.set_row_height(0, 40.0);
    doc.set_cell(0, 0, Cell::text("")).unwrap();

    let (canvas, _) = render_defaults(&doc, &StyleTable::new());
    // Mid-edge samples land on the faint outline
    assert_eq!(canvas.pixel(20, 0), Some(Rgba::FAINT_BORDER));
    assert_eq!(canvas.pixel(0, 20), Some(Rgba::FAINT_BORDER));
    // Interior stays white
    assert_eq!(canvas.pixel(20, 20), Some(Rgba::WHITE));
}

#[test]
fn overflowing_single_line_is_truncated() {
    let mut doc = GridDocument::new(1, 1);
    doc.set_col_width(0, 40.0);
    doc.set_cell(0, 0, Cell::text("a very long value that cannot fit"))
        .unwrap();

    let (_, report) = render_defaults(&doc, &StyleTable::new());
    assert_eq!(report.cells.len(), 1);
    assert!(report.cells[0].truncated);
    assert!(!report.is_clean());
}

#[test]
fn bare_ellipsis_replacement_counts_as_truncated() {
    let mut doc = GridDocument::new(1, 1);
    // Budget too small for even the ellipsis: the value is fully replaced
    doc.set_col_width(0, 9.0);
    doc.set_cell(0, 0, Cell::text("abc")).unwrap();

    let (_, report) = render_defaults(&doc, &StyleTable::new());
    assert!(report.cells[0].truncated);
}

#[test]
fn bold_style_without_any_font_reports_fallback_not_substitution() {
    let mut styles = StyleTable::new();
    let bold = styles.add(Style {
        bold: Some(true),
        ..Style::default()
    });
    let mut doc = GridDocument::new(1, 1);
    doc.set_cell(0, 0, Cell::text("x").with_style(bold)).unwrap();

    let (_, report) = render_defaults(&doc, &styles);
    assert!(report.cells[0].measurement_fallback);
    // Substitution notes only appear when a plainer loaded face stood in
    assert!(report.cells[0].note.is_none());
}

#[test]
fn wrapped_text_clips_instead_of_expanding_when_capped() {
    let mut doc = GridDocument::new(1, 1);
    doc.set_col_width(0, 60.0);
    // Far more lines than the growth ceiling allows
    let text = vec!["word"; 60].join("\n");
    doc.set_cell(0, 0, Cell::new(CellValue::Text(text), None))
        .unwrap();

    let (_, report) = render_defaults(&doc, &StyleTable::new());
    assert!(report.cells[0].clipped_lines > 0);
}

#[test]
fn measurement_fallback_is_reported_without_a_font() {
    let mut doc = GridDocument::new(1, 1);
    doc.set_cell(0, 0, Cell::text("text")).unwrap();
    let (_, report) = render_defaults(&doc, &StyleTable::new());
    assert!(report.cells[0].measurement_fallback);
}

#[test]
fn render_page_returns_png_bytes() {
    let mut styles = StyleTable::new();
    let header = styles.add(Style {
        bold: Some(true),
        fill_color: Some("#EEEEEE".into()),
        ..Style::default()
    });
    let mut doc = GridDocument::new(3, 3);
    doc.add_merge(MergeRange::new(0, 0, 0, 2)).unwrap();
    doc.set_cell(0, 0, Cell::text("Title").with_style(header))
        .unwrap();
    doc.set_cell(1, 0, Cell::number(3.5)).unwrap();
    doc.set_cell(2, 2, Cell::new(CellValue::Boolean(true), None))
        .unwrap();

    let output = render_page(&doc, &styles, &FontStore::empty(), &RenderConfig::default())
        .unwrap();
    assert_eq!(&output.png[..4], &[0x89, b'P', b'N', b'G']);
    assert!(output.report.page_width > 0);
    assert!(output.report.page_scale > 0.0);
}

#[test]
fn empty_document_still_produces_a_page() {
    let doc = GridDocument::new(5, 5);
    let output = render_page(
        &doc,
        &StyleTable::new(),
        &FontStore::empty(),
        &RenderConfig::default(),
    )
    .unwrap();
    assert!(!output.png.is_empty());
    assert!(output.report.cells.is_empty());
    assert!(output.report.is_clean());
}

#[test]
fn report_serializes_to_json() {
    let mut doc = GridDocument::new(1, 1);
    doc.set_cell(0, 0, Cell::text("x")).unwrap();
    let (_, report) = render_defaults(&doc, &StyleTable::new());
    let json = report.to_json().unwrap();
    assert!(json.contains("\"cells\""));
}
