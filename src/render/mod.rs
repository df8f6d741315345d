//! Rendering pipeline.
//!
//! Fixed order, single-threaded, no state across calls:
//! dimension resolution → cell painting (row-major, merged regions painted
//! once at their origin) → picture compositing → page compositing.
//! Per-cell and per-picture failures are recorded in the render report and
//! never abort the page; only page allocation/encoding failures propagate.

pub mod canvas;
pub mod cell;
pub mod page;
pub mod picture;
pub mod report;
pub mod text;

pub use canvas::{Canvas, Rgba};
pub use cell::{effective_borders, CellRenderer, EffectiveBorders};
pub use page::{PageCompositor, PageFit};
pub use picture::{PictureCompositor, PictureRect};
pub use report::{CellDiagnostic, PictureDiagnostic, RenderReport};
pub use text::{FontStore, SizedFont};

use crate::config::RenderConfig;
use crate::error::Result;
use crate::format::format_value;
use crate::layout::{DimensionResolver, ResolvedDimensions};
use crate::types::{GridDocument, StyleTable};

/// The finished page plus everything observed while producing it.
pub struct RenderOutput {
    /// Single-page PNG bytes.
    pub png: Vec<u8>,
    pub report: RenderReport,
}

/// Render a grid document onto one physical page.
///
/// This is the crate's main entry point. The document, style table and
/// font store are read-only for the duration of the call; the pipeline
/// holds no state afterwards.
///
/// # Errors
/// Only page-level failures (canvas/page allocation, PNG encoding) are
/// returned; everything else is recovered and reported.
pub fn render_page(
    doc: &GridDocument,
    styles: &StyleTable,
    fonts: &FontStore,
    config: &RenderConfig,
) -> Result<RenderOutput> {
    let (canvas, mut report) = render_canvas(doc, styles, fonts, config)?;

    let (page, fit) = PageCompositor::new(config).compose(&canvas)?;
    report.page_width = fit.page_width;
    report.page_height = fit.page_height;
    report.orientation = fit.orientation;
    report.page_scale = fit.scale;
    log::debug!(
        "page {}x{} ({:?}), canvas scaled by {:.3}",
        fit.page_width,
        fit.page_height,
        fit.orientation,
        fit.scale
    );

    let png = page.encode_png()?;
    Ok(RenderOutput { png, report })
}

/// Render the grid to its raster canvas without page fitting.
///
/// Exposed for callers (and tests) that need the pre-page canvas; the
/// report's page fields are left zeroed.
pub fn render_canvas(
    doc: &GridDocument,
    styles: &StyleTable,
    fonts: &FontStore,
    config: &RenderConfig,
) -> Result<(Canvas, RenderReport)> {
    let resolver = DimensionResolver::new(doc, styles, config);
    let dims = resolver.resolve(|style| {
        let size = style.font_size_or_default() * config.raster_scale;
        fonts.for_style(style, size)
    });

    let canvas_w = dims.total_width().max(config.min_canvas_width);
    let canvas_h = dims.total_height().max(config.min_canvas_height);
    let mut canvas = Canvas::new(span_px(canvas_w), span_px(canvas_h))?;
    canvas.clear(Rgba::WHITE);

    let mut report = RenderReport {
        canvas_width: canvas.width(),
        canvas_height: canvas.height(),
        ..RenderReport::default()
    };

    paint_cells(doc, styles, fonts, config, &dims, &mut canvas, &mut report);
    paint_pictures(doc, config, &dims, &mut canvas, &mut report);

    Ok((canvas, report))
}

fn paint_cells(
    doc: &GridDocument,
    styles: &StyleTable,
    fonts: &FontStore,
    config: &RenderConfig,
    dims: &ResolvedDimensions,
    canvas: &mut Canvas,
    report: &mut RenderReport,
) {
    let renderer = CellRenderer::new(fonts, config);

    for ((row, col), cell) in doc.cells_row_major() {
        let rect = dims.cell_rect(row, col);
        // Non-origin members of a merged region paint nothing of their own
        if rect.skip {
            continue;
        }
        if rect.width <= 0.0 || rect.height <= 0.0 {
            continue;
        }

        let style = cell
            .style
            .or_else(|| doc.default_style())
            .and_then(|id| styles.get(id))
            .cloned()
            .unwrap_or_default();
        let text = format_value(&cell.value);

        let outcome = renderer.paint(canvas, rect, &style, text.as_deref());
        if outcome.measurement_fallback {
            log::warn!("({row},{col}): no glyph metrics, using monospace estimate");
        }
        if outcome.clipped_lines > 0 {
            log::warn!("({row},{col}): {} line(s) clipped", outcome.clipped_lines);
        }
        if outcome.face_substituted {
            log::debug!("({row},{col}): requested font face not loaded, substituted");
        }
        report.cells.push(CellDiagnostic {
            row,
            col,
            ok: true,
            clipped_lines: outcome.clipped_lines,
            truncated: outcome.truncated,
            measurement_fallback: outcome.measurement_fallback,
            note: outcome
                .face_substituted
                .then(|| "font face substituted".to_string()),
        });
    }
}

fn paint_pictures(
    doc: &GridDocument,
    config: &RenderConfig,
    dims: &ResolvedDimensions,
    canvas: &mut Canvas,
    report: &mut RenderReport,
) {
    let compositor = PictureCompositor::new(dims, config.raster_scale);

    for (index, picture) in doc.pictures().iter().enumerate() {
        match compositor.draw(canvas, picture) {
            Ok(_) => report.pictures.push(PictureDiagnostic {
                index,
                ok: true,
                note: None,
            }),
            Err(e) => {
                // Skipped picture, page still completes
                log::warn!("picture {index} skipped: {e}");
                report.pictures.push(PictureDiagnostic {
                    index,
                    ok: false,
                    note: Some(e.to_string()),
                });
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn span_px(v: f32) -> u32 {
    v.ceil().clamp(1.0, 65_536.0) as u32
}
