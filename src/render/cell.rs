//! Cell painting: background fill, border segments, laid-out text.
//!
//! Merged regions are painted exactly once, at their origin cell; the
//! caller skips every other member. Rows were already expanded by the
//! dimension pass, so anything still taller than its cell here is clipped,
//! never grown.

use std::borrow::Cow;

use crate::config::RenderConfig;
use crate::layout::{wrap_text, CellRect, TextMeasurer};
use crate::types::{BorderLine, HAlign, Style, VAlign};

use super::canvas::{Canvas, Rgba};
use super::text::FontStore;

/// Border segments that will actually be painted for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveBorders {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
    /// True when the outline is the default faint one rather than an
    /// explicit style border.
    pub faint: bool,
}

/// Default-border policy: a style carrying no explicit border on any side
/// gets a full faint outline so the printed grid stays legible; otherwise
/// exactly the styled sides are painted.
pub fn effective_borders(style: &Style) -> EffectiveBorders {
    if style.has_no_borders() {
        EffectiveBorders {
            top: true,
            right: true,
            bottom: true,
            left: true,
            faint: true,
        }
    } else {
        EffectiveBorders {
            top: style.border_top == BorderLine::Thin,
            right: style.border_right == BorderLine::Thin,
            bottom: style.border_bottom == BorderLine::Thin,
            left: style.border_left == BorderLine::Thin,
            faint: false,
        }
    }
}

/// What happened while painting one cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellPaintOutcome {
    /// Text was laid out and drawn (or would have been, sans font).
    pub painted_text: bool,
    /// Lines dropped because they fell below the cell's bottom edge.
    pub clipped_lines: u32,
    /// The single-line value overflowed and was ellipsis-truncated.
    pub truncated: bool,
    /// Glyph metrics were unavailable; the monospace estimate was used.
    pub measurement_fallback: bool,
    /// A plainer face stood in for the style's requested bold/italic face.
    pub face_substituted: bool,
}

/// Paints one (possibly merged) cell into its pixel bounds.
pub struct CellRenderer<'a> {
    fonts: &'a FontStore,
    config: &'a RenderConfig,
}

impl<'a> CellRenderer<'a> {
    pub fn new(fonts: &'a FontStore, config: &'a RenderConfig) -> Self {
        Self { fonts, config }
    }

    /// Paint fill, borders and text, in that order.
    pub fn paint(
        &self,
        canvas: &mut Canvas,
        rect: CellRect,
        style: &Style,
        text: Option<&str>,
    ) -> CellPaintOutcome {
        let mut outcome = CellPaintOutcome::default();

        if let Some(fill) = style.fill_color.as_deref().and_then(Rgba::from_hex) {
            canvas.fill_rect(rect.x, rect.y, rect.width, rect.height, fill);
        }

        self.paint_borders(canvas, rect, style);

        let Some(text) = text else {
            return outcome;
        };
        if text.is_empty() {
            return outcome;
        }

        self.paint_text(canvas, rect, style, text, &mut outcome);
        outcome
    }

    fn paint_borders(&self, canvas: &mut Canvas, rect: CellRect, style: &Style) {
        let borders = effective_borders(style);
        let color = if borders.faint {
            Rgba::FAINT_BORDER
        } else {
            Rgba::BLACK
        };
        let width = 1.0;

        let (x1, y1) = (crisp(rect.x), crisp(rect.y));
        let (x2, y2) = (crisp(rect.x + rect.width), crisp(rect.y + rect.height));

        if borders.top {
            canvas.stroke_line(x1, y1, x2, y1, width, color);
        }
        if borders.bottom {
            canvas.stroke_line(x1, y2, x2, y2, width, color);
        }
        if borders.left {
            canvas.stroke_line(x1, y1, x1, y2, width, color);
        }
        if borders.right {
            canvas.stroke_line(x2, y1, x2, y2, width, color);
        }
    }

    fn paint_text(
        &self,
        canvas: &mut Canvas,
        rect: CellRect,
        style: &Style,
        text: &str,
        outcome: &mut CellPaintOutcome,
    ) {
        let scale = self.config.raster_scale;
        let padding = self.config.cell_padding * scale;
        let font_size = style.font_size_or_default() * scale;
        let max_width = rect.width - 2.0 * padding;
        if max_width <= 0.0 {
            return;
        }

        let measurer = self.fonts.for_style(style, font_size);
        outcome.measurement_fallback = !measurer.has_font();
        outcome.face_substituted = measurer.is_substituted();

        let wraps = style.wrap_enabled() || text.contains('\n');
        let lines: Vec<String> = if wraps {
            wrap_text(text, max_width, &measurer)
        } else {
            let line = truncate_text(text, max_width, &measurer);
            // A bare-ellipsis replacement borrows too, so compare content
            outcome.truncated = line.as_ref() != text;
            vec![line.into_owned()]
        };

        let line_height = font_size * self.config.line_height_factor;
        #[allow(clippy::cast_precision_loss)]
        let total_text_height = lines.len() as f32 * line_height;
        let ascent = measurer.ascent();

        // First baseline position per vertical alignment
        let base_y = match style.align_v.unwrap_or(VAlign::Center) {
            VAlign::Top => rect.y + padding + ascent,
            VAlign::Bottom => rect.y + rect.height - padding - total_text_height + ascent,
            VAlign::Center => rect.y + (rect.height - total_text_height) / 2.0 + ascent,
        };

        let cell_bottom = rect.y + rect.height - padding;
        let align_h = style.align_h.unwrap_or(HAlign::General);
        let color = style
            .font_color
            .as_deref()
            .and_then(Rgba::from_hex)
            .unwrap_or(Rgba::BLACK);

        for (i, line) in lines.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let line_y = base_y + i as f32 * line_height;

            // Lines past the bottom edge are dropped, never expanded into
            if line_y > cell_bottom {
                outcome.clipped_lines = u32::try_from(lines.len() - i).unwrap_or(u32::MAX);
                break;
            }

            let line_width = measurer.text_width(line);
            let line_x = match align_h {
                HAlign::Center => rect.x + (rect.width - line_width) / 2.0,
                HAlign::Right => rect.x + rect.width - padding - line_width,
                HAlign::Left | HAlign::General => rect.x + padding,
            };

            measurer.draw(canvas, line, line_x, line_y, color);
        }

        outcome.painted_text = true;
    }
}

/// Truncate text with an ellipsis if it exceeds `max_width`.
pub fn truncate_text<'t>(
    text: &'t str,
    max_width: f32,
    measure: &dyn TextMeasurer,
) -> Cow<'t, str> {
    if measure.text_width(text) <= max_width {
        return Cow::Borrowed(text);
    }

    let ellipsis = "\u{2026}";
    let available = max_width - measure.text_width(ellipsis);
    if available <= 0.0 {
        return Cow::Borrowed(ellipsis);
    }

    // Binary search for the longest prefix that fits
    let chars: Vec<char> = text.chars().collect();
    let mut low = 0;
    let mut high = chars.len();
    while low < high {
        let mid = (low + high).div_ceil(2);
        let prefix: String = chars.iter().take(mid).collect();
        if measure.text_width(&prefix) <= available {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    let mut truncated: String = chars.iter().take(low).collect();
    truncated.push_str(ellipsis);
    Cow::Owned(truncated)
}

/// Snap a coordinate to the pixel center so 1px strokes stay crisp.
fn crisp(v: f32) -> f32 {
    v.floor() + 0.5
}
