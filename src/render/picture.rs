//! Picture compositing: maps a picture's grid-relative anchor to an
//! absolute pixel rectangle and draws the decoded image into it with
//! bicubic resampling.
//!
//! A picture whose bytes cannot be decoded is skipped; rendering proceeds.

use image::imageops::FilterType;

use crate::error::{GridPageError, Result};
use crate::layout::ResolvedDimensions;
use crate::types::{AnchorPoint, Picture, PictureAnchor};

use super::canvas::{Canvas, Rgba};

/// The pixel rectangle a picture resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PictureRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Draws embedded pictures once the grid has been painted.
pub struct PictureCompositor<'a> {
    dims: &'a ResolvedDimensions,
    /// Raster scale applied to anchor pixel offsets and fixed-scale sizes.
    scale: f32,
}

impl<'a> PictureCompositor<'a> {
    pub fn new(dims: &'a ResolvedDimensions, scale: f32) -> Self {
        Self { dims, scale }
    }

    fn point(&self, p: AnchorPoint) -> (f32, f32) {
        (
            self.dims.col_x(p.col) + p.dx * self.scale,
            self.dims.row_y(p.row) + p.dy * self.scale,
        )
    }

    /// Resolve the absolute pixel rectangle for an anchor, given the
    /// decoded image's native size.
    pub fn resolve_rect(
        &self,
        anchor: &PictureAnchor,
        native_width: u32,
        native_height: u32,
    ) -> PictureRect {
        match *anchor {
            PictureAnchor::FixedScale { from, scale } => {
                let (x, y) = self.point(from);
                #[allow(clippy::cast_precision_loss)]
                let (w, h) = (native_width as f32, native_height as f32);
                PictureRect {
                    x,
                    y,
                    width: w * scale * self.scale,
                    height: h * scale * self.scale,
                }
            }
            PictureAnchor::StretchToBox { from, to } => {
                let (x1, y1) = self.point(from);
                let (x2, y2) = self.point(to);
                PictureRect {
                    x: x1,
                    y: y1,
                    width: (x2 - x1).max(0.0),
                    height: (y2 - y1).max(0.0),
                }
            }
        }
    }

    /// Decode and draw one picture. Decode failures come back as
    /// `GridPageError::Image` for the caller to record; they never abort
    /// the page.
    pub fn draw(&self, canvas: &mut Canvas, picture: &Picture) -> Result<PictureRect> {
        let decoded = image::load_from_memory(&picture.data)
            .map_err(|e| GridPageError::Image(e.to_string()))?;

        let rect = self.resolve_rect(&picture.anchor, decoded.width(), decoded.height());
        let target_w = dimension_px(rect.width);
        let target_h = dimension_px(rect.height);
        if target_w == 0 || target_h == 0 {
            return Ok(rect);
        }

        let resized =
            image::imageops::resize(&decoded.to_rgba8(), target_w, target_h, FilterType::CatmullRom);

        #[allow(clippy::cast_possible_truncation)]
        let (x0, y0) = (rect.x.round() as i32, rect.y.round() as i32);
        for (px, py, pixel) in resized.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            if a == 0 {
                continue;
            }
            let Ok(dx) = i32::try_from(px) else { continue };
            let Ok(dy) = i32::try_from(py) else { continue };
            canvas.blend_pixel(
                x0.saturating_add(dx),
                y0.saturating_add(dy),
                Rgba { r, g, b, a },
                255,
            );
        }

        Ok(rect)
    }
}

/// Convert a resolved span to a resample size in whole pixels.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn dimension_px(v: f32) -> u32 {
    if !v.is_finite() || v <= 0.5 {
        return 0;
    }
    v.round().min(16_384.0) as u32
}
