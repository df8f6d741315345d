//! Raster canvas: a thin wrapper around a tiny-skia pixmap with the fill,
//! stroke, blend and blit operations the cell and picture painters need.

use tiny_skia::{
    Color, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, PremultipliedColorU8, Rect,
    Stroke, Transform,
};

use crate::error::{GridPageError, Result};

/// An RGBA color parsed from a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    /// Faint gray used for the default cell outline.
    pub const FAINT_BORDER: Rgba = Rgba::opaque(0xD0, 0xD0, 0xD0);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 && hex.len() != 8 {
            return None;
        }
        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        let a = match hex.get(6..8) {
            Some(aa) => u8::from_str_radix(aa, 16).ok()?,
            None => 255,
        };
        Some(Self { r, g, b, a })
    }

    fn to_color(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

/// A single mutable raster buffer, exclusively owned by one render
/// invocation for its whole duration.
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Allocate a canvas. Zero or overflowing sizes are a page failure.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            GridPageError::Page(format!("cannot allocate {width}x{height} canvas"))
        })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Flood the whole canvas with one color.
    pub fn clear(&mut self, color: Rgba) {
        self.pixmap.fill(color.to_color());
    }

    /// Fill an axis-aligned rectangle.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(color.to_color());
        paint.anti_alias = false;
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Stroke a straight line segment.
    pub fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Rgba) {
        let mut pb = PathBuilder::new();
        pb.move_to(x1, y1);
        pb.line_to(x2, y2);
        let Some(path) = pb.finish() else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(color.to_color());
        paint.anti_alias = false;
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    /// Blend one pixel with the given coverage (for glyph and picture
    /// compositing).
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba, coverage: u8) {
        if coverage == 0 {
            return;
        }
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return;
        }
        let idx = (y * self.pixmap.width() + x) as usize;
        let Some(dst) = self.pixmap.pixels_mut().get_mut(idx) else {
            return;
        };

        // Source alpha = color alpha scaled by coverage; src-over in
        // premultiplied space
        let sa = u32::from(color.a) * u32::from(coverage) / 255;
        let inv = 255 - sa;
        let blend = |s: u8, d: u8| -> u8 {
            let v = (u32::from(s) * sa + u32::from(d) * inv) / 255;
            u8::try_from(v.min(255)).unwrap_or(255)
        };
        let out_r = blend(color.r, dst.red());
        let out_g = blend(color.g, dst.green());
        let out_b = blend(color.b, dst.blue());
        let out_a = {
            let v = sa + u32::from(dst.alpha()) * inv / 255;
            u8::try_from(v.min(255)).unwrap_or(255)
        };
        if let Some(px) = PremultipliedColorU8::from_rgba(
            out_r.min(out_a),
            out_g.min(out_a),
            out_b.min(out_a),
            out_a,
        ) {
            *dst = px;
        }
    }

    /// Read back one pixel as straight RGBA (test and inspection helper).
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let idx = (y.checked_mul(self.pixmap.width())? + x) as usize;
        let px = self.pixmap.pixels().get(idx)?.demultiply();
        Some(Rgba {
            r: px.red(),
            g: px.green(),
            b: px.blue(),
            a: px.alpha(),
        })
    }

    /// Draw another canvas into this one, scaled uniformly and positioned at
    /// `(tx, ty)`, with bicubic filtering.
    pub fn draw_canvas_scaled(&mut self, src: &Canvas, tx: f32, ty: f32, scale: f32) {
        let paint = PixmapPaint {
            quality: FilterQuality::Bicubic,
            ..PixmapPaint::default()
        };
        let transform = Transform::from_row(scale, 0.0, 0.0, scale, tx, ty);
        self.pixmap
            .draw_pixmap(0, 0, src.pixmap.as_ref(), &paint, transform, None);
    }

    /// Encode the canvas as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| GridPageError::Page(format!("PNG encoding failed: {e}")))
    }
}
