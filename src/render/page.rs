//! Page compositing: scales and centers the finished grid canvas onto a
//! single fixed-size physical page.
//!
//! The transform is downscale-only. The whole source canvas is always
//! fully visible on the one output page; resolution is traded for
//! completeness, never clipped.

use crate::config::{Orientation, RenderConfig};
use crate::error::Result;

use super::canvas::{Canvas, Rgba};

/// The geometry chosen for the final page.
#[derive(Debug, Clone, Copy)]
pub struct PageFit {
    pub orientation: Orientation,
    /// Uniform scale applied to the source canvas (capped at 1.0).
    pub scale: f32,
    /// Source canvas placement on the page.
    pub offset_x: f32,
    pub offset_y: f32,
    /// Page size in device pixels.
    pub page_width: u32,
    pub page_height: u32,
}

/// Fits a rendered canvas onto one physical page.
pub struct PageCompositor<'a> {
    config: &'a RenderConfig,
}

impl<'a> PageCompositor<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    /// Pick the orientation with the larger effective scale and compute the
    /// placement of a `src_width` x `src_height` canvas on the page.
    pub fn plan(&self, src_width: f32, src_height: f32) -> PageFit {
        let portrait = self.fit_for(Orientation::Portrait, src_width, src_height);
        let landscape = self.fit_for(Orientation::Landscape, src_width, src_height);
        // Closer-fitting orientation wins; ties keep portrait
        if landscape.scale > portrait.scale {
            landscape
        } else {
            portrait
        }
    }

    fn fit_for(&self, orientation: Orientation, src_width: f32, src_height: f32) -> PageFit {
        let raster = self.config.raster_scale;
        let (page_w_pt, page_h_pt) = self.config.page_size(orientation);
        let page_w = page_w_pt * raster;
        let page_h = page_h_pt * raster;

        let margins = self.config.margins;
        let avail_w = (page_w - (margins.left + margins.right) * raster).max(1.0);
        let avail_h = (page_h - (margins.top + margins.bottom) * raster).max(1.0);

        // Never upscale: small grids keep their native resolution
        let scale = (avail_w / src_width.max(1.0))
            .min(avail_h / src_height.max(1.0))
            .min(1.0);

        let offset_x = margins.left * raster + (avail_w - src_width * scale) / 2.0;
        let offset_y = margins.top * raster + (avail_h - src_height * scale) / 2.0;

        PageFit {
            orientation,
            scale,
            offset_x,
            offset_y,
            page_width: dimension_px(page_w),
            page_height: dimension_px(page_h),
        }
    }

    /// Compose the source canvas onto a fresh white page.
    ///
    /// Page allocation failure is the only fatal error in the pipeline.
    pub fn compose(&self, src: &Canvas) -> Result<(Canvas, PageFit)> {
        #[allow(clippy::cast_precision_loss)]
        let fit = self.plan(src.width() as f32, src.height() as f32);

        let mut page = Canvas::new(fit.page_width, fit.page_height)?;
        page.clear(Rgba::WHITE);
        page.draw_canvas_scaled(src, fit.offset_x, fit.offset_y, fit.scale);
        Ok((page, fit))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn dimension_px(v: f32) -> u32 {
    v.round().clamp(1.0, 65_536.0) as u32
}
