//! Render configuration: page geometry, margins, and raster tuning knobs.

use serde::{Deserialize, Serialize};

/// Page orientation for the composited output page.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page margins in points.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageMargins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl PageMargins {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// The same margin on all four sides.
    pub const fn uniform(m: f32) -> Self {
        Self::new(m, m, m, m)
    }
}

/// Configuration accepted by a render call.
///
/// The grid is always fit onto exactly one page: the rendered canvas is
/// downscaled (never upscaled) into the page area inside the margins, in
/// whichever orientation fits it better.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    /// Page width in points, portrait orientation (US Letter = 612).
    pub page_width: f32,
    /// Page height in points, portrait orientation (US Letter = 792).
    pub page_height: f32,
    /// Page margins in points.
    pub margins: PageMargins,
    /// Raster quality multiplier applied to column widths, row heights and
    /// font sizes before painting.
    pub raster_scale: f32,
    /// Minimum canvas width in pixels (pre-scale floor for degenerate grids).
    pub min_canvas_width: f32,
    /// Minimum canvas height in pixels.
    pub min_canvas_height: f32,
    /// Line height as a multiple of the font size.
    pub line_height_factor: f32,
    /// Inner cell padding in pixels.
    pub cell_padding: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            margins: PageMargins::default(),
            raster_scale: 1.0,
            min_canvas_width: 16.0,
            min_canvas_height: 16.0,
            line_height_factor: 1.2,
            cell_padding: 4.0,
        }
    }
}

impl RenderConfig {
    /// Page size in points for the given orientation.
    pub fn page_size(&self, orientation: Orientation) -> (f32, f32) {
        match orientation {
            Orientation::Portrait => (self.page_width, self.page_height),
            Orientation::Landscape => (self.page_height, self.page_width),
        }
    }
}
