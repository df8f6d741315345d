//! gridpage - grid-document rasterization onto a single page
//!
//! Renders a styled grid (rows/columns, merged regions, per-cell values and
//! styles, embedded pictures) to one raster image and fits that image onto a
//! single fixed-size physical page:
//! - Word wrap with explicit line breaks and multi-line alignment
//! - Row expansion so wrapped text fits inside merged regions
//! - Merge-aware border/fill painting (each region painted exactly once)
//! - Picture anchoring in grid coordinates (fixed-scale or stretch-to-box)
//! - Downscale-only, centered fit onto a portrait or landscape page
//!
//! # Usage
//!
//! ```rust
//! use gridpage::{
//!     render_page, Cell, FontStore, GridDocument, MergeRange, RenderConfig, Style, StyleTable,
//! };
//!
//! let mut styles = StyleTable::new();
//! let header = styles.add(Style {
//!     bold: Some(true),
//!     wrap: Some(true),
//!     ..Style::default()
//! });
//!
//! let mut doc = GridDocument::new(2, 2);
//! doc.add_merge(MergeRange::new(0, 0, 0, 1))?;
//! doc.set_cell(0, 0, Cell::text("Quarterly results").with_style(header))?;
//! doc.set_cell(1, 0, Cell::number(1234.0))?;
//!
//! let output = render_page(&doc, &styles, &FontStore::empty(), &RenderConfig::default())?;
//! assert!(!output.png.is_empty());
//! # Ok::<(), gridpage::GridPageError>(())
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod layout;
pub mod render;
pub mod types;

pub use config::{Orientation, PageMargins, RenderConfig};
pub use error::{GridPageError, Result};
pub use render::{render_canvas, render_page, FontStore, RenderOutput, RenderReport};
pub use types::*;

/// Get the library version.
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
