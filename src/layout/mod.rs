//! Layout engine: text wrapping and grid dimension resolution.
//!
//! This module handles:
//! - Wrapping cell text into lines against a pixel-width budget
//! - Resolving per-column/per-row pixel sizes, expanding rows so wrapped
//!   text fits inside merged regions
//! - Cumulative edge positions and merge-aware cell rectangles

mod dimensions;
mod text;

pub use dimensions::{CellRect, DimensionResolver, MergeInfo, ResolvedDimensions};
pub use text::{wrap_text, MonospaceEstimate, TextMeasurer};
