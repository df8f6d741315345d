//! Data types for the grid rasterizer.

mod cell;
mod document;
mod picture;
mod style;

pub use cell::*;
pub use document::*;
pub use picture::*;
pub use style::*;
