//! Structured error types for gridpage.
//!
//! Per-cell and per-picture failures are recovered and surfaced through the
//! render report; only page-level failures propagate out of `render_page`.

/// All errors that can occur while rasterizing a grid document.
#[derive(Debug, thiserror::Error)]
pub enum GridPageError {
    /// The destination page or canvas could not be allocated or encoded.
    /// This is the only failure class `render_page` returns to the caller.
    #[error("Page error: {0}")]
    Page(String),

    /// Invalid document structure (out-of-bounds index, overlapping merges).
    #[error("Document error: {0}")]
    Document(String),

    /// Font data could not be loaded.
    #[error("Font error: {0}")]
    Font(String),

    /// Picture bytes could not be decoded. Recovered per-picture during a
    /// render; surfaced directly only from explicit decode calls.
    #[error("Image decode error: {0}")]
    Image(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridPageError>;

impl From<String> for GridPageError {
    fn from(s: String) -> Self {
        Self::Page(s)
    }
}
