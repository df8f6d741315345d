use serde::{Deserialize, Serialize};

/// A grid position plus a sub-cell pixel offset.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnchorPoint {
    pub row: u32,
    pub col: u32,
    /// Horizontal offset in pixels from the cell's left edge.
    pub dx: f32,
    /// Vertical offset in pixels from the cell's top edge.
    pub dy: f32,
}

impl AnchorPoint {
    pub fn new(row: u32, col: u32, dx: f32, dy: f32) -> Self {
        Self { row, col, dx, dy }
    }
}

/// How a picture is placed relative to the grid.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum PictureAnchor {
    /// Position fixed at the anchor point; size is the image's native pixel
    /// size times `scale`. Aspect ratio is always preserved.
    FixedScale { from: AnchorPoint, scale: f32 },
    /// Both corners fixed; the image is stretched directly into the
    /// resulting rectangle. Callers wanting letterboxing precompute the
    /// offsets themselves.
    StretchToBox { from: AnchorPoint, to: AnchorPoint },
}

/// A picture embedded in the grid document.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Picture {
    /// Encoded source bytes (PNG, JPEG, GIF, BMP).
    #[serde(with = "serde_bytes_vec")]
    pub data: Vec<u8>,
    pub anchor: PictureAnchor,
}

impl Picture {
    pub fn new(data: Vec<u8>, anchor: PictureAnchor) -> Self {
        Self { data, anchor }
    }
}

/// Serialize picture bytes as a plain byte array.
mod serde_bytes_vec {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(data)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        Vec::<u8>::deserialize(deserializer)
    }
}
