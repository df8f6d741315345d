use serde::{Deserialize, Serialize};

/// Handle into a [`StyleTable`].
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleId(pub u32);

/// Resolved cell style.
///
/// Colors are hex strings (`#RRGGBB`); unset fields fall back to the
/// engine defaults at paint time.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    // Font
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    // Fill
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,

    // Borders (four independent sides, each Thin or None)
    #[serde(default, skip_serializing_if = "BorderLine::is_none")]
    pub border_top: BorderLine,
    #[serde(default, skip_serializing_if = "BorderLine::is_none")]
    pub border_right: BorderLine,
    #[serde(default, skip_serializing_if = "BorderLine::is_none")]
    pub border_bottom: BorderLine,
    #[serde(default, skip_serializing_if = "BorderLine::is_none")]
    pub border_left: BorderLine,

    // Alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_h: Option<HAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_v: Option<VAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
}

/// Font size in points used when a style does not set one.
pub const DEFAULT_FONT_SIZE: f32 = 11.0;

impl Style {
    /// Font size with the engine default applied.
    pub fn font_size_or_default(&self) -> f32 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// True when no side carries an explicit border.
    pub fn has_no_borders(&self) -> bool {
        self.border_top.is_none()
            && self.border_right.is_none()
            && self.border_bottom.is_none()
            && self.border_left.is_none()
    }

    pub fn wrap_enabled(&self) -> bool {
        self.wrap.unwrap_or(false)
    }

    pub fn is_bold(&self) -> bool {
        self.bold.unwrap_or(false)
    }

    pub fn is_italic(&self) -> bool {
        self.italic.unwrap_or(false)
    }
}

/// Border line style for a single cell side.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BorderLine {
    #[default]
    None,
    Thin,
}

impl BorderLine {
    pub fn is_none(&self) -> bool {
        *self == BorderLine::None
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum HAlign {
    /// Renders as Left for the value types this engine paints.
    General,
    Left,
    Center,
    Right,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// Immutable table of styles addressed by [`StyleId`] handles.
///
/// Passed by reference into every render call; there is no process-wide
/// style registry.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct StyleTable {
    styles: Vec<Style>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a style and return its handle.
    pub fn add(&mut self, style: Style) -> StyleId {
        let id = u32::try_from(self.styles.len()).unwrap_or(u32::MAX);
        self.styles.push(style);
        StyleId(id)
    }

    pub fn get(&self, id: StyleId) -> Option<&Style> {
        self.styles.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn style_table_handles() {
        let mut table = StyleTable::new();
        let a = table.add(Style {
            bold: Some(true),
            ..Style::default()
        });
        let b = table.add(Style::default());
        assert_ne!(a, b);
        assert_eq!(table.get(a).unwrap().bold, Some(true));
        assert!(table.get(StyleId(99)).is_none());
    }

    #[test]
    fn border_presence() {
        let mut style = Style::default();
        assert!(style.has_no_borders());
        style.border_left = BorderLine::Thin;
        assert!(!style.has_no_borders());
    }
}
