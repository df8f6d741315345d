//! Glyph measurement and painting.
//!
//! A [`FontStore`] holds up to four faces (regular, bold, italic,
//! bold-italic) per family. [`FontStore::for_style`] binds the face a style
//! asks for; a missing face degrades toward regular, and when no face is
//! available at all measurement falls back to a monospace-like estimate so
//! layout still succeeds. Neither substitution is fatal.

use std::collections::HashMap;

use fontdue::{Font, FontSettings};

use crate::error::{GridPageError, Result};
use crate::layout::TextMeasurer;
use crate::types::Style;

use super::canvas::{Canvas, Rgba};

/// Fallback advance as a fraction of the font size, per character.
const FALLBACK_ADVANCE_FACTOR: f32 = 0.6;

/// Face slot within a family: 0 regular, 1 bold, 2 italic, 3 bold-italic.
fn slot(bold: bool, italic: bool) -> usize {
    usize::from(bold) | (usize::from(italic) << 1)
}

/// Preference order for a requested face: the exact slot first, then
/// progressively plainer faces, ending at regular.
fn pick_slot(bold: bool, italic: bool, loaded: [bool; 4]) -> Option<usize> {
    let order: &[usize] = match (bold, italic) {
        (true, true) => &[3, 1, 2, 0],
        (true, false) => &[1, 0],
        (false, true) => &[2, 0],
        (false, false) => &[0],
    };
    order
        .iter()
        .copied()
        .find(|&i| loaded.get(i).copied().unwrap_or(false))
}

#[derive(Default)]
struct FaceSet {
    faces: [Option<Font>; 4],
}

impl FaceSet {
    fn loaded(&self) -> [bool; 4] {
        let mut out = [false; 4];
        for (flag, face) in out.iter_mut().zip(self.faces.iter()) {
            *flag = face.is_some();
        }
        out
    }

    fn pick(&self, bold: bool, italic: bool) -> Option<&Font> {
        let i = pick_slot(bold, italic, self.loaded())?;
        self.faces.get(i).and_then(Option::as_ref)
    }

    fn exact(&self, bold: bool, italic: bool) -> bool {
        self.faces
            .get(slot(bold, italic))
            .and_then(Option::as_ref)
            .is_some()
    }

    fn any(&self) -> bool {
        self.faces.iter().any(Option::is_some)
    }

    fn set(&mut self, bold: bool, italic: bool, font: Font) {
        if let Some(face) = self.faces.get_mut(slot(bold, italic)) {
            *face = Some(font);
        }
    }
}

/// Holds the fonts used for cell text.
///
/// One store serves a whole render call; it is never mutated during
/// rendering. A style naming an unknown family uses the default family.
#[derive(Default)]
pub struct FontStore {
    default_family: FaceSet,
    families: HashMap<String, FaceSet>,
}

impl FontStore {
    /// A store with no fonts: measurement estimates, painting draws nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the default regular face from raw TTF/OTF bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut store = Self::default();
        store.add_face(None, false, false, data)?;
        Ok(store)
    }

    /// Load one face. `family: None` targets the default family, which also
    /// serves styles naming no family or an unregistered one.
    pub fn add_face(
        &mut self,
        family: Option<&str>,
        bold: bool,
        italic: bool,
        data: &[u8],
    ) -> Result<()> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| GridPageError::Font(e.to_string()))?;
        let set = match family {
            Some(name) => self.families.entry(name.to_string()).or_default(),
            None => &mut self.default_family,
        };
        set.set(bold, italic, font);
        Ok(())
    }

    pub fn has_font(&self) -> bool {
        self.default_family.any() || self.families.values().any(FaceSet::any)
    }

    fn face_set(&self, family: Option<&str>) -> &FaceSet {
        family
            .and_then(|name| self.families.get(name))
            .unwrap_or(&self.default_family)
    }

    /// Measure with the default regular face (or the estimate).
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        self.sized(size).text_width(text)
    }

    /// Bind the default regular face at `size`.
    pub fn sized(&self, size: f32) -> SizedFont<'_> {
        SizedFont {
            font: self.default_family.pick(false, false),
            size,
            exact: true,
        }
    }

    /// Bind the face a style asks for, at `size`.
    ///
    /// A missing bold/italic face degrades toward regular;
    /// [`SizedFont::is_substituted`] reports when that happened.
    pub fn for_style(&self, style: &Style, size: f32) -> SizedFont<'_> {
        let set = self.face_set(style.font_family.as_deref());
        let (bold, italic) = (style.is_bold(), style.is_italic());
        SizedFont {
            font: set.pick(bold, italic),
            size,
            exact: set.exact(bold, italic),
        }
    }
}

/// A font store bound to one face and one size.
pub struct SizedFont<'a> {
    font: Option<&'a Font>,
    size: f32,
    exact: bool,
}

impl SizedFont<'_> {
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// True when a plainer face stood in for the style's requested one.
    pub fn is_substituted(&self) -> bool {
        self.font.is_some() && !self.exact
    }

    /// Distance from the top of a line box to the text baseline.
    pub fn ascent(&self) -> f32 {
        self.font
            .and_then(|f| f.horizontal_line_metrics(self.size))
            .map_or(self.size * 0.8, |m| m.ascent)
    }

    /// Paint one line of text with its baseline at `(x, baseline_y)`.
    ///
    /// Without a bound face nothing is painted; the caller records the
    /// measurement-fallback diagnostic.
    pub fn draw(&self, canvas: &mut Canvas, text: &str, x: f32, baseline_y: f32, color: Rgba) {
        let Some(font) = self.font else {
            return;
        };

        let mut pen_x = x;
        for c in text.chars() {
            let (metrics, bitmap) = font.rasterize(c, self.size);
            let gx = pen_x + metrics.xmin as f32;
            #[allow(clippy::cast_precision_loss)]
            let gy = baseline_y - (metrics.height as f32 + metrics.ymin as f32);
            for (i, &alpha) in bitmap.iter().enumerate() {
                if alpha == 0 || metrics.width == 0 {
                    continue;
                }
                let px = i % metrics.width;
                let py = i / metrics.width;
                #[allow(clippy::cast_possible_truncation)]
                let (ox, oy) = (
                    (gx + px as f32).round() as i32,
                    (gy + py as f32).round() as i32,
                );
                canvas.blend_pixel(ox, oy, color, alpha);
            }
            pen_x += metrics.advance_width;
        }
    }
}

impl TextMeasurer for SizedFont<'_> {
    fn text_width(&self, text: &str) -> f32 {
        match self.font {
            Some(font) => text
                .chars()
                .map(|c| font.metrics(c, self.size).advance_width)
                .sum(),
            None => {
                let count = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
                #[allow(clippy::cast_precision_loss)]
                let count = count as f32;
                count * self.size * FALLBACK_ADVANCE_FACTOR
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_estimates_widths() {
        let store = FontStore::empty();
        assert!(!store.has_font());
        // 4 chars at 10px with the 0.6 factor
        assert_eq!(store.text_width("abcd", 10.0), 24.0);
        assert_eq!(store.text_width("", 10.0), 0.0);
    }

    #[test]
    fn empty_store_paints_nothing() {
        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.clear(Rgba::WHITE);
        let store = FontStore::empty();
        store.sized(8.0).draw(&mut canvas, "x", 0.0, 6.0, Rgba::BLACK);
        for x in 0..8 {
            for y in 0..8 {
                assert_eq!(canvas.pixel(x, y), Some(Rgba::WHITE));
            }
        }
    }

    #[test]
    fn garbage_font_bytes_are_rejected() {
        assert!(FontStore::from_bytes(&[0, 1, 2, 3]).is_err());
        let mut store = FontStore::empty();
        assert!(store
            .add_face(Some("Sans"), true, false, &[0, 1, 2, 3])
            .is_err());
        assert!(!store.has_font());
    }

    #[test]
    fn face_selection_degrades_toward_regular() {
        let only_regular = [true, false, false, false];
        assert_eq!(pick_slot(true, false, only_regular), Some(0));
        assert_eq!(pick_slot(false, true, only_regular), Some(0));
        assert_eq!(pick_slot(true, true, only_regular), Some(0));

        // Bold loaded: bold-italic prefers bold over regular
        let with_bold = [true, true, false, false];
        assert_eq!(pick_slot(true, true, with_bold), Some(1));
        assert_eq!(pick_slot(true, false, with_bold), Some(1));
        assert_eq!(pick_slot(false, true, with_bold), Some(0));

        assert_eq!(pick_slot(false, false, [false; 4]), None);
    }

    #[test]
    fn face_slots_are_distinct() {
        assert_eq!(slot(false, false), 0);
        assert_eq!(slot(true, false), 1);
        assert_eq!(slot(false, true), 2);
        assert_eq!(slot(true, true), 3);
    }

    #[test]
    fn empty_store_binding_is_not_a_substitution() {
        let store = FontStore::empty();
        let bound = store.for_style(
            &Style {
                bold: Some(true),
                ..Style::default()
            },
            10.0,
        );
        assert!(!bound.has_font());
        assert!(!bound.is_substituted());
    }

    #[test]
    fn sized_binding_measures_like_the_store() {
        let store = FontStore::empty();
        let sized = store.sized(12.0);
        assert_eq!(
            TextMeasurer::text_width(&sized, "ab"),
            store.text_width("ab", 12.0)
        );
    }
}
