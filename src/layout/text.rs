//! Text layout: wraps a string into lines given a pixel-width budget and a
//! glyph-measurement function.
//!
//! The wrap is recomputed on every call; there is no caching here. Output
//! depends only on the input string, the budget, and the measurer.

/// Measures the pixel width of a piece of text at a fixed font binding.
pub trait TextMeasurer {
    fn text_width(&self, text: &str) -> f32;
}

impl<F: Fn(&str) -> f32> TextMeasurer for F {
    fn text_width(&self, text: &str) -> f32 {
        self(text)
    }
}

/// Fixed per-character width estimate.
///
/// Used as the measurement fallback when glyph metrics are unavailable, and
/// by tests that need deterministic widths.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceEstimate {
    pub char_width: f32,
}

impl TextMeasurer for MonospaceEstimate {
    fn text_width(&self, text: &str) -> f32 {
        let count = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        #[allow(clippy::cast_precision_loss)]
        let count = count as f32;
        count * self.char_width
    }
}

/// Wrap text into lines that fit within `max_width`.
///
/// Explicit line breaks split the input into paragraphs first; an empty
/// paragraph yields exactly one blank output line, preserving intentional
/// vertical spacing. Within a paragraph, words are accumulated greedily and
/// committed lines are trimmed of incidental surrounding whitespace.
///
/// A single word wider than the entire budget is emitted alone on its own
/// line, unsplit. This keeps the information visible and is intentional;
/// the caller must not expect horizontal containment for such lines.
pub fn wrap_text(text: &str, max_width: f32, measure: &dyn TextMeasurer) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        wrap_paragraph(paragraph, max_width, measure, &mut lines);
    }

    lines
}

fn wrap_paragraph(
    paragraph: &str,
    max_width: f32,
    measure: &dyn TextMeasurer,
    lines: &mut Vec<String>,
) {
    if paragraph.trim().is_empty() {
        // Blank paragraph: one blank line
        lines.push(String::new());
        return;
    }

    let mut current_line = String::new();

    for word in paragraph.split_whitespace() {
        if current_line.is_empty() {
            current_line.push_str(word);
            continue;
        }

        let mut candidate = String::with_capacity(current_line.len() + word.len() + 1);
        candidate.push_str(&current_line);
        candidate.push(' ');
        candidate.push_str(word);

        if measure.text_width(&candidate) <= max_width {
            current_line = candidate;
        } else {
            // Current line is full, start a new one with the overflowing word
            lines.push(std::mem::take(&mut current_line));
            current_line.push_str(word);
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }
}
