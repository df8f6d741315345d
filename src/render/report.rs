//! Structured render report.
//!
//! Per-cell and per-picture outcomes are collected here instead of being
//! silently swallowed: the report travels back to the caller alongside the
//! page bytes.

use serde::{Deserialize, Serialize};

use crate::config::Orientation;
use crate::error::Result;

/// Outcome of painting one cell or merged region (recorded at the region's
/// origin only).
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CellDiagnostic {
    pub row: u32,
    pub col: u32,
    pub ok: bool,
    /// Lines dropped below the cell's bottom edge.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub clipped_lines: u32,
    /// Single-line value was ellipsis-truncated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
    /// Glyph metrics were unavailable; monospace estimate substituted.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub measurement_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Outcome of compositing one embedded picture.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PictureDiagnostic {
    /// Index into the document's picture list.
    pub index: usize,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Everything the pipeline observed while producing the page.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RenderReport {
    /// One entry per painted cell/region origin, in paint order.
    pub cells: Vec<CellDiagnostic>,
    pub pictures: Vec<PictureDiagnostic>,
    /// Grid canvas size before page fitting.
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Chosen page geometry.
    pub page_width: u32,
    pub page_height: u32,
    pub orientation: Orientation,
    /// Uniform scale the canvas was drawn at on the page.
    pub page_scale: f32,
}

impl RenderReport {
    /// True when every cell and picture painted cleanly.
    pub fn is_clean(&self) -> bool {
        self.cells.iter().all(|c| c.ok && c.clipped_lines == 0 && !c.truncated)
            && self.pictures.iter().all(|p| p.ok)
    }

    /// Serialize the report as JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| crate::error::GridPageError::Page(format!("report serialization: {e}")))
    }
}

fn is_zero(v: &u32) -> bool {
    *v == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn clean_report() {
        let mut report = RenderReport::default();
        assert!(report.is_clean());
        report.pictures.push(PictureDiagnostic {
            index: 0,
            ok: false,
            note: Some("decode failed".into()),
        });
        assert!(!report.is_clean());
    }

    #[test]
    fn report_round_trips_as_json() {
        let report = RenderReport {
            cells: vec![CellDiagnostic {
                row: 0,
                col: 1,
                ok: true,
                clipped_lines: 2,
                truncated: false,
                measurement_fallback: true,
                note: None,
            }],
            ..RenderReport::default()
        };
        let json = report.to_json().unwrap();
        let back: RenderReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cells.len(), 1);
        assert_eq!(back.cells[0].clipped_lines, 2);
    }
}
