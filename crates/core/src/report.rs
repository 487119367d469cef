//! Report View
//!
//! Presenter-side state for a finished analysis: a local editable copy of
//! the dossier (the original `AnalysisResult` is never mutated) and the
//! block-level substitution of the chart sentinel marker.
//!
//! The marker substitution works on paragraph blocks rather than raw string
//! splicing: the dossier is cut into blank-line-separated blocks and any
//! block whose text contains the marker becomes a chart slot.

use crate::analysis::AnalysisResult;
use crate::chart::{RadarData, AXIS_LABELS};
use crate::parser::CHART_MARKER;

/// Shown in place of the chart when no dataset is available.
const CHART_PLACEHOLDER: &str = "[Comparatif graphique indisponible pour cette analyse]";

/// A paragraph-level block of the rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBlock {
    /// Plain markdown paragraph
    Paragraph(String),
    /// Position of the radar chart widget
    ChartSlot,
}

/// Editable view over a dossier.
#[derive(Debug, Clone)]
pub struct ReportView {
    dossier: String,
    editing: bool,
}

impl ReportView {
    /// Start a view from a fresh analysis result, copying the dossier.
    pub fn new(result: &AnalysisResult) -> Self {
        Self {
            dossier: result.dossier.clone(),
            editing: false,
        }
    }

    /// Current editable text, verbatim.
    pub fn text(&self) -> &str {
        &self.dossier
    }

    /// Replace the editable text. The originating result is untouched.
    pub fn set_text(&mut self, text: String) {
        self.dossier = text;
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Toggle between rendered and raw-edit mode. Edits survive any number
    /// of toggles.
    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    /// Force rendered mode (used before export).
    pub fn end_editing(&mut self) {
        self.editing = false;
    }

    /// Cut the dossier into rendering blocks, substituting chart slots for
    /// marker paragraphs.
    ///
    /// A fenced code block containing a blank line is cut into several
    /// paragraphs; consumers render blocks in order and re-join them with a
    /// blank line, so the fenced text comes out unchanged.
    pub fn blocks(&self) -> Vec<ReportBlock> {
        self.dossier
            .split("\n\n")
            .filter(|block| !block.trim().is_empty())
            .map(|block| {
                if block.contains(CHART_MARKER) {
                    ReportBlock::ChartSlot
                } else {
                    ReportBlock::Paragraph(block.to_string())
                }
            })
            .collect()
    }
}

/// Text rendering of the chart slot: an aligned comparison table when data
/// is present and non-empty, the placeholder line otherwise.
pub fn chart_slot_text(data: Option<&[RadarData]>) -> String {
    let data = match data {
        Some(data) if !data.is_empty() => data,
        _ => return CHART_PLACEHOLDER.to_string(),
    };

    let label_width = data
        .iter()
        .map(|wing| wing.label.chars().count())
        .max()
        .unwrap_or(0)
        .max("Voile".chars().count());

    let mut table = String::from("Comparatif des Performances IA\n\n");
    table.push_str(&format!("{:<label_width$}", "Voile"));
    for axis in AXIS_LABELS {
        table.push_str(&format!("  {axis}"));
    }
    table.push('\n');
    for wing in data {
        let metrics = wing.metrics.clamped();
        table.push_str(&format!("{:<label_width$}", wing.label));
        for (axis, value) in AXIS_LABELS.iter().zip(metrics.values()) {
            table.push_str(&format!("  {value:>width$.1}", width = axis.chars().count()));
        }
        table.push('\n');
    }
    table
}
