//! Analysis Result
//!
//! The parsed outcome of a wing analysis: the markdown dossier (structured
//! block already stripped), the grounding citations returned by web search,
//! and the optional radar chart dataset.

use serde::{Deserialize, Serialize};

use crate::chart::RadarData;

/// A web citation backing the generated dossier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: String,
    pub title: String,
}

/// Final product of the analysis request, after response parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Markdown report with the structured-data block removed
    pub dossier: String,
    /// Grounding citations, in the order the service returned them
    #[serde(default)]
    pub sources: Vec<GroundingSource>,
    /// Chart dataset; absent when the model omitted it or parsing failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<Vec<RadarData>>,
}
