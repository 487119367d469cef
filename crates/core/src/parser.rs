//! Response Parser
//!
//! Extracts the terminal structured-data block from the raw analysis text
//! and strips it from the displayed dossier. The model is instructed to end
//! its response with a `[CHART_DATA] … [/CHART_DATA]` block containing the
//! radar chart JSON; in practice it sometimes wraps the block (or just its
//! interior) in a fenced code marker, so the parser tolerates both.
//!
//! Parsing failure is never fatal: the dossier passes through unchanged and
//! the chart is simply omitted.

use serde::Deserialize;
use tracing::warn;

use crate::analysis::{AnalysisResult, GroundingSource};
use crate::chart::RadarData;

/// Sentinel token the model places on its own line where the chart renders.
pub const CHART_MARKER: &str = "[RADAR_CHART]";
/// Opening tag of the terminal structured-data block.
pub const CHART_DATA_OPEN: &str = "[CHART_DATA]";
/// Closing tag of the terminal structured-data block.
pub const CHART_DATA_CLOSE: &str = "[/CHART_DATA]";

#[derive(Debug, Deserialize)]
struct ChartPayload {
    data: Vec<RadarData>,
}

/// Split the raw response into the clean dossier and the optional chart
/// dataset.
///
/// When the block is absent, malformed, or fails shape validation, the
/// returned dossier equals the input unchanged and the dataset is `None`.
pub fn split_chart_data(raw: &str) -> (String, Option<Vec<RadarData>>) {
    match try_extract(raw) {
        Some((dossier, data)) => (dossier, Some(data)),
        None => (raw.to_string(), None),
    }
}

/// Assemble the final [`AnalysisResult`] from raw text and citations.
pub fn parse_analysis_response(raw: &str, sources: Vec<GroundingSource>) -> AnalysisResult {
    let (dossier, chart_data) = split_chart_data(raw);
    AnalysisResult {
        dossier,
        sources,
        chart_data,
    }
}

fn try_extract(raw: &str) -> Option<(String, Vec<RadarData>)> {
    // Last occurrence: the block is terminal, and the prose may legitimately
    // mention the tag itself earlier in the text.
    let open = raw.rfind(CHART_DATA_OPEN)?;
    let close = open + raw[open..].find(CHART_DATA_CLOSE)?;
    let interior = &raw[open + CHART_DATA_OPEN.len()..close];

    let payload: ChartPayload = match serde_json::from_str(strip_fence(interior)) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "chart data block present but unparsable, omitting chart");
            return None;
        }
    };
    let data: Vec<RadarData> = payload
        .data
        .into_iter()
        .map(|wing| RadarData {
            label: wing.label,
            metrics: wing.metrics.clamped(),
        })
        .collect();

    let start = widen_over_leading_fence(raw, open);
    let end = widen_over_trailing_fence(raw, close + CHART_DATA_CLOSE.len());
    let mut dossier = String::with_capacity(raw.len());
    dossier.push_str(&raw[..start]);
    dossier.push_str(&raw[end..]);
    Some((dossier.trim().to_string(), data))
}

/// Drop a single surrounding code fence from the block interior, if any.
fn strip_fence(interior: &str) -> &str {
    let mut text = interior.trim();
    if let Some(rest) = text.strip_prefix("```") {
        // opening fence may carry a language hint ("```json")
        text = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// If the line immediately preceding the block is a fence marker, include it
/// in the removed region.
fn widen_over_leading_fence(raw: &str, open: usize) -> usize {
    let before = raw[..open].trim_end();
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    if before[line_start..].trim_start().starts_with("```") {
        line_start
    } else {
        open
    }
}

/// If a fence marker immediately follows the block, include it too.
fn widen_over_trailing_fence(raw: &str, end: usize) -> usize {
    let after = &raw[end..];
    let skipped = after.len() - after.trim_start().len();
    if after.trim_start().starts_with("```") {
        let fence_start = end + skipped;
        raw[fence_start..]
            .find('\n')
            .map(|i| fence_start + i + 1)
            .unwrap_or(raw.len())
    } else {
        end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{"data": [
        {"label": "Epsilon", "metrics": {"safety": 9, "performance": 5, "handling": 7, "accessibility": 9, "speed": 4}},
        {"label": "Alpina 4", "metrics": {"safety": 6, "performance": 9, "handling": 8, "accessibility": 5, "speed": 8}}
    ]}"#;

    fn dossier_with_block(block: &str) -> String {
        format!(
            "## 6. Recommandations Finales\n\n{CHART_MARKER}\n\nLe choix n°1 est l'Epsilon.\n\n{block}"
        )
    }

    #[test]
    fn test_well_formed_block_extracted_and_stripped() {
        let raw = dossier_with_block(&format!(
            "{CHART_DATA_OPEN}\n{PAYLOAD}\n{CHART_DATA_CLOSE}"
        ));
        let (dossier, chart) = split_chart_data(&raw);

        let chart = chart.expect("chart data should parse");
        assert_eq!(chart.len(), 2);
        assert_eq!(chart[0].label, "Epsilon");
        assert_eq!(chart[1].metrics.performance, 9.0);

        assert!(!dossier.contains(CHART_DATA_OPEN));
        assert!(!dossier.contains(CHART_DATA_CLOSE));
        assert!(!dossier.contains("\"safety\""));
        // the in-prose marker survives for the presenter
        assert!(dossier.contains(CHART_MARKER));
        assert!(dossier.ends_with("Le choix n°1 est l'Epsilon."));
    }

    #[test]
    fn test_no_block_is_identity() {
        let raw = "## 6. Recommandations Finales\n\nPas de données chiffrées.";
        let (dossier, chart) = split_chart_data(raw);
        assert!(chart.is_none());
        assert_eq!(dossier, raw);
    }

    #[test]
    fn test_malformed_json_is_identity() {
        let raw = dossier_with_block(&format!(
            "{CHART_DATA_OPEN}\nnot json at all\n{CHART_DATA_CLOSE}"
        ));
        let (dossier, chart) = split_chart_data(&raw);
        assert!(chart.is_none());
        assert_eq!(dossier, raw);
    }

    #[test]
    fn test_unclosed_block_is_identity() {
        let raw = dossier_with_block(&format!("{CHART_DATA_OPEN}\n{PAYLOAD}"));
        let (dossier, chart) = split_chart_data(&raw);
        assert!(chart.is_none());
        assert_eq!(dossier, raw);
    }

    #[test]
    fn test_block_wrapped_in_code_fence() {
        let raw = dossier_with_block(&format!(
            "```\n{CHART_DATA_OPEN}\n{PAYLOAD}\n{CHART_DATA_CLOSE}\n```"
        ));
        let (dossier, chart) = split_chart_data(&raw);
        assert!(chart.is_some());
        assert!(!dossier.contains("```"));
        assert!(dossier.ends_with("Le choix n°1 est l'Epsilon."));
    }

    #[test]
    fn test_interior_wrapped_in_json_fence() {
        let raw = dossier_with_block(&format!(
            "{CHART_DATA_OPEN}\n```json\n{PAYLOAD}\n```\n{CHART_DATA_CLOSE}"
        ));
        let (_, chart) = split_chart_data(&raw);
        assert_eq!(chart.expect("fenced interior should parse").len(), 2);
    }

    #[test]
    fn test_out_of_range_metrics_are_clamped() {
        let raw = format!(
            "Rapport.\n\n{CHART_DATA_OPEN}\n{{\"data\": [{{\"label\": \"X\", \"metrics\": {{\"safety\": 42}}}}]}}\n{CHART_DATA_CLOSE}"
        );
        let (_, chart) = split_chart_data(&raw);
        let chart = chart.unwrap();
        assert_eq!(chart[0].metrics.safety, 10.0);
        assert_eq!(chart[0].metrics.speed, 0.0);
    }

    #[test]
    fn test_parse_analysis_response_carries_sources() {
        let sources = vec![GroundingSource {
            uri: "https://flyozone.com".to_string(),
            title: "Ozone".to_string(),
        }];
        let result = parse_analysis_response("Rapport sans bloc.", sources.clone());
        assert_eq!(result.dossier, "Rapport sans bloc.");
        assert_eq!(result.sources, sources);
        assert!(result.chart_data.is_none());
    }
}
