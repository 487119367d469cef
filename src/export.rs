//! Report Export
//!
//! Markdown export of the finished dossier: branded header with reference
//! and date, the edited report with the chart slot rendered as a table,
//! the grounding sources, the chat annex and the legal footer. When a chart
//! dataset exists a companion SVG of the radar chart is written next to the
//! report.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Local};

use wing_analyst_core::chart::render_svg;
use wing_analyst_core::report::{chart_slot_text, ReportBlock};
use wing_analyst_core::{AnalysisResult, ChatHistory, ChatRole, ReportView};

/// Files written by one export.
pub struct ExportPaths {
    pub report: PathBuf,
    pub chart: Option<PathBuf>,
}

/// Write the report (and the radar SVG when chart data exists) into `dir`.
pub fn export_report(
    dir: &Path,
    view: &ReportView,
    result: &AnalysisResult,
    chat: &ChatHistory,
) -> anyhow::Result<ExportPaths> {
    let now = Local::now();
    let stem = format!("WingAnalyst_Rapport_{}", now.format("%Y%m%d_%H%M%S"));

    let report = dir.join(format!("{stem}.md"));
    std::fs::write(&report, render_markdown(view, result, chat, now))
        .with_context(|| format!("écriture du rapport {}", report.display()))?;

    let chart = match result.chart_data.as_deref() {
        Some(data) if !data.is_empty() => {
            let path = dir.join(format!("{stem}_radar.svg"));
            std::fs::write(&path, render_svg(data))
                .with_context(|| format!("écriture du graphique {}", path.display()))?;
            Some(path)
        }
        _ => None,
    };

    Ok(ExportPaths { report, chart })
}

/// Render the full markdown document.
pub fn render_markdown(
    view: &ReportView,
    result: &AnalysisResult,
    chat: &ChatHistory,
    now: DateTime<Local>,
) -> String {
    let reference = report_reference(now);
    let mut doc = format!(
        "# WING ANALYST\n\n\
         **Rapport Technique d'Aide à la Décision**\n\n\
         Réf: {reference} — Date: {}\n\n---\n\n",
        now.format("%d/%m/%Y")
    );

    for block in view.blocks() {
        match block {
            ReportBlock::Paragraph(text) => doc.push_str(&text),
            ReportBlock::ChartSlot => {
                doc.push_str("```\n");
                doc.push_str(&chart_slot_text(result.chart_data.as_deref()));
                doc.push_str("\n```");
            }
        }
        doc.push_str("\n\n");
    }

    if !result.sources.is_empty() {
        doc.push_str("---\n\n## Sources consultées\n\n");
        for source in &result.sources {
            doc.push_str(&format!("- [{}]({})\n", source.title, source.uri));
        }
        doc.push('\n');
    }

    if !chat.is_empty() {
        doc.push_str("---\n\n## ANNEXES : PRÉCISIONS DE L'EXPERT\n\n");
        for message in chat.messages() {
            let speaker = match message.role {
                ChatRole::User => "Question du Pilote",
                ChatRole::Model => "Expert Technique",
            };
            doc.push_str(&format!("**{speaker}**\n\n{}\n\n", message.text));
        }
    }

    doc.push_str(
        "---\n\n\
         **AVERTISSEMENT LÉGAL :** Ce dossier est généré par un système \
         d'intelligence artificielle.\n\
         Les données techniques sont extraites de sources publiques constructeurs \
         et de revues spécialisées au moment de la demande.\n\
         Ce rapport ne remplace pas l'avis d'un moniteur de parapente diplômé d'État.\n\
         Le choix final et la responsabilité de la pratique incombent exclusivement \
         au pilote.\n",
    );
    doc
}

/// Document reference derived from the export instant.
fn report_reference(now: DateTime<Local>) -> String {
    let millis = now.timestamp_millis().to_string();
    let tail = &millis[millis.len().saturating_sub(6)..];
    format!("WA-{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wing_analyst_core::parser::CHART_MARKER;
    use wing_analyst_core::{GroundingSource, RadarData, RadarMetrics};

    fn sample_result(with_chart: bool) -> AnalysisResult {
        AnalysisResult {
            dossier: format!("## 6. Recommandations Finales\n\n{CHART_MARKER}\n\nChoix n°1 : Epsilon."),
            sources: vec![GroundingSource {
                uri: "https://flyozone.com".to_string(),
                title: "Ozone".to_string(),
            }],
            chart_data: with_chart.then(|| {
                vec![RadarData {
                    label: "Epsilon".to_string(),
                    metrics: RadarMetrics {
                        safety: 9.0,
                        performance: 5.0,
                        handling: 7.0,
                        accessibility: 9.0,
                        speed: 4.0,
                    },
                }]
            }),
        }
    }

    #[test]
    fn test_markdown_renders_chart_table_and_sources() {
        let result = sample_result(true);
        let view = ReportView::new(&result);
        let doc = render_markdown(&view, &result, &ChatHistory::default(), Local::now());
        assert!(doc.starts_with("# WING ANALYST"));
        assert!(doc.contains("Comparatif des Performances IA"));
        assert!(!doc.contains(CHART_MARKER));
        assert!(doc.contains("- [Ozone](https://flyozone.com)"));
        assert!(doc.contains("AVERTISSEMENT LÉGAL"));
        // no annex without chat turns
        assert!(!doc.contains("ANNEXES"));
    }

    #[test]
    fn test_markdown_annex_lists_chat_turns() {
        let result = sample_result(false);
        let view = ReportView::new(&result);
        let mut chat = ChatHistory::default();
        chat.push_user("Quel allongement ?");
        chat.push_model("5.2 à plat.");
        let doc = render_markdown(&view, &result, &chat, Local::now());
        assert!(doc.contains("ANNEXES : PRÉCISIONS DE L'EXPERT"));
        assert!(doc.contains("**Question du Pilote**\n\nQuel allongement ?"));
        assert!(doc.contains("**Expert Technique**\n\n5.2 à plat."));
    }

    #[test]
    fn test_export_writes_report_and_svg() {
        let dir = tempfile::tempdir().unwrap();
        let result = sample_result(true);
        let view = ReportView::new(&result);
        let paths =
            export_report(dir.path(), &view, &result, &ChatHistory::default()).unwrap();
        assert!(paths.report.exists());
        let svg_path = paths.chart.unwrap();
        assert!(svg_path.exists());
        assert!(std::fs::read_to_string(&svg_path).unwrap().starts_with("<svg"));
    }

    #[test]
    fn test_export_skips_svg_without_chart_data() {
        let dir = tempfile::tempdir().unwrap();
        let result = sample_result(false);
        let view = ReportView::new(&result);
        let paths =
            export_report(dir.path(), &view, &result, &ChatHistory::default()).unwrap();
        assert!(paths.report.exists());
        assert!(paths.chart.is_none());
    }

    #[test]
    fn test_reference_uses_six_digits() {
        let reference = report_reference(Local::now());
        assert!(reference.starts_with("WA-"));
        assert_eq!(reference.len(), "WA-".len() + 6);
    }
}
