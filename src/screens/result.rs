//! Result Screen
//!
//! Presents the finished dossier and runs the post-analysis command loop:
//! raw-edit in `$EDITOR`, copy to the clipboard, markdown export, follow-up
//! chat with the expert, new session or quit.

use std::io::Write;

use anyhow::Context;
use console::{style, Term};
use tracing::warn;

use wing_analyst_core::chat::CHAT_ERROR_REPLY;
use wing_analyst_core::report::{chart_slot_text, ReportBlock};
use wing_analyst_core::{AnalysisResult, ReportView, Workflow};
use wing_analyst_llm::WingAdvisor;

use crate::export;
use crate::screens::loading;

pub enum ResultAction {
    /// Back to a fresh profile
    NewSession,
    Quit,
}

pub async fn run(
    term: &Term,
    advisor: &WingAdvisor,
    workflow: &mut Workflow,
) -> anyhow::Result<ResultAction> {
    let result = workflow
        .result()
        .cloned()
        .context("écran résultat sans analyse terminée")?;
    let mut view = ReportView::new(&result);

    render_report(term, &view, &result)?;
    loop {
        term.write_line("")?;
        term.write_line(&format!(
            "{}",
            style(
                "[e] éditer  [c] copier  [x] exporter  [q] question à l'expert  \
                 [n] nouvelle analyse  [s] sortir"
            )
            .bold()
        ))?;
        let choice = term.read_line()?;
        match choice.trim().to_lowercase().as_str() {
            "e" => {
                edit_in_editor(&mut view)?;
                render_report(term, &view, &result)?;
            }
            "c" => match copy_to_clipboard(&view, &result) {
                Ok(()) => term.write_line(&format!(
                    "{}",
                    style("Rapport copié dans le presse-papiers.").green()
                ))?,
                Err(err) => {
                    warn!(error = %err, "clipboard copy failed");
                    term.write_line(&format!(
                        "{}",
                        style(format!("Copie impossible : {err}")).red()
                    ))?;
                }
            },
            "x" => {
                view.end_editing();
                let dir = std::env::current_dir()?;
                match export::export_report(&dir, &view, &result, workflow.chat()) {
                    Ok(paths) => {
                        term.write_line(&format!(
                            "{} {}",
                            style("Rapport exporté :").green(),
                            paths.report.display()
                        ))?;
                        if let Some(chart) = paths.chart {
                            term.write_line(&format!(
                                "{} {}",
                                style("Graphique radar :").green(),
                                chart.display()
                            ))?;
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "report export failed");
                        term.write_line(&format!(
                            "{}",
                            style(format!("Export impossible : {err}")).red()
                        ))?;
                    }
                }
            }
            "q" => ask_expert(term, advisor, workflow, &view).await?,
            "n" => return Ok(ResultAction::NewSession),
            "s" | "quit" => return Ok(ResultAction::Quit),
            _ => {}
        }
    }
}

fn render_report(term: &Term, view: &ReportView, result: &AnalysisResult) -> std::io::Result<()> {
    super::heading(term, "Rapport d'Expertise — IA Wing Analyst Engineering")?;
    term.write_line("")?;
    for block in view.blocks() {
        match block {
            ReportBlock::Paragraph(text) => term.write_line(&text)?,
            ReportBlock::ChartSlot => {
                term.write_line(&format!(
                    "{}",
                    style(chart_slot_text(result.chart_data.as_deref())).cyan()
                ))?;
            }
        }
        term.write_line("")?;
    }
    if !result.sources.is_empty() {
        term.write_line(&format!("{}", style("Sources consultées :").bold()))?;
        for source in &result.sources {
            term.write_line(&format!("  • {} — {}", source.title, source.uri))?;
        }
    }
    Ok(())
}

/// Raw-edit round-trip through the pilot's editor. The edited text replaces
/// the view's copy; the analysis result itself is never touched.
fn edit_in_editor(view: &mut ReportView) -> anyhow::Result<()> {
    view.toggle_editing();
    let mut file = tempfile::Builder::new()
        .prefix("wing-analyst-")
        .suffix(".md")
        .tempfile()
        .context("création du fichier temporaire d'édition")?;
    file.write_all(view.text().as_bytes())?;
    file.flush()?;

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = std::process::Command::new(&editor)
        .arg(file.path())
        .status()
        .with_context(|| format!("lancement de l'éditeur {editor}"))?;
    if status.success() {
        view.set_text(std::fs::read_to_string(file.path())?);
    }
    view.end_editing();
    Ok(())
}

fn copy_to_clipboard(view: &ReportView, result: &AnalysisResult) -> anyhow::Result<()> {
    let mut text = String::new();
    for block in view.blocks() {
        match block {
            ReportBlock::Paragraph(paragraph) => text.push_str(&paragraph),
            ReportBlock::ChartSlot => text.push_str(&chart_slot_text(result.chart_data.as_deref())),
        }
        text.push_str("\n\n");
    }
    arboard::Clipboard::new()?.set_text(text)?;
    Ok(())
}

/// One follow-up turn. Failures stay inside the chat: the placeholder reply
/// is appended and the session continues.
async fn ask_expert(
    term: &Term,
    advisor: &WingAdvisor,
    workflow: &mut Workflow,
    view: &ReportView,
) -> anyhow::Result<()> {
    term.write_line(&format!("{}", style("Ta question à l'expert :").bold()))?;
    let question = term.read_line()?;
    let question = question.trim();
    if question.is_empty() {
        return Ok(());
    }
    workflow.chat_mut().push_user(question);

    let reply = loading::with_spinner(
        "L'expert consulte le dossier...",
        advisor.ask_follow_up(workflow.chat(), view.text()),
    )
    .await;
    let text = match reply {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "follow-up chat turn failed");
            CHAT_ERROR_REPLY.to_string()
        }
    };
    workflow.chat_mut().push_model(text.clone());
    term.write_line("")?;
    term.write_line(&format!("{} {text}", style("Expert :").bold().green()))?;
    Ok(())
}
