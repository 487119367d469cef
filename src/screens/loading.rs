//! Loading Screen
//!
//! Spinner shown while the analysis call is in flight, rotating the expert
//! status messages every four seconds.

use std::future::Future;
use std::time::Duration;

use console::{style, Term};
use indicatif::ProgressBar;

use wing_analyst_core::{AiError, AnalysisResult, PilotProfile, WingSelection};
use wing_analyst_llm::WingAdvisor;

/// Status lines cycled under the spinner.
const LOADING_MESSAGES: [&str; 8] = [
    "Accès aux bases de données constructeurs...",
    "Extraction des rapports d'homologation...",
    "Analyse de la structure interne : SharkNose et cellules...",
    "Croisement des tests experts (Ziad Bassil, Flybubble)...",
    "Évaluation de l'allongement et de la sécurité passive...",
    "Calcul du saut de performance par rapport à votre profil...",
    "Synthèse de l'expertise technique...",
    "Mise en page du dossier final...",
];

const MESSAGE_ROTATION: Duration = Duration::from_secs(4);
const TICK: Duration = Duration::from_millis(120);

/// Drive the analysis call under the full loading screen.
pub async fn run_analysis(
    term: &Term,
    advisor: &WingAdvisor,
    profile: &PilotProfile,
    selection: &WingSelection,
) -> std::io::Result<Result<AnalysisResult, AiError>> {
    super::heading(term, "Analyse des voiles, adéquation avec le profil du pilote...")?;
    term.write_line("")?;
    term.write_line(&format!(
        "{} L'IA consulte des sources web réelles en temps réel pour garantir \
         des données constructeurs vérifiées. Cette expertise approfondie prend \
         environ 45 à 60 secondes.",
        style("Note de l'Expert :").bold()
    ))?;
    term.write_line("")?;

    let bar = ProgressBar::new_spinner();
    bar.enable_steady_tick(TICK);
    bar.set_message(LOADING_MESSAGES[0]);

    let analysis = advisor.analyze_wings(profile, selection);
    tokio::pin!(analysis);
    let mut rotation = tokio::time::interval(MESSAGE_ROTATION);
    rotation.tick().await; // the first tick fires immediately
    let mut index = 0;

    let outcome = loop {
        tokio::select! {
            outcome = &mut analysis => break outcome,
            _ = rotation.tick() => {
                index = (index + 1) % LOADING_MESSAGES.len();
                bar.set_message(LOADING_MESSAGES[index]);
            }
        }
    };
    bar.finish_and_clear();
    Ok(outcome)
}

/// Short spinner around a quick call (the completeness check, a chat turn).
pub async fn with_spinner<F, T>(message: &'static str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let bar = ProgressBar::new_spinner();
    bar.enable_steady_tick(TICK);
    bar.set_message(message);
    let outcome = fut.await;
    bar.finish_and_clear();
    outcome
}
