//! Wings Screen
//!
//! Interactive build-up of the wing selection: type a model name to add it,
//! `- nom` to remove one, `s` to flip the AI-suggestion toggle when it is
//! offered, `analyser` to launch, `retour` to go back to the profile.

use std::io;

use console::{style, Term};

use wing_analyst_core::WingSelection;

pub enum WingsAction {
    Back,
    Launch,
}

pub fn run(term: &Term, selection: &mut WingSelection) -> io::Result<WingsAction> {
    super::heading(term, "Les voiles qui t'intéressent")?;
    term.write_line("")?;
    term.write_line(
        "Ajoute les modèles que tu envisages, ou lance directement l'analyse \
         pour laisser l'IA proposer des voiles adaptées à ton profil.",
    )?;

    loop {
        term.write_line("")?;
        render_selection(term, selection)?;
        term.write_line("")?;
        term.write_line(&format!(
            "{}",
            style(
                "Nom de voile pour ajouter, '- nom' pour retirer, 's' pour les \
                 suggestions IA, 'analyser' pour lancer, 'retour' pour le profil :"
            )
            .dim()
        ))?;

        let input = term.read_line()?;
        let input = input.trim();
        match input.to_lowercase().as_str() {
            "" => continue,
            "retour" => return Ok(WingsAction::Back),
            "analyser" | "go" => return Ok(WingsAction::Launch),
            "s" => {
                if selection.suggestion_toggle_available() {
                    selection.include_suggestions = !selection.include_suggestions;
                } else {
                    term.write_line(&format!(
                        "{}",
                        style("Le toggle de suggestions n'est proposé que pour 3 voiles ou moins.")
                            .yellow()
                    ))?;
                }
            }
            _ => {
                if let Some(name) = input.strip_prefix('-') {
                    selection.remove(name.trim());
                } else {
                    selection.add(input);
                }
            }
        }
    }
}

fn render_selection(term: &Term, selection: &WingSelection) -> io::Result<()> {
    if selection.is_empty() {
        term.write_line(&format!(
            "  {}",
            style("Aucune voile saisie : l'IA proposera 3 à 4 modèles de progression.").italic()
        ))?;
    } else {
        for wing in selection.wings() {
            term.write_line(&format!("  • {wing}"))?;
        }
    }
    if selection.suggestion_toggle_available() {
        let state = if selection.include_suggestions {
            style("activées").green()
        } else {
            style("désactivées").dim()
        };
        term.write_line(&format!("  Suggestions IA supplémentaires : {state}"))?;
    }
    Ok(())
}
